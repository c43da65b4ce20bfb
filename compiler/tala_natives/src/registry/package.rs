//! A package of native callables.

use std::collections::BTreeMap;

use tala_ir::Name;

use crate::{CallableDescriptor, CallableKind, MemberName, Visibility};

/// Native callables registered under one fully-qualified package name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    fqn: Name,
    functions: BTreeMap<MemberName, CallableDescriptor>,
    actions: BTreeMap<MemberName, CallableDescriptor>,
}

impl Package {
    /// Create an empty package.
    pub fn new(fqn: Name) -> Self {
        Package {
            fqn,
            functions: BTreeMap::new(),
            actions: BTreeMap::new(),
        }
    }

    /// Fully-qualified package name.
    #[inline]
    pub fn fqn(&self) -> Name {
        self.fqn
    }

    /// Insert a descriptor into the map for its kind.
    ///
    /// An existing entry under the same member name is replaced and
    /// returned; descriptors are never merged.
    pub fn insert(&mut self, descriptor: CallableDescriptor) -> Option<CallableDescriptor> {
        debug_assert_eq!(descriptor.package(), self.fqn);
        let map = self.map_mut(descriptor.kind());
        map.insert(descriptor.member(), descriptor)
    }

    /// Remove the entry of `kind` named `member`.
    pub fn remove(&mut self, kind: CallableKind, member: MemberName) -> Option<CallableDescriptor> {
        self.map_mut(kind).remove(&member)
    }

    fn map_mut(&mut self, kind: CallableKind) -> &mut BTreeMap<MemberName, CallableDescriptor> {
        match kind {
            CallableKind::Function => &mut self.functions,
            CallableKind::Action => &mut self.actions,
        }
    }

    /// Look up a function (public or private) by member name.
    #[inline]
    pub fn function(&self, member: MemberName) -> Option<&CallableDescriptor> {
        self.functions.get(&member)
    }

    /// Look up an action by member name.
    #[inline]
    pub fn action(&self, member: MemberName) -> Option<&CallableDescriptor> {
        self.actions.get(&member)
    }

    /// Look up a callable of either kind.
    pub fn get(&self, kind: CallableKind, member: MemberName) -> Option<&CallableDescriptor> {
        match kind {
            CallableKind::Function => self.function(member),
            CallableKind::Action => self.action(member),
        }
    }

    /// All functions in member-name order.
    pub fn functions(&self) -> impl Iterator<Item = &CallableDescriptor> {
        self.functions.values()
    }

    /// Public functions in member-name order.
    pub fn public_functions(&self) -> impl Iterator<Item = &CallableDescriptor> {
        self.functions_with(Visibility::Public)
    }

    /// Private functions in member-name order.
    pub fn private_functions(&self) -> impl Iterator<Item = &CallableDescriptor> {
        self.functions_with(Visibility::Private)
    }

    fn functions_with(&self, visibility: Visibility) -> impl Iterator<Item = &CallableDescriptor> {
        self.functions
            .values()
            .filter(move |d| d.visibility() == visibility)
    }

    /// All actions in member-name order.
    pub fn actions(&self) -> impl Iterator<Item = &CallableDescriptor> {
        self.actions.values()
    }

    /// Total number of callables.
    pub fn len(&self) -> usize {
        self.functions.len() + self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.actions.is_empty()
    }
}

//! Descriptors for host-implemented callables.
//!
//! A `CallableDescriptor` is the fully-formed record a host hands to the
//! registry: where the callable lives, what it takes, what it returns.
//! Descriptors are immutable once built; re-registering replaces them
//! wholesale.

use std::fmt::Write as _;

use tala_ir::{Name, StringLookup, Ty, TypeRef};

use crate::CallableType;

/// Visibility of a native function within its package.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Callable from any package.
    #[default]
    Public,
    /// Callable only from within the declaring package.
    Private,
}

/// What kind of callable a descriptor describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CallableKind {
    /// A package-level or attached native function.
    Function,
    /// A connector action, always invoked through a connector value.
    Action,
}

/// Key of a callable within its package.
///
/// Plain functions have no receiver. Attached functions and actions are
/// keyed by their full receiver type as well, so `Response.setPayload` and
/// `Request.setPayload` are distinct members, and so are two `Response`
/// types declared in different packages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberName {
    pub receiver: Option<TypeRef>,
    pub name: Name,
}

impl MemberName {
    /// A package-level function name.
    #[inline]
    pub const fn plain(name: Name) -> Self {
        MemberName {
            receiver: None,
            name,
        }
    }

    /// A member attached to `receiver`.
    #[inline]
    pub const fn attached(receiver: TypeRef, name: Name) -> Self {
        MemberName {
            receiver: Some(receiver),
            name,
        }
    }
}

/// Identity of a callable symbol: kind, package, member, and parameter types.
///
/// The parameter list is part of the identity, so two callables sharing a
/// name but not a signature are two symbols, never an overload set. An
/// action and an attached function never share an identity, even with the
/// same receiver and signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolName {
    pub kind: CallableKind,
    pub package: Name,
    pub member: MemberName,
    pub params: Vec<Ty>,
}

impl SymbolName {
    pub fn new(kind: CallableKind, package: Name, member: MemberName, params: Vec<Ty>) -> Self {
        SymbolName {
            kind,
            package,
            member,
            params,
        }
    }

    #[inline]
    pub fn function(package: Name, member: MemberName, params: Vec<Ty>) -> Self {
        Self::new(CallableKind::Function, package, member, params)
    }

    #[inline]
    pub fn action(package: Name, member: MemberName, params: Vec<Ty>) -> Self {
        Self::new(CallableKind::Action, package, member, params)
    }

    /// Render as `pkg:Receiver.name(param, ...)`.
    pub fn render<I: StringLookup + ?Sized>(&self, interner: &I) -> String {
        let mut out = qualified_name(self.package, self.member, interner);
        out.push('(');
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", param.display(interner));
        }
        out.push(')');
        out
    }
}

/// Render `pkg:name` or `pkg:Receiver.name`.
pub(crate) fn qualified_name<I: StringLookup + ?Sized>(
    package: Name,
    member: MemberName,
    interner: &I,
) -> String {
    match member.receiver {
        Some(receiver) => format!(
            "{}:{}.{}",
            interner.lookup(package),
            interner.lookup(receiver.name),
            interner.lookup(member.name)
        ),
        None => format!(
            "{}:{}",
            interner.lookup(package),
            interner.lookup(member.name)
        ),
    }
}

/// Immutable description of one native function or action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableDescriptor {
    symbol: SymbolName,
    receiver: Option<Ty>,
    returns: Vec<Ty>,
    visibility: Visibility,
}

impl CallableDescriptor {
    /// Start describing a package-level native function.
    pub fn function(package: Name, name: Name) -> DescriptorBuilder {
        DescriptorBuilder::new(CallableKind::Function, package, MemberName::plain(name), None)
    }

    /// Start describing an action of `connector`.
    pub fn action(package: Name, connector: TypeRef, name: Name) -> DescriptorBuilder {
        DescriptorBuilder::new(
            CallableKind::Action,
            package,
            MemberName::attached(connector, name),
            Some(Ty::Connector(connector)),
        )
    }

    /// The identity this descriptor registers under.
    #[inline]
    pub fn symbol(&self) -> &SymbolName {
        &self.symbol
    }

    /// Fully-qualified name of the owning package.
    #[inline]
    pub fn package(&self) -> Name {
        self.symbol.package
    }

    /// Key within the owning package.
    #[inline]
    pub fn member(&self) -> MemberName {
        self.symbol.member
    }

    /// The callable's own name, without receiver.
    #[inline]
    pub fn name(&self) -> Name {
        self.symbol.member.name
    }

    /// Declared parameter types, excluding the receiver.
    #[inline]
    pub fn params(&self) -> &[Ty] {
        &self.symbol.params
    }

    /// Declared return types, in order.
    #[inline]
    pub fn returns(&self) -> &[Ty] {
        &self.returns
    }

    /// Receiver type for attached functions and actions.
    #[inline]
    pub fn receiver(&self) -> Option<&Ty> {
        self.receiver.as_ref()
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn kind(&self) -> CallableKind {
        self.symbol.kind
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Types of the full argument list a host implementation receives:
    /// the receiver (if any) followed by the declared parameters.
    pub fn arg_types(&self) -> impl Iterator<Item = &Ty> {
        self.receiver.iter().chain(self.symbol.params.iter())
    }

    /// Number of arguments a host implementation receives.
    pub fn arg_count(&self) -> usize {
        usize::from(self.receiver.is_some()) + self.symbol.params.len()
    }

    /// Synthesize the callable type the global scope stores for this descriptor.
    pub fn callable_type(&self) -> CallableType {
        CallableType {
            kind: self.symbol.kind,
            params: self.symbol.params.clone(),
            returns: self.returns.clone(),
        }
    }

    /// Render as `pkg:name` or `pkg:Receiver.name`.
    pub fn qualified_name<I: StringLookup + ?Sized>(&self, interner: &I) -> String {
        qualified_name(self.symbol.package, self.symbol.member, interner)
    }
}

/// Builder for [`CallableDescriptor`].
#[derive(Clone, Debug)]
#[must_use = "call `build()` to obtain the descriptor"]
pub struct DescriptorBuilder {
    kind: CallableKind,
    package: Name,
    member: MemberName,
    receiver: Option<Ty>,
    params: Vec<Ty>,
    returns: Vec<Ty>,
    visibility: Visibility,
}

impl DescriptorBuilder {
    fn new(kind: CallableKind, package: Name, member: MemberName, receiver: Option<Ty>) -> Self {
        DescriptorBuilder {
            kind,
            package,
            member,
            receiver,
            params: Vec::new(),
            returns: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    /// Attach a function to a struct type, making it a member of that type.
    pub fn attached_to(mut self, receiver: TypeRef) -> Self {
        self.member = MemberName::attached(receiver, self.member.name);
        self.receiver = Some(Ty::Struct(receiver));
        self
    }

    /// Append a parameter type.
    pub fn param(mut self, ty: Ty) -> Self {
        self.params.push(ty);
        self
    }

    /// Append several parameter types.
    pub fn params(mut self, tys: impl IntoIterator<Item = Ty>) -> Self {
        self.params.extend(tys);
        self
    }

    /// Append a return type.
    pub fn returns(mut self, ty: Ty) -> Self {
        self.returns.push(ty);
        self
    }

    /// Mark the callable fallible: its last result slot carries an error.
    pub fn fallible(self) -> Self {
        self.returns(Ty::Error)
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Shorthand for `visibility(Visibility::Private)`.
    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    pub fn build(self) -> CallableDescriptor {
        CallableDescriptor {
            symbol: SymbolName::new(self.kind, self.package, self.member, self.params),
            receiver: self.receiver,
            returns: self.returns,
            visibility: self.visibility,
        }
    }
}

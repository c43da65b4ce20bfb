//! The package table: registration, lookup, and unregistration.

use rustc_hash::FxHashMap;
use tala_ir::{Name, Ty};

use crate::{
    CallableDescriptor, CallableKind, GlobalScope, MemberName, Package, Symbol, SymbolName,
};

/// Registry of native packages plus the global scope they populate.
///
/// Registration is create-or-get on the package and last-write-wins on the
/// descriptor. Lookups never create packages.
#[derive(Clone, Debug, Default)]
pub struct PackageTable {
    packages: FxHashMap<Name, Package>,
    scope: GlobalScope,
}

impl PackageTable {
    /// Create an empty table with an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a native function.
    ///
    /// Replaces any function of the same member name in the package, and
    /// inserts or replaces the symbol for the descriptor's exact identity.
    #[tracing::instrument(level = "debug", skip_all, fields(
        package = descriptor.package().raw(),
        name = descriptor.name().raw(),
        public = descriptor.is_public(),
    ))]
    pub fn register_function(&mut self, descriptor: CallableDescriptor) {
        debug_assert_eq!(descriptor.kind(), CallableKind::Function);
        self.register(descriptor);
    }

    /// Register a connector action.
    ///
    /// Same mechanics as [`register_function`](Self::register_function);
    /// actions have no visibility split.
    #[tracing::instrument(level = "debug", skip_all, fields(
        package = descriptor.package().raw(),
        name = descriptor.name().raw(),
    ))]
    pub fn register_action(&mut self, descriptor: CallableDescriptor) {
        debug_assert_eq!(descriptor.kind(), CallableKind::Action);
        self.register(descriptor);
    }

    fn register(&mut self, descriptor: CallableDescriptor) {
        let symbol_name = descriptor.symbol().clone();
        let symbol = Symbol::from_descriptor(&descriptor);

        let package = self
            .packages
            .entry(descriptor.package())
            .or_insert_with(|| {
                tracing::trace!(fqn = descriptor.package().raw(), "creating package");
                Package::new(descriptor.package())
            });
        if package.insert(descriptor).is_some() {
            tracing::debug!("replaced existing descriptor");
        }

        if self.scope.insert(symbol_name, symbol).is_some() {
            tracing::debug!("replaced existing symbol");
        }
    }

    /// Register every callable of `package`, replacing any package of the
    /// same name.
    ///
    /// Symbols of the replaced package's callables stay in the scope, the
    /// same as after unregistration.
    #[tracing::instrument(level = "debug", skip_all, fields(
        package = package.fqn().raw(),
        count = package.len(),
    ))]
    pub fn register_package(&mut self, package: Package) {
        for descriptor in package.functions().chain(package.actions()) {
            self.scope.insert(
                descriptor.symbol().clone(),
                Symbol::from_descriptor(descriptor),
            );
        }
        self.packages.insert(package.fqn(), package);
    }

    /// Remove a native function from its package.
    ///
    /// A missing package or entry is a no-op. The function's symbol stays
    /// resolvable in the global scope until [`rebuild_scope`](Self::rebuild_scope).
    #[tracing::instrument(level = "debug", skip_all, fields(
        package = descriptor.package().raw(),
        name = descriptor.name().raw(),
    ))]
    pub fn unregister_function(&mut self, descriptor: &CallableDescriptor) {
        self.unregister(CallableKind::Function, descriptor);
    }

    /// Remove a connector action from its package.
    ///
    /// Same rules as [`unregister_function`](Self::unregister_function).
    #[tracing::instrument(level = "debug", skip_all, fields(
        package = descriptor.package().raw(),
        name = descriptor.name().raw(),
    ))]
    pub fn unregister_action(&mut self, descriptor: &CallableDescriptor) {
        self.unregister(CallableKind::Action, descriptor);
    }

    fn unregister(&mut self, kind: CallableKind, descriptor: &CallableDescriptor) {
        let Some(package) = self.packages.get_mut(&descriptor.package()) else {
            tracing::trace!("package not registered; nothing to do");
            return;
        };
        if package.remove(kind, descriptor.member()).is_none() {
            tracing::trace!("descriptor not registered; nothing to do");
        }
    }

    /// Look up a package. Never creates one.
    #[inline]
    pub fn get_package(&self, fqn: Name) -> Option<&Package> {
        self.packages.get(&fqn)
    }

    /// Iterate over all packages in unspecified order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Number of registered packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// The global scope populated by registration.
    #[inline]
    pub fn scope(&self) -> &GlobalScope {
        &self.scope
    }

    /// Look up a symbol by exact identity.
    #[inline]
    pub fn lookup_symbol(&self, name: &SymbolName) -> Option<&Symbol> {
        self.scope.lookup(name)
    }

    /// Resolve a call site: exact match on package, member, and the
    /// ordered argument types.
    ///
    /// A function wins over an action registered under the same member and
    /// signature; the action stays reachable through [`resolve`](Self::resolve).
    #[tracing::instrument(level = "trace", skip(self), ret)]
    pub fn resolve_call(&self, package: Name, member: MemberName, args: &[Ty]) -> Option<&Symbol> {
        let mut name = SymbolName::function(package, member, args.to_vec());
        if let Some(symbol) = self.scope.lookup(&name) {
            return Some(symbol);
        }
        name.kind = CallableKind::Action;
        self.scope.lookup(&name)
    }

    /// Resolve a call site of a known kind.
    pub fn resolve(
        &self,
        kind: CallableKind,
        package: Name,
        member: MemberName,
        args: &[Ty],
    ) -> Option<&Symbol> {
        self.scope
            .lookup(&SymbolName::new(kind, package, member, args.to_vec()))
    }

    /// Replace the global scope with one rebuilt from the current packages.
    ///
    /// Drops symbols whose descriptors were unregistered or replaced under a
    /// different signature. Callers must ensure no resolution pass is
    /// reading the scope.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn rebuild_scope(&mut self) {
        let before = self.scope.len();
        self.scope = GlobalScope::rebuild_from(self.packages.values());
        tracing::debug!(before, after = self.scope.len(), "scope rebuilt");
    }
}

//! The global symbol scope the type checker resolves against.
//!
//! Every registered descriptor contributes one symbol, keyed by its full
//! [`SymbolName`]. Lookup is an exact match on package, member, and ordered
//! parameter types.
//!
//! Unregistering a descriptor leaves its symbol here. Removing entries while
//! another compilation unit may be mid-resolution is not safe, so the scope
//! only ever shrinks by being rebuilt from the package table
//! ([`GlobalScope::rebuild_from`]).

use rustc_hash::FxHashMap;

use crate::{Package, Symbol, SymbolName};

/// Table of callable symbols keyed by identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalScope {
    symbols: FxHashMap<SymbolName, Symbol>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, returning the one it replaced.
    pub fn insert(&mut self, name: SymbolName, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(name, symbol)
    }

    /// Look up a symbol by exact identity.
    #[inline]
    pub fn lookup(&self, name: &SymbolName) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &SymbolName) -> bool {
        self.symbols.contains_key(name)
    }

    /// Iterate over all symbols in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolName, &Symbol)> {
        self.symbols.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Build a fresh scope holding exactly the descriptors in `packages`.
    ///
    /// This is the only way symbols leave the scope.
    pub fn rebuild_from<'a>(packages: impl IntoIterator<Item = &'a Package>) -> Self {
        let mut scope = GlobalScope::new();
        for package in packages {
            for descriptor in package.functions().chain(package.actions()) {
                scope.insert(
                    descriptor.symbol().clone(),
                    Symbol::from_descriptor(descriptor),
                );
            }
        }
        scope
    }
}

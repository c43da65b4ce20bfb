//! Compiler-visible symbols synthesized from descriptors.

use bitflags::bitflags;
use tala_ir::Ty;

use crate::{CallableDescriptor, CallableKind};

bitflags! {
    /// Properties of a registered symbol, fixed at registration time.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SymbolFlags: u8 {
        /// Implemented by the host, not compiled from source.
        const NATIVE = 1 << 0;
        /// Visible outside the declaring package.
        const PUBLIC = 1 << 1;
        /// A connector action.
        const ACTION = 1 << 2;
        /// Invoked through a receiver value.
        const ATTACHED = 1 << 3;
        /// The last result slot carries an error.
        const FALLIBLE = 1 << 4;
    }
}

/// The type of a callable as the type checker sees it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableType {
    pub kind: CallableKind,
    pub params: Vec<Ty>,
    pub returns: Vec<Ty>,
}

impl CallableType {
    /// Number of result slots a call occupies.
    #[inline]
    pub fn result_arity(&self) -> usize {
        self.returns.len()
    }

    /// Whether the last result slot is the error slot.
    pub fn is_fallible(&self) -> bool {
        self.returns.last() == Some(&Ty::Error)
    }
}

/// A callable symbol in the global scope.
///
/// Symbols are never edited in place; re-registration replaces the whole
/// value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub ty: CallableType,
    pub flags: SymbolFlags,
}

impl Symbol {
    /// Synthesize the symbol for a registered descriptor.
    pub fn from_descriptor(descriptor: &CallableDescriptor) -> Self {
        let ty = descriptor.callable_type();

        let mut flags = SymbolFlags::NATIVE;
        flags.set(SymbolFlags::PUBLIC, descriptor.is_public());
        flags.set(
            SymbolFlags::ACTION,
            descriptor.kind() == CallableKind::Action,
        );
        flags.set(SymbolFlags::ATTACHED, descriptor.receiver().is_some());
        flags.set(SymbolFlags::FALLIBLE, ty.is_fallible());

        Symbol { ty, flags }
    }

    #[inline]
    pub fn is_action(&self) -> bool {
        self.flags.contains(SymbolFlags::ACTION)
    }
}

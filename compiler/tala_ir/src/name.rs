//! Interned identifier handle.

use std::fmt;

/// Index of a string in a [`StringInterner`](crate::StringInterner).
///
/// Package paths (`runtime`), callable names (`getProperty`) and receiver
/// type names (`Response`) are all `Name`s, so a `SymbolName` hashes and
/// compares as a handful of integers. A `Name` is only meaningful
/// alongside the interner that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, interned first by every interner.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub(crate) const fn from_index(index: u32) -> Self {
        Name(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw value, for structured log fields.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name#{}", self.0)
    }
}

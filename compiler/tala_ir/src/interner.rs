//! Append-only string table backing [`Name`].
//!
//! Strings are leaked on first intern and never freed, so lookups hand out
//! `&'static str` without holding the lock. Bootstrap interns on one
//! thread; conversion checking interns from rayon workers, hence the lock.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

/// Strings every session needs: primitive type keywords and the builtin
/// package paths.
const PREDEFINED: &[&str] = &[
    "int", "float", "boolean", "string", "blob", "json", "xml", "map", "any", "error", "runtime",
    "io", "http",
];

/// The table ran out of `Name` indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternError {
    pub interned: usize,
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "string table is full after {} entries", self.interned)
    }
}

impl std::error::Error for InternError {}

#[derive(Default)]
struct Table {
    ids: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

impl Table {
    fn insert(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.ids.get(s) {
            return Ok(name);
        }
        let index = u32::try_from(self.strings.len()).map_err(|_| InternError {
            interned: self.strings.len(),
        })?;
        let name = Name::from_index(index);
        let stored: &'static str = Box::leak(s.into());
        self.strings.push(stored);
        self.ids.insert(stored, name);
        Ok(name)
    }
}

/// Interns strings into [`Name`]s. Index 0 is always the empty string.
pub struct StringInterner {
    table: RwLock<Table>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut table = Table::default();
        for s in std::iter::once("").chain(PREDEFINED.iter().copied()) {
            // A fresh table holds far fewer than u32::MAX strings.
            let _ = table.insert(s);
        }
        StringInterner {
            table: RwLock::new(table),
        }
    }

    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().ids.get(s) {
            return Ok(name);
        }
        // `insert` re-checks under the write lock.
        self.table.write().insert(s)
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics once `u32::MAX` distinct strings have been interned.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The string behind `name`, or `<unknown>` for a name from another table.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("<unknown>")
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

/// Anything that can turn a [`Name`] back into text.
///
/// Display helpers take `&impl StringLookup` so tests can pass a bare
/// `StringInterner` and the session can pass its shared handle.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

/// Cloneable handle to one session-wide interner.
#[derive(Clone, Default, Debug)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}

#[cfg(test)]
mod tests;

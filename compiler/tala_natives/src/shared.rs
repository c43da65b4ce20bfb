//! Thread-safe shared registry wrapper.
//!
//! Bootstrap registers through the write guard; parallel checkers resolve
//! through read guards once registration has settled.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{ConversionTable, PackageTable};

/// Shared handle to a registry behind `Arc<RwLock<T>>`.
pub struct SharedRegistry<T>(Arc<RwLock<T>>);

/// Shared package table.
pub type SharedPackageTable = SharedRegistry<PackageTable>;

/// Shared conversion table.
pub type SharedConversionTable = SharedRegistry<ConversionTable>;

impl<T> SharedRegistry<T> {
    /// Wrap an owned registry.
    pub fn new(registry: T) -> Self {
        SharedRegistry(Arc::new(RwLock::new(registry)))
    }

    /// Get read access to the registry.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Get write access to the registry.
    ///
    /// Blocks until every outstanding read guard is dropped.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }
}

impl<T: Default> Default for SharedRegistry<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for SharedRegistry<T> {
    fn clone(&self) -> Self {
        SharedRegistry(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRegistry({:?})", &*self.0.read())
    }
}

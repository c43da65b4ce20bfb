//! Package registry for native callables.
//!
//! # Architecture
//!
//! ```text
//! PackageTable
//!     ├── packages: fqn → Package
//!     │       ├── functions: MemberName → CallableDescriptor (public and private)
//!     │       └── actions:   MemberName → CallableDescriptor
//!     └── scope: GlobalScope (SymbolName → Symbol)
//! ```
//!
//! # Design Decisions
//!
//! - Packages are created on first registration and never removed
//! - Public and private functions share one map; each descriptor records
//!   its own visibility
//! - `BTreeMap` inside packages for deterministic iteration (scope rebuilds,
//!   listings); `FxHashMap` for the package index itself

mod package;
mod table;

pub use package::Package;
pub use table::PackageTable;

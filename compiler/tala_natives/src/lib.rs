//! Binding layer between host-implemented natives and the type checker.
//!
//! Host code describes each native function, connector action, and
//! conversion operator with an immutable record. Registering a record makes
//! it visible in two places at once:
//!
//! ```text
//! CallableDescriptor ──register──▶ PackageTable (fqn → Package → descriptors)
//!                               └─▶ GlobalScope  (SymbolName → Symbol)
//! ConversionOperator ──register──▶ ConversionTable ((source, target) → operators)
//! ```
//!
//! The type checker resolves call sites against the `GlobalScope` by exact
//! signature and binds conversion expressions against the
//! `ConversionTable`, which fixes each expression's result arity before
//! anything runs.
//!
//! # Concurrency
//!
//! Tables are plain values mutated through `&mut self`. A session shares
//! them behind [`SharedRegistry`], which takes the write lock for the
//! bootstrap phase and hands out read guards to concurrent checkers once
//! registration has settled.

mod check;
mod conversion;
mod descriptor;
mod registry;
mod scope;
mod shared;
mod symbol;

pub use check::{check_call, check_conversion, conversion_diagnostic, ConversionChecker};
pub use conversion::{ConversionError, ConversionTable};
pub use descriptor::{
    CallableDescriptor, CallableKind, DescriptorBuilder, MemberName, SymbolName, Visibility,
};
pub use registry::{Package, PackageTable};
pub use scope::GlobalScope;
pub use shared::{SharedConversionTable, SharedPackageTable, SharedRegistry};
pub use symbol::{CallableType, Symbol, SymbolFlags};

//! Tala IR - shared identifiers, types, and AST fragments.
//!
//! This crate contains the data structures every other Tala crate speaks:
//! - Names for interned identifiers (package paths, callable names)
//! - Spans for source locations
//! - `Ty`, the closed set of types a native signature can mention
//! - Conversion operators and the conversion expression node
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings become `Name(u32)` for O(1) equality
//! - **Closed Types**: `Ty` is an enum matched exhaustively, never a trait object
//! - **Flat AST**: operands are `ExprId` handles, not boxed subtrees

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod conversion;
mod expr_id;
mod interner;
mod name;
mod span;
mod ty;

pub use ast::{ConversionExpr, ResultSlot, SlotRole};
pub use conversion::ConversionOperator;
pub use expr_id::ExprId;
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use span::Span;
pub use ty::{Ty, TyDisplay, TypeRef};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, Name, Span, TypeRef};
    static_assert_size!(Name, 4);
    static_assert_size!(Span, 8);
    static_assert_size!(ExprId, 4);
    static_assert_size!(TypeRef, 8);
}

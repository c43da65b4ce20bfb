//! AST fragments owned by the binding layer.
//!
//! The full expression tree belongs to the parser. The binding layer only
//! defines the conversion node, because resolving it fixes how many result
//! slots the expression occupies.

mod conversion;

pub use conversion::{ConversionDisplay, ConversionExpr, ResultSlot, SlotRole};

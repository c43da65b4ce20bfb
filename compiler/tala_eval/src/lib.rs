//! Tala Eval - the host side of native calls.
//!
//! The type checker decides *which* native a call site or conversion binds
//! to; this crate runs it:
//!
//! - [`Value`]: the closed set of runtime values crossing the boundary
//! - [`NativeRegistry`]: host entry points by callable identity, with
//!   argument and result validation around each call
//! - [`ConversionRuntime`]: conversion routines by implementation name,
//!   producing one value per result slot
//! - [`builtins`]: the natives and conversions every session starts with

pub mod builtins;
mod convert;
mod dispatch;
mod output;
mod value;

pub use convert::{ConversionFn, ConversionRuntime, ConvertError};
pub use dispatch::{DispatchError, NativeCallable, NativeContext, NativeRegistry, Properties};
pub use output::OutputSink;
pub use value::{ErrorValue, JsonValue, StructRef, StructValue, Value};

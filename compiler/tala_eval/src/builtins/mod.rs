//! Natives and conversion routines every session starts with.
//!
//! | Symbol | Signature |
//! |--------|-----------|
//! | `runtime:getProperty` | `(name: string) -> string` |
//! | `io:print` | `(value: string)` |
//! | `http:Response.setBinaryPayload` | `(payload: blob)` |
//!
//! Builtins are returned as records rather than registered directly, so the
//! session decides which tables they land in.

mod conversions;
mod http;
mod io;
mod runtime;

use std::sync::Arc;

use tala_ir::{ConversionOperator, StringInterner};
use tala_natives::CallableDescriptor;

use crate::{ConversionFn, NativeCallable};

pub use http::{CONTENT_TYPE_FIELD, OCTET_STREAM, PAYLOAD_FIELD};

/// A builtin native: its descriptor and host implementation.
pub struct BuiltinNative {
    pub descriptor: CallableDescriptor,
    pub callable: Arc<dyn NativeCallable>,
}

/// A builtin conversion: its operator and host routine.
pub struct BuiltinConversion {
    pub operator: ConversionOperator,
    pub routine: ConversionFn,
}

/// The builtin natives, with names interned in `interner`.
pub fn builtin_natives(interner: &StringInterner) -> Vec<BuiltinNative> {
    vec![
        runtime::get_property(interner),
        io::print(interner),
        http::set_binary_payload(interner),
    ]
}

/// The builtin conversion operators, with names interned in `interner`.
pub fn builtin_conversions(interner: &StringInterner) -> Vec<BuiltinConversion> {
    conversions::all(interner)
}

use std::sync::Arc;

use tala_ir::{StringInterner, Ty};
use tala_natives::CallableDescriptor;

use super::BuiltinNative;
use crate::{NativeCallable, NativeContext, Value};

/// `runtime:getProperty(name: string) -> string`
///
/// Unset properties read as the empty string.
struct GetProperty;

impl NativeCallable for GetProperty {
    fn execute(&self, ctx: &mut NativeContext<'_>, args: &[Value]) -> Vec<Value> {
        let name = args.first().and_then(Value::as_str).unwrap_or_default();
        vec![Value::from(ctx.property(name).unwrap_or_default())]
    }
}

pub(super) fn get_property(interner: &StringInterner) -> BuiltinNative {
    BuiltinNative {
        descriptor: CallableDescriptor::function(
            interner.intern("runtime"),
            interner.intern("getProperty"),
        )
        .param(Ty::String)
        .returns(Ty::String)
        .build(),
        callable: Arc::new(GetProperty),
    }
}

use std::sync::Arc;

use tala_ir::{StringInterner, Ty};
use tala_natives::CallableDescriptor;

use super::BuiltinNative;
use crate::{NativeCallable, NativeContext, Value};

/// `io:print(value: string)`
struct Print;

impl NativeCallable for Print {
    fn execute(&self, ctx: &mut NativeContext<'_>, args: &[Value]) -> Vec<Value> {
        if let Some(s) = args.first().and_then(Value::as_str) {
            ctx.output().print(s);
        }
        Vec::new()
    }
}

pub(super) fn print(interner: &StringInterner) -> BuiltinNative {
    BuiltinNative {
        descriptor: CallableDescriptor::function(interner.intern("io"), interner.intern("print"))
            .param(Ty::String)
            .build(),
        callable: Arc::new(Print),
    }
}

use std::sync::Arc;

use tala_ir::{Name, StringInterner, Ty, TypeRef};
use tala_natives::CallableDescriptor;

use super::BuiltinNative;
use crate::{NativeCallable, NativeContext, Value};

/// Field of `http:Response` holding the message body.
pub const PAYLOAD_FIELD: &str = "payload";
/// Field of `http:Response` holding the `Content-Type` header.
pub const CONTENT_TYPE_FIELD: &str = "contentType";
/// Content type set alongside a binary payload.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// `http:Response.setBinaryPayload(payload: blob)`
///
/// Stores the blob as the response body and marks it as an octet stream.
struct SetBinaryPayload {
    payload: Name,
    content_type: Name,
}

impl NativeCallable for SetBinaryPayload {
    fn execute(&self, _ctx: &mut NativeContext<'_>, args: &[Value]) -> Vec<Value> {
        if let [Value::Struct(response), payload @ Value::Blob(_)] = args {
            let mut response = response.write();
            response.set_field(self.payload, payload.clone());
            response.set_field(self.content_type, Value::from(OCTET_STREAM));
        }
        Vec::new()
    }
}

pub(super) fn set_binary_payload(interner: &StringInterner) -> BuiltinNative {
    let http = interner.intern("http");
    let response = TypeRef::new(http, interner.intern("Response"));
    BuiltinNative {
        descriptor: CallableDescriptor::function(http, interner.intern("setBinaryPayload"))
            .attached_to(response)
            .param(Ty::Blob)
            .build(),
        callable: Arc::new(SetBinaryPayload {
            payload: interner.intern(PAYLOAD_FIELD),
            content_type: interner.intern(CONTENT_TYPE_FIELD),
        }),
    }
}

//! Invoking natives and running conversions end to end.

use pretty_assertions::assert_eq;
use tala_diagnostic::ErrorCode;
use tala_eval::{DispatchError, JsonValue, StructRef, Value};
use tala_ir::{ConversionExpr, ExprId, Span, Ty};
use tala_natives::{CallableDescriptor, MemberName, SymbolName};
use talac::ConversionSite;

use crate::common::{empty_session, http, http_type, session};

#[test]
fn set_binary_payload_updates_response() {
    let session = session();
    let http = http(&session);
    let response_ty = http_type(&session, "Response");
    let symbol = SymbolName::function(
        http,
        MemberName::attached(response_ty, session.intern("setBinaryPayload")),
        vec![Ty::Blob],
    );

    let response = StructRef::new(response_ty);
    let results = session
        .invoke(&symbol, &[Value::Struct(response.clone()), Value::blob(b"abc".to_vec())])
        .unwrap();
    assert!(results.is_empty());

    let response = response.read();
    let payload = response.field(session.intern(tala_eval::builtins::PAYLOAD_FIELD));
    assert_eq!(payload, Some(&Value::blob(b"abc".to_vec())));
}

#[test]
fn receiver_type_is_checked() {
    let session = session();
    let http = http(&session);
    let response_ty = http_type(&session, "Response");
    let request_ty = http_type(&session, "Request");
    let symbol = SymbolName::function(
        http,
        MemberName::attached(response_ty, session.intern("setBinaryPayload")),
        vec![Ty::Blob],
    );

    let err = session
        .invoke(&symbol, &[Value::Struct(StructRef::new(request_ty)), Value::blob(Vec::<u8>::new())])
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::ArgumentType {
            index: 0,
            expected: Ty::Struct(response_ty),
            found: Ty::Struct(request_ty),
        }
    );
    assert_eq!(err.code(), ErrorCode::E6001);
}

#[test]
fn fallible_action_reports_through_error_slot() {
    let session = empty_session();
    let http = http(&session);
    let connector_ty = http_type(&session, "Connector");
    let get = CallableDescriptor::action(http, connector_ty, session.intern("get"))
        .param(Ty::String)
        .returns(Ty::Json)
        .fallible()
        .build();
    let symbol = get.symbol().clone();
    session.register_native_fn(get, |_, args| match args {
        [Value::Connector(_), Value::Str(path)] if path.starts_with('/') => {
            vec![Value::json(JsonValue::Bool(true)), Value::Nil]
        }
        _ => vec![Value::json(JsonValue::Null), Value::error("bad path")],
    });

    let connector = Value::Connector(StructRef::new(connector_ty));
    assert_eq!(
        session.invoke(&symbol, &[connector.clone(), Value::from("/ok")]),
        Ok(vec![Value::json(JsonValue::Bool(true)), Value::Nil])
    );
    assert_eq!(
        session.invoke(&symbol, &[connector, Value::from("nope")]),
        Ok(vec![Value::json(JsonValue::Null), Value::error("bad path")])
    );
}

#[test]
fn host_result_mismatch_is_caught() {
    let session = empty_session();
    let answer = CallableDescriptor::function(session.intern("demo"), session.intern("answer"))
        .returns(Ty::Int)
        .build();
    let symbol = answer.symbol().clone();
    session.register_native_fn(answer, |_, _| vec![Value::from("42")]);

    let err = session.invoke(&symbol, &[]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6002);

    let diag = err.diagnostic(&symbol, Span::new(3, 9), &**session.interner());
    assert_eq!(diag.message, "result 0 of `demo:answer()` is `string`, declared `int`");
}

#[test]
fn checked_conversion_runs_and_fills_error_slot() {
    let session = session();
    let mut units = vec![vec![ConversionSite::new(
        ConversionExpr::new(ExprId::new(0), Ty::Int, Span::new(0, 10)),
        Ty::Json,
    )]];
    assert!(!session.check_conversions(&mut units).has_errors());
    let expr = &units[0][0].expr;

    assert_eq!(
        session.convert(expr, &Value::json(JsonValue::Int(7))).unwrap(),
        vec![Value::Int(7), Value::Nil]
    );
    let failed = session.convert(expr, &Value::json(JsonValue::Bool(false))).unwrap();
    assert_eq!(failed.len(), 2);
    assert_eq!(failed[0], Value::Int(0));
    assert!(failed[1].as_error().is_some());
}

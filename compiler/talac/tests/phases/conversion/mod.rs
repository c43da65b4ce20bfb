//! Conversion resolution and result-slot arity.

use pretty_assertions::assert_eq;
use tala_diagnostic::ErrorCode;
use tala_ir::{ConversionExpr, ConversionOperator, ExprId, ResultSlot, Span, Ty};
use tala_natives::{check_conversion, ConversionError};
use tala_eval::{ErrorValue, Value};
use talac::ConversionSite;

use crate::common::{empty_session, session};

fn expr(target: Ty) -> ConversionExpr {
    ConversionExpr::new(ExprId::new(0), target, Span::new(0, 12))
}

#[test]
fn unsafe_json_to_int_has_two_slots() {
    let session = session();
    let mut conversion = expr(Ty::Int);
    assert!(conversion.is_multi_return());

    check_conversion(&session.conversions().read(), &mut conversion, &Ty::Json).unwrap();

    assert_eq!(
        conversion.result_slots,
        vec![ResultSlot::value(Ty::Int), ResultSlot::error()]
    );
    assert!(conversion.is_multi_return());
    assert_eq!(conversion.types().cloned().collect::<Vec<_>>(), vec![Ty::Int, Ty::Error]);
}

#[test]
fn safe_int_to_float_has_one_slot() {
    let session = session();
    let mut conversion = expr(Ty::Float);

    check_conversion(&session.conversions().read(), &mut conversion, &Ty::Int).unwrap();

    assert_eq!(conversion.result_slots, vec![ResultSlot::value(Ty::Float)]);
    assert!(!conversion.is_multi_return());
    assert_eq!(
        conversion.display(&**session.interner()).to_string(),
        "<float> expr#0"
    );
}

#[test]
fn missing_operator_is_no_such_conversion() {
    let session = session();
    let mut conversion = expr(Ty::Xml);

    let err = check_conversion(&session.conversions().read(), &mut conversion, &Ty::Int);

    assert_eq!(
        err,
        Err(ConversionError::NoSuchConversion {
            source: Ty::Int,
            target: Ty::Xml
        })
    );
    assert!(!conversion.is_resolved());
}

fn noop(operand: &Value) -> Result<Value, ErrorValue> {
    Ok(operand.clone())
}

#[test]
fn two_distinct_operators_are_ambiguous() {
    let session = empty_session();
    let first = ConversionOperator::safe(Ty::Int, Ty::Any, session.intern("int_to_any"));
    let second = ConversionOperator::unsafe_(Ty::Int, Ty::Any, session.intern("int_to_any_checked"));
    assert!(session.register_conversion(first.clone(), noop));
    assert!(!session.register_conversion(first, noop));
    assert!(session.register_conversion(second, noop));

    let mut conversion = expr(Ty::Any);
    let err = check_conversion(&session.conversions().read(), &mut conversion, &Ty::Int);
    assert_eq!(
        err.map_err(|e| e.code()),
        Err(ErrorCode::E2102)
    );
}

#[test]
fn batch_check_keeps_going_after_errors() {
    let session = session();
    let sites = vec![
        ConversionSite::new(ConversionExpr::new(ExprId::new(0), Ty::Xml, Span::new(0, 9)), Ty::Json),
        ConversionSite::new(ConversionExpr::new(ExprId::new(1), Ty::Int, Span::new(20, 30)), Ty::Json),
        ConversionSite::new(ConversionExpr::new(ExprId::new(2), Ty::Blob, Span::new(40, 50)), Ty::String),
    ];
    let mut units = vec![sites];

    let mut queue = session.check_conversions(&mut units);

    assert_eq!(queue.error_count(), 2);
    assert!(units[0][1].expr.is_resolved());
    let diagnostics = queue.flush();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].message, "no conversion from `json` to `xml`");
    assert_eq!(
        diagnostics[0].notes,
        vec!["`json` converts to `int`, `string`".to_string()]
    );
    assert_eq!(diagnostics[1].message, "no conversion from `string` to `blob`");
}

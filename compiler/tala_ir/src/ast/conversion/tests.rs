use super::*;
use crate::StringInterner;
use pretty_assertions::assert_eq;

fn json_to_int(interner: &StringInterner) -> ConversionOperator {
    ConversionOperator::unsafe_(Ty::Json, Ty::Int, interner.intern("json_to_int"))
}

#[test]
fn unresolved_conversion_is_multi_return() {
    let expr = ConversionExpr::new(ExprId::new(0), Ty::Int, Span::new(0, 13));

    assert!(!expr.is_resolved());
    assert!(expr.is_multi_return());
    assert!(expr.result_slots.is_empty());
}

#[test]
fn unsafe_binding_reserves_error_slot() {
    let interner = StringInterner::new();
    let mut expr = ConversionExpr::new(ExprId::new(0), Ty::Int, Span::DUMMY);

    expr.bind(json_to_int(&interner));

    assert!(expr.is_multi_return());
    assert_eq!(
        expr.result_slots,
        vec![ResultSlot::value(Ty::Int), ResultSlot::error()]
    );
    assert!(expr.result_slots[1].is_error());
}

#[test]
fn safe_binding_has_single_slot() {
    let interner = StringInterner::new();
    let mut expr = ConversionExpr::new(ExprId::new(1), Ty::Float, Span::DUMMY);

    expr.bind(ConversionOperator::safe(
        Ty::Int,
        Ty::Float,
        interner.intern("int_to_float"),
    ));

    assert!(!expr.is_multi_return());
    assert_eq!(expr.types().collect::<Vec<_>>(), vec![&Ty::Float]);
}

#[test]
fn rebinding_replaces_slots() {
    let interner = StringInterner::new();
    let mut expr = ConversionExpr::new(ExprId::new(2), Ty::Int, Span::DUMMY);

    expr.bind(json_to_int(&interner));
    expr.bind(ConversionOperator::safe(
        Ty::Float,
        Ty::Int,
        interner.intern("float_to_int"),
    ));

    assert_eq!(expr.result_slots.len(), 1);
}

#[test]
fn display_shows_target_and_operand() {
    let interner = StringInterner::new();
    let expr = ConversionExpr::new(ExprId::new(7), Ty::Int, Span::DUMMY);
    assert_eq!(expr.display(&interner).to_string(), "<int> expr#7");
}

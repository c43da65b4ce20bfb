//! Property tests over registration and conversion resolution.

#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use tala_diagnostic::ErrorCode;
use tala_ir::{ConversionExpr, ConversionOperator, ExprId, Span, StringInterner, Ty};
use tala_natives::{check_conversion, CallableDescriptor, ConversionTable, PackageTable};

fn primitive_strategy() -> impl Strategy<Value = Ty> {
    prop_oneof![
        Just(Ty::Int),
        Just(Ty::Float),
        Just(Ty::Boolean),
        Just(Ty::String),
        Just(Ty::Blob),
        Just(Ty::Json),
        Just(Ty::Xml),
        Just(Ty::Map),
    ]
}

fn ty_strategy() -> impl Strategy<Value = Ty> {
    primitive_strategy().prop_recursive(2, 4, 1, |inner| inner.prop_map(Ty::array_of))
}

proptest! {
    /// Whatever was registered last under an identity is what lookup sees.
    #[test]
    fn last_registration_wins(
        params in prop::collection::vec(ty_strategy(), 0..4),
        returns in prop::collection::vec(prop::collection::vec(ty_strategy(), 0..3), 1..6),
    ) {
        let interner = StringInterner::new();
        let package = interner.intern("pkg");
        let name = interner.intern("f");
        let mut table = PackageTable::new();

        let mut last = None;
        for rets in returns {
            let descriptor = rets
                .into_iter()
                .fold(
                    CallableDescriptor::function(package, name).params(params.clone()),
                    |builder, ty| builder.returns(ty),
                )
                .build();
            table.register_function(descriptor.clone());
            last = Some(descriptor);
        }

        let last = last.unwrap();
        let symbol = table.lookup_symbol(last.symbol()).unwrap();
        prop_assert_eq!(&symbol.ty.returns, &last.returns().to_vec());
        prop_assert_eq!(table.get_package(package).unwrap().len(), 1);
    }

    /// A bound conversion has one slot when safe and two when not.
    #[test]
    fn slot_arity_follows_safety(source in ty_strategy(), target in ty_strategy(), safe in any::<bool>()) {
        let interner = StringInterner::new();
        let implementation = interner.intern("convert");
        let operator = if safe {
            ConversionOperator::safe(source.clone(), target.clone(), implementation)
        } else {
            ConversionOperator::unsafe_(source.clone(), target.clone(), implementation)
        };
        let mut table = ConversionTable::new();
        table.register(operator);

        let mut expr = ConversionExpr::new(ExprId::new(0), target, Span::DUMMY);
        prop_assert!(check_conversion(&table, &mut expr, &source).is_ok());
        prop_assert_eq!(expr.result_slots.len(), if safe { 1 } else { 2 });
        prop_assert_eq!(expr.is_multi_return(), !safe);
    }

    /// Resolution never picks among several operators.
    #[test]
    fn distinct_operators_are_ambiguous(source in ty_strategy(), target in ty_strategy(), extra in 1usize..4) {
        let interner = StringInterner::new();
        let mut table = ConversionTable::new();
        for i in 0..=extra {
            let implementation = interner.intern(&format!("convert_{i}"));
            table.register(ConversionOperator::safe(source.clone(), target.clone(), implementation));
        }

        let mut expr = ConversionExpr::new(ExprId::new(0), target, Span::DUMMY);
        let err = check_conversion(&table, &mut expr, &source).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::E2102);
        prop_assert!(!expr.is_resolved());
    }
}

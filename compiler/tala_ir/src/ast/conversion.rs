//! Type conversion expression: `<T> expr`.

use std::fmt;

use crate::{ConversionOperator, ExprId, Span, StringLookup, Ty};

/// What a result slot carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// The converted value.
    Value,
    /// The error produced by a failed conversion, or nil.
    Error,
}

/// One position in an expression's result tuple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResultSlot {
    pub ty: Ty,
    pub role: SlotRole,
}

impl ResultSlot {
    /// A slot holding a converted value of `ty`.
    pub fn value(ty: Ty) -> Self {
        ResultSlot {
            ty,
            role: SlotRole::Value,
        }
    }

    /// The trailing error slot of a fallible result.
    pub fn error() -> Self {
        ResultSlot {
            ty: Ty::Error,
            role: SlotRole::Error,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.role == SlotRole::Error
    }
}

/// A conversion expression awaiting (or bound to) its operator.
///
/// Created unresolved by the parser. The type checker binds it with
/// [`ConversionExpr::bind`] once the operator for
/// `(operand type, target)` is known; from then on `result_slots` has
/// exactly one entry for a safe operator and two for an unsafe one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConversionExpr {
    /// The expression being converted.
    pub operand: ExprId,
    /// The requested target type.
    pub target: Ty,
    /// Location of the whole `<T> expr`.
    pub span: Span,
    /// The resolved operator, `None` until type checking binds it.
    pub operator: Option<ConversionOperator>,
    /// Result slots fixed at resolution time.
    pub result_slots: Vec<ResultSlot>,
}

impl ConversionExpr {
    /// Create an unresolved conversion of `operand` to `target`.
    pub fn new(operand: ExprId, target: Ty, span: Span) -> Self {
        ConversionExpr {
            operand,
            target,
            span,
            operator: None,
            result_slots: Vec::new(),
        }
    }

    /// Bind the resolved operator and fix the result slots.
    ///
    /// Rebinding replaces the previous operator and slots wholesale.
    pub fn bind(&mut self, operator: ConversionOperator) {
        debug_assert_eq!(operator.target, self.target);
        self.result_slots = operator.result_slots();
        self.operator = Some(operator);
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.operator.is_some()
    }

    /// Whether this expression yields more than one value.
    ///
    /// Unresolved conversions count as multi-return: until an operator is
    /// bound, the checker must reserve room for the error slot.
    pub fn is_multi_return(&self) -> bool {
        self.operator.as_ref().map_or(true, |op| !op.safe)
    }

    /// Types of the result slots, in order.
    pub fn types(&self) -> impl Iterator<Item = &Ty> {
        self.result_slots.iter().map(|slot| &slot.ty)
    }

    /// Render as `<T> expr#N` with names resolved through `interner`.
    pub fn display<'a, I: StringLookup + ?Sized>(
        &'a self,
        interner: &'a I,
    ) -> ConversionDisplay<'a, I> {
        ConversionDisplay {
            expr: self,
            interner,
        }
    }
}

/// Display adapter produced by [`ConversionExpr::display`].
pub struct ConversionDisplay<'a, I: ?Sized> {
    expr: &'a ConversionExpr,
    interner: &'a I,
}

impl<I: StringLookup + ?Sized> fmt::Display for ConversionDisplay<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}> {}",
            self.expr.target.display(self.interner),
            self.expr.operand
        )
    }
}

#[cfg(test)]
mod tests;

//! Execution of bound conversion expressions.
//!
//! A conversion expression that passed checking carries its operator and
//! result slots. The runtime looks up the operator's implementation by name
//! and always produces exactly one value per slot:
//!
//! - safe operator: `[value]`
//! - unsafe operator: `[value, nil]` on success, `[zero, error]` on failure

use std::fmt;

use rustc_hash::FxHashMap;
use tala_ir::{ConversionExpr, Name, Ty};

use crate::{ErrorValue, Value};

/// A host conversion routine.
///
/// The operand has already been checked against the operator's source type.
pub type ConversionFn = fn(&Value) -> Result<Value, ErrorValue>;

/// Why a conversion could not run at all.
///
/// These are dispatch failures, not conversion failures: an unsafe
/// conversion that fails at runtime still succeeds here and reports the
/// failure in its error slot.
#[derive(Clone, Debug, PartialEq)]
pub enum ConvertError {
    /// The expression was never bound to an operator.
    Unresolved,
    /// No routine is registered under the operator's implementation name.
    UnknownImplementation(Name),
    /// The operand's runtime type is not the operator's source type.
    OperandType { expected: Ty, found: Ty },
    /// A safe operator's routine failed.
    SafeConversionFailed(ErrorValue),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Unresolved => f.write_str("conversion expression is unresolved"),
            ConvertError::UnknownImplementation(name) => {
                write!(f, "no conversion routine registered as {name:?}")
            }
            ConvertError::OperandType { expected, found } => {
                write!(f, "operand is {found:?}, operator expects {expected:?}")
            }
            ConvertError::SafeConversionFailed(err) => {
                write!(f, "safe conversion failed: {err}")
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Conversion routines by implementation name.
#[derive(Clone, Default)]
pub struct ConversionRuntime {
    routines: FxHashMap<Name, ConversionFn>,
}

impl ConversionRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the routine behind `implementation`, replacing any earlier one.
    pub fn register(&mut self, implementation: Name, routine: ConversionFn) {
        self.routines.insert(implementation, routine);
    }

    pub fn contains(&self, implementation: Name) -> bool {
        self.routines.contains_key(&implementation)
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    /// Run `expr` on `operand`, producing one value per result slot.
    #[tracing::instrument(level = "trace", skip_all, fields(target = ?expr.target))]
    pub fn execute(&self, expr: &ConversionExpr, operand: &Value) -> Result<Vec<Value>, ConvertError> {
        let operator = expr.operator.as_ref().ok_or(ConvertError::Unresolved)?;
        let routine = self
            .routines
            .get(&operator.implementation)
            .ok_or(ConvertError::UnknownImplementation(operator.implementation))?;

        let found = operand.ty();
        if found != operator.source {
            return Err(ConvertError::OperandType {
                expected: operator.source.clone(),
                found,
            });
        }

        let values = match (routine(operand), operator.safe) {
            (Ok(value), true) => vec![value],
            (Err(err), true) => return Err(ConvertError::SafeConversionFailed(err)),
            (Ok(value), false) => vec![value, Value::Nil],
            (Err(err), false) => {
                tracing::trace!(error = %err, "conversion failed; error slot filled");
                vec![Value::zero(&operator.target), Value::Error(err.into())]
            }
        };
        debug_assert_eq!(values.len(), expr.result_slots.len());
        Ok(values)
    }
}

impl fmt::Debug for ConversionRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRuntime")
            .field("routines", &self.routines.len())
            .finish()
    }
}

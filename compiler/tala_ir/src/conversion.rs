//! Conversion operator records.

use crate::{ast::ResultSlot, Name, Ty};

/// A registered rule converting values of `source` to `target`.
///
/// `safe` is a static property of the operator: a safe conversion can never
/// fail, so its call sites produce one value; an unsafe conversion always
/// produces a value and an error slot, whether or not the error occurs at
/// run time.
///
/// `implementation` names the host routine that performs the conversion.
/// Two operators for the same pair are distinct when any field differs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConversionOperator {
    pub source: Ty,
    pub target: Ty,
    pub safe: bool,
    pub implementation: Name,
}

impl ConversionOperator {
    /// Create a conversion that can never fail.
    pub fn safe(source: Ty, target: Ty, implementation: Name) -> Self {
        ConversionOperator {
            source,
            target,
            safe: true,
            implementation,
        }
    }

    /// Create a conversion that may fail at run time.
    pub fn unsafe_(source: Ty, target: Ty, implementation: Name) -> Self {
        ConversionOperator {
            source,
            target,
            safe: false,
            implementation,
        }
    }

    /// Number of result slots a call site of this operator occupies.
    #[inline]
    pub fn arity(&self) -> usize {
        if self.safe {
            1
        } else {
            2
        }
    }

    /// The result slots a call site of this operator commits to.
    pub fn result_slots(&self) -> Vec<ResultSlot> {
        let value = ResultSlot::value(self.target.clone());
        if self.safe {
            vec![value]
        } else {
            vec![value, ResultSlot::error()]
        }
    }
}

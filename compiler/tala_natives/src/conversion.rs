//! Conversion operator table and resolution.
//!
//! Operators are keyed by their exact `(source, target)` pair. Resolution
//! succeeds only when exactly one operator is registered for the pair:
//! none is `NoSuchConversion`, several is `AmbiguousConversion`. The table
//! never picks one of several candidates.

use rustc_hash::FxHashMap;
use tala_diagnostic::ErrorCode;
use tala_ir::{ConversionOperator, Ty};

/// Why a conversion could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConversionError {
    /// No operator is registered for the pair.
    NoSuchConversion { source: Ty, target: Ty },
    /// More than one distinct operator is registered for the pair.
    AmbiguousConversion {
        source: Ty,
        target: Ty,
        candidates: usize,
    },
}

impl ConversionError {
    /// The diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConversionError::NoSuchConversion { .. } => ErrorCode::E2101,
            ConversionError::AmbiguousConversion { .. } => ErrorCode::E2102,
        }
    }

    /// The requested `(source, target)` pair.
    pub fn pair(&self) -> (&Ty, &Ty) {
        match self {
            ConversionError::NoSuchConversion { source, target }
            | ConversionError::AmbiguousConversion { source, target, .. } => (source, target),
        }
    }
}

/// Registered conversion operators.
#[derive(Clone, Debug, Default)]
pub struct ConversionTable {
    operators: FxHashMap<(Ty, Ty), Vec<ConversionOperator>>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operator.
    ///
    /// Registering an operator equal to one already present is a no-op and
    /// returns `false`. A distinct operator for an already-covered pair is
    /// kept alongside the first, which makes the pair ambiguous.
    #[tracing::instrument(level = "debug", skip_all, fields(
        source = ?operator.source,
        target = ?operator.target,
        safe = operator.safe,
    ))]
    pub fn register(&mut self, operator: ConversionOperator) -> bool {
        let candidates = self
            .operators
            .entry((operator.source.clone(), operator.target.clone()))
            .or_default();
        if candidates.contains(&operator) {
            return false;
        }
        candidates.push(operator);
        if candidates.len() > 1 {
            tracing::warn!(
                candidates = candidates.len(),
                "conversion pair now has several operators"
            );
        }
        true
    }

    /// Remove an operator. Returns `false` if it was not registered.
    pub fn unregister(&mut self, operator: &ConversionOperator) -> bool {
        let key = (operator.source.clone(), operator.target.clone());
        let Some(candidates) = self.operators.get_mut(&key) else {
            return false;
        };
        let before = candidates.len();
        candidates.retain(|op| op != operator);
        let removed = candidates.len() != before;
        if candidates.is_empty() {
            self.operators.remove(&key);
        }
        removed
    }

    /// Resolve the operator converting `source` to `target`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn resolve(&self, source: &Ty, target: &Ty) -> Result<&ConversionOperator, ConversionError> {
        match self.candidates(source, target) {
            [] => Err(ConversionError::NoSuchConversion {
                source: source.clone(),
                target: target.clone(),
            }),
            [operator] => Ok(operator),
            many => Err(ConversionError::AmbiguousConversion {
                source: source.clone(),
                target: target.clone(),
                candidates: many.len(),
            }),
        }
    }

    /// All operators registered for the exact pair.
    pub fn candidates(&self, source: &Ty, target: &Ty) -> &[ConversionOperator] {
        // Tuple keys can't be borrowed from two references; clone for the probe.
        self.operators
            .get(&(source.clone(), target.clone()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Targets reachable from `source` by exactly one operator, sorted.
    pub fn targets_from(&self, source: &Ty) -> Vec<&Ty> {
        let mut targets: Vec<&Ty> = self
            .operators
            .iter()
            .filter(|((s, _), ops)| s == source && ops.len() == 1)
            .map(|((_, t), _)| t)
            .collect();
        targets.sort();
        targets
    }

    /// Number of registered operators.
    pub fn len(&self) -> usize {
        self.operators.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

use tala_diagnostic::{Diagnostic, ErrorCode};
use tala_ir::{Span, StringLookup, Ty};
use tala_natives::SymbolName;

/// Why a native invocation was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// No implementation is bound to the symbol.
    UnknownNative,
    /// Wrong number of arguments, receiver included.
    ArityMismatch { expected: usize, found: usize },
    /// An argument does not conform to its declared type.
    ArgumentType { index: usize, expected: Ty, found: Ty },
    /// The implementation returned the wrong number of results.
    ResultCount { expected: usize, found: usize },
    /// A result does not conform to its declared return type.
    ResultType { index: usize, expected: Ty, found: Ty },
}

impl DispatchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DispatchError::UnknownNative
            | DispatchError::ArityMismatch { .. }
            | DispatchError::ArgumentType { .. } => ErrorCode::E6001,
            DispatchError::ResultCount { .. } | DispatchError::ResultType { .. } => {
                ErrorCode::E6002
            }
        }
    }

    /// Build a diagnostic for a failed call of `symbol` at `span`.
    pub fn diagnostic<I: StringLookup + ?Sized>(
        &self,
        symbol: &SymbolName,
        span: Span,
        interner: &I,
    ) -> Diagnostic {
        let callee = symbol.render(interner);
        let (message, label) = match self {
            DispatchError::UnknownNative => (
                format!("no host implementation bound to `{callee}`"),
                "native call".to_string(),
            ),
            DispatchError::ArityMismatch { expected, found } => (
                format!("`{callee}` received {found} argument(s), expected {expected}"),
                "wrong number of arguments".to_string(),
            ),
            DispatchError::ArgumentType {
                index,
                expected,
                found,
            } => (
                format!(
                    "argument {index} of `{callee}` is `{}`, expected `{}`",
                    found.display(interner),
                    expected.display(interner)
                ),
                "mistyped argument".to_string(),
            ),
            DispatchError::ResultCount { expected, found } => (
                format!("`{callee}` returned {found} value(s), declared {expected}"),
                "native result mismatch".to_string(),
            ),
            DispatchError::ResultType {
                index,
                expected,
                found,
            } => (
                format!(
                    "result {index} of `{callee}` is `{}`, declared `{}`",
                    found.display(interner),
                    expected.display(interner)
                ),
                "native result mismatch".to_string(),
            ),
        };
        Diagnostic::error(self.code())
            .with_message(message)
            .with_label(span, label)
    }
}

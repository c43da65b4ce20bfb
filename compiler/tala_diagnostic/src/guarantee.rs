//! Proof that an error was reported.

use std::fmt;

/// Zero-sized token proving at least one error diagnostic was recorded.
///
/// Only [`DiagnosticQueue`](crate::DiagnosticQueue) and
/// [`ErrorGuaranteed::from_error_count`] hand these out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// Produce a guarantee if `count` errors were recorded.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then_some(ErrorGuaranteed(()))
    }

    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}

//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! A checking pass pushes every diagnostic it produces and keeps going;
//! one failed conversion never stops the rest of the unit from being
//! checked. The queue hands back an [`ErrorGuaranteed`] for each error.

use crate::{Diagnostic, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop diagnostics identical to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 50,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Count of errors (not warnings/notes), including dropped ones.
    error_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a queue with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue with a custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            config,
        }
    }

    /// Queue a diagnostic.
    ///
    /// Returns a guarantee when the diagnostic is an error, even if the
    /// error limit or deduplication kept it out of the queue.
    pub fn push(&mut self, diagnostic: Diagnostic) -> Option<ErrorGuaranteed> {
        let is_error = diagnostic.is_error();
        if is_error {
            self.error_count += 1;
        }

        let over_limit = is_error
            && self.config.error_limit > 0
            && self.error_count > self.config.error_limit;
        let duplicate = self.config.deduplicate && self.diagnostics.contains(&diagnostic);
        if !over_limit && !duplicate {
            self.diagnostics.push(diagnostic);
        }

        is_error.then(ErrorGuaranteed::new)
    }

    /// Move every diagnostic from `other` into this queue.
    pub fn extend(&mut self, other: DiagnosticQueue) {
        let queued_errors = other.diagnostics.iter().filter(|d| d.is_error()).count();
        for diagnostic in other.diagnostics {
            let _ = self.push(diagnostic);
        }
        // Errors `other` dropped at its own limit still count.
        self.error_count += other.error_count.saturating_sub(queued_errors);
    }

    /// Number of errors pushed so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Check if any error has been pushed.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Proof that errors were reported, if any were.
    pub fn guarantee(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Queued diagnostics in push order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the queue, sorted by primary span position.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_key(|d| d.primary_span().map_or(0, |span| span.start));
        self.error_count = 0;
        out
    }
}

//! Diagnostics produced while binding and resolving natives.
//!
//! A diagnostic is built up from its code and severity, then decorated
//! with a message, spans, and notes:
//!
//! ```text
//! Diagnostic::error(ErrorCode::E2101)
//!     .with_message("no conversion from `json` to `xml`")
//!     .with_label(span, "cannot convert to `xml`")
//!     .with_note("`json` converts to `int`, `string`")
//! ```
//!
//! Rendering is plain text through `Display`; terminal styling belongs to
//! whoever embeds the compiler.

use std::fmt;

use tala_ir::Span;

use crate::ErrorCode;

/// How serious a diagnostic is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    /// Checking failed; the affected expression stays unresolved.
    Error,
    /// Checking succeeded but something looks wrong.
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a label marks the failure itself or supporting context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelRole {
    Primary,
    Context,
}

/// A source span annotated with a short message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub role: LabelRole,
    pub message: String,
}

impl Label {
    /// Label the location that failed.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            role: LabelRole::Primary,
            message: message.into(),
        }
    }

    /// Label a related location, such as where an operand was declared.
    pub fn context(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            role: LabelRole::Context,
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_primary(&self) -> bool {
        self.role == LabelRole::Primary
    }
}

/// A single reported problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "a diagnostic does nothing until it is queued or returned"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    /// Background facts, rendered as `= note:` lines.
    pub notes: Vec<String>,
    /// Concrete fixes, rendered as `= help:` lines.
    pub help: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic::with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Diagnostic::with_severity(code, Severity::Warning)
    }

    fn with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the primary label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a context label.
    pub fn with_context(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::context(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(|label| label.span)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let arrow = match label.role {
                LabelRole::Primary => "-->",
                LabelRole::Context => "...",
            };
            write!(f, "\n  {arrow} {}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for help in &self.help {
            write!(f, "\n  = help: {help}")?;
        }
        Ok(())
    }
}

/// `E2003`: a package or callable that is not registered.
///
/// `what` is the kind of thing looked up: `package`, `function`, `action`.
pub fn unresolved_symbol(span: Span, what: &str, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!("unresolved {what} `{name}`"))
        .with_label(span, "not registered in this session")
}

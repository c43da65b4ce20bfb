//! Diagnostic system for binding and resolution errors.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes and help lines (why, and how to fix)
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is type-level proof that at least one error was
//! recorded. A checking pass that fails on some expressions returns it
//! instead of a bare `bool`, so callers cannot forget that diagnostics
//! exist.

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{unresolved_symbol, Diagnostic, Label, LabelRole, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};

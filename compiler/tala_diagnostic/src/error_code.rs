//! Error codes for binding-layer diagnostics.
//!
//! Each code is a unique identifier (e.g., `E2101`) whose first digit
//! names the compiler phase.

use std::fmt;

/// Error codes emitted by registration, resolution, and native dispatch.
///
/// Format: E#### where first digit indicates phase:
/// - E2xxx: Type/resolution errors
/// - E6xxx: Runtime / native dispatch errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Unresolved symbol (package, function, or action not registered)
    E2003,
    /// Argument count mismatch
    E2004,
    /// No conversion operator for the requested type pair
    E2101,
    /// More than one conversion operator for the requested type pair
    E2102,

    // Dispatch Errors (E6xxx)
    /// Native callable failed to dispatch
    E6001,
    /// Native callable returned values not matching its declaration
    E6002,

    // Internal Errors (E9xxx)
    /// Internal binding-layer error
    E9001,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2101,
        ErrorCode::E2102,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E9001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2101 => "E2101",
            ErrorCode::E2102 => "E2102",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Short description used by `--explain` style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "type mismatch",
            ErrorCode::E2003 => "unresolved symbol",
            ErrorCode::E2004 => "argument count mismatch",
            ErrorCode::E2101 => "no such conversion",
            ErrorCode::E2102 => "ambiguous conversion",
            ErrorCode::E6001 => "native dispatch failed",
            ErrorCode::E6002 => "native result mismatch",
            ErrorCode::E9001 => "internal error",
        }
    }

    /// Check if this is a type/resolution error (E2xxx).
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2101
                | ErrorCode::E2102
        )
    }

    /// Check if this is a conversion resolution error.
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, ErrorCode::E2101 | ErrorCode::E2102)
    }

    /// Check if this is a native dispatch error (E6xxx).
    pub fn is_dispatch_error(&self) -> bool {
        matches!(self, ErrorCode::E6001 | ErrorCode::E6002)
    }

    /// Check if this is an internal error (E9xxx).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| format!("unknown error code: {s}"))
    }
}

//! Session configuration.
//!
//! Built directly for embedding and tests, or from the process
//! environment:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `TALA_NO_BUILTINS` | Skip builtin natives and conversions unless empty, `0` or `false` |
//! | `TALA_PROP_<NAME>` | Session property; `<NAME>` is lowercased with `_` read as `.` |
//!
//! `TALA_PROP_USER_HOME=/home/tala` sets property `user.home`.

use tala_diagnostic::DiagnosticConfig;
use tala_eval::Properties;

/// Disables builtin registration.
pub const NO_BUILTINS_VAR: &str = "TALA_NO_BUILTINS";

/// Prefix of variables that become session properties.
pub const PROPERTY_PREFIX: &str = "TALA_PROP_";

/// Configuration fixed at session creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Register the builtin natives and conversions during bootstrap.
    pub load_builtins: bool,
    /// Properties readable through `runtime:getProperty`.
    pub properties: Properties,
    /// Limits for diagnostics collected by checking passes.
    pub diagnostics: DiagnosticConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            load_builtins: true,
            properties: Properties::new(),
            diagnostics: DiagnosticConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Read configuration from `(name, value)` pairs shaped like
    /// environment variables. Unrelated variables are ignored.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = SessionConfig::default();
        for (key, value) in vars {
            let key = key.as_ref();
            if key == NO_BUILTINS_VAR {
                let value = value.into();
                config.load_builtins = matches!(value.as_str(), "" | "0" | "false");
            } else if let Some(name) = key.strip_prefix(PROPERTY_PREFIX) {
                if !name.is_empty() {
                    config.properties.insert(property_name(name), value.into());
                }
            }
        }
        config
    }

    /// Set a property, replacing any earlier value.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Skip builtin registration.
    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.load_builtins = false;
        self
    }
}

fn property_name(var: &str) -> String {
    var.chars()
        .map(|c| if c == '_' { '.' } else { c.to_ascii_lowercase() })
        .collect()
}

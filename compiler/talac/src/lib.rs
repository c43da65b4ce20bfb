//! Talac - compilation sessions for the Tala native binding layer.
//!
//! A [`Session`] owns the interner, the package table, the conversion
//! table, and the host implementations behind them. Hosts register their
//! natives into a session; the type checker resolves call sites and
//! conversion expressions against it; the evaluator invokes through it.
//!
//! ```text
//! SessionConfig ──▶ Session::new ──bootstrap──▶ builtins registered
//!                        │
//!          register_native / register_package / register_conversion
//!                        │
//!          resolve_call / check_conversions   (read guards, parallel)
//!                        │
//!                  invoke / convert           (host code)
//! ```

mod config;
mod session;

use std::sync::Once;

pub use config::{SessionConfig, NO_BUILTINS_VAR, PROPERTY_PREFIX};
pub use session::{ConversionSite, Session};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=tala_natives=debug` or `RUST_LOG=talac=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}

//! Calculators behind the finflow personal-finance dashboard: the allocation
//! ledger, the compounding simulator and expense summaries, plus a small JSON
//! API over them.

pub mod api;
pub mod core;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the default
/// `finflow=info` filter.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("finflow=info"));
        fmt().with_env_filter(filter).init();
    });
}

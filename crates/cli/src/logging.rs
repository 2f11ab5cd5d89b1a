//! Logging: tracing setup. Everything goes to stderr so stdout stays
//! reserved for the rendered summary.

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::CliConfig;

const FALLBACK_FILTER: &str = "warn";

/// Thread-local subscriber used while configuration is still loading.
pub fn init_basic() -> DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| FALLBACK_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Install the global subscriber. `RUST_LOG` wins over `config.log_level`.
pub fn init(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| FALLBACK_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

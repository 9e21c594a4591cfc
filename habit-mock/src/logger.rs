//! Logging Infrastructure

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "habit_mock=info,tower_http=info";

/// Initialize the logger; `RUST_LOG` overrides the default filter
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with_target(false)
        .init();
}

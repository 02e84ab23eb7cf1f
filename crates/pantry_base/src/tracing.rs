use crate::error::PantryResult;
pub use tracing::instrument;
pub use tracing::{debug, error, info, trace, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when neither `RUST_LOG` nor the config file sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/* 📖 # Why log to stderr?

Stdout carries the interactive menu and all user feedback.
Diagnostics go to stderr so they never interleave with prompts a user (or a test) reads.
*/

/// Builds the filter from `RUST_LOG` if set, otherwise from `fallback`.
pub fn build_filter(fallback: Option<&str>) -> PantryResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = fallback.unwrap_or(DEFAULT_LOG_FILTER);
    EnvFilter::try_new(directives)
        .map_err(|e| crate::err!("Invalid log filter '{}': {}", directives, e))
}

pub fn init_tracing(fallback_filter: Option<&str>) -> PantryResult<()> {
    let filter = build_filter(fallback_filter)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| crate::err!("Failed to install tracing subscriber: {}", e))
}

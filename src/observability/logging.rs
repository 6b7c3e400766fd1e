//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Respect RUST_LOG, falling back to the configured default filter

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `default_filter` is used when RUST_LOG is not set, e.g.
/// `"card_client=info"`. Calling this twice is a caller error; the second
/// call panics inside tracing-subscriber.
pub fn init_logging(default_filter: &str) {
    let fallback = default_filter.to_string();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Logging and tracing initialization.
//!
//! Call one of these once, before building the [`App`](crate::App). The
//! log level is controlled by `RUST_LOG` (default `info`):
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! RUST_LOG=portico=debug,tower_http=debug,sqlx=warn cargo run
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize formatted logging to stdout.
///
/// # Panics
///
/// Panics if a global subscriber is already installed. Only call once at
/// application startup.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize JSON-formatted logging, for log aggregation in production.
///
/// # Panics
///
/// Panics if a global subscriber is already installed. Only call once at
/// application startup.
pub fn init_logging_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

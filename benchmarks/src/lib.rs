//! LISTEN/NOTIFY benchmark harness for Postgres.
//!
//! Measures notify/wait round trips between two connections, sequentially and concurrently,
//! against plain-insert and trigger-fired-notification baselines.

pub mod config;
pub mod error;
pub mod instrumentation;
pub mod listener;
pub mod notifier;
pub mod runner;
pub mod scenarios;
pub mod session;

pub use config::{ConnConfig, ScenarioConfig, ScenarioConfigBuilder};
pub use error::{BenchError, Result};
pub use instrumentation::Report;
pub use listener::Listener;
pub use notifier::Notifier;
pub use runner::Runner;
pub use scenarios::Scenario;
pub use session::{CommandTag, Notification, Session};

/// Initializes `tracing` at `LOG_LEVEL` (default INFO).
pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok().and_then(|level| level.parse().ok()).unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

//! Common utilities for LISTEN/NOTIFY integration tests
#![allow(dead_code)]

use anyhow::Result;
use notify_bench::{ConnConfig, ScenarioConfig};
use std::str::FromStr;
use std::time::Duration;
use testcontainers::Container;
use testcontainers_modules::{postgres, testcontainers::runners::SyncRunner};
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        tracing_subscriber::fmt().with_max_level(Level::from_str(&level).unwrap()).with_test_writer().init();
    } else {
        tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init();
    }
}

/// Starts a throwaway Postgres and returns settings pointing at it. Keep the container alive for the test.
pub fn create_postgres_container() -> Result<(Container<postgres::Postgres>, ConnConfig)> {
    let container = postgres::Postgres::default().with_db_name("bench").with_user("postgres").with_password("postgres").start()?;

    let host = container.get_host()?;
    let port = container.get_host_port_ipv4(5432)?;
    let config = ConnConfig {
        host: host.to_string(),
        port,
        user: "postgres".to_string(),
        password: Some("postgres".to_string()),
        database: "bench".to_string(),
    };

    Ok((container, config))
}

/// Scenario settings with a wait long enough for a loaded container.
pub fn scenario_config(conn: ConnConfig) -> ScenarioConfig { ScenarioConfig::builder(conn).wait_timeout(Duration::from_secs(2)).build() }

/// Opens a plain client for assertions that go around the harness.
pub fn raw_client(config: &ConnConfig) -> Result<::postgres::Client> { Ok(config.to_pg_config().connect(::postgres::NoTls)?) }

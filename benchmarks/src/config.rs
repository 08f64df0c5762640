//! Connection settings read from the environment, and scenario parameters.

use crate::error::{BenchError, Result};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;

/// Connection settings for both sides of a benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// `None` when `PG_PASSWORD` is unset or empty
    pub password: Option<String>,
    pub database: String,
}

impl ConnConfig {
    /// Reads `PG_HOST`, `PG_PORT`, `PG_USER`, `PG_PASSWORD` and `PG_DATABASE` from the process environment.
    pub fn from_env() -> Result<Self> { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Resolves the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let host = get("PG_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PG_PORT") {
            Some(port) => port.parse().map_err(|_| BenchError::Config(format!("PG_PORT {port:?} is not a valid port")))?,
            None => DEFAULT_PORT,
        };
        let user = get("PG_USER").or_else(|| get("USER")).or_else(|| get("USERNAME")).unwrap_or_else(|| "postgres".to_string());
        let password = get("PG_PASSWORD");
        let database = get("PG_DATABASE").unwrap_or_else(|| user.clone());

        Ok(Self { host, port, user, password, database })
    }

    pub fn to_pg_config(&self) -> postgres::Config {
        let mut config = postgres::Config::new();
        config.host(&self.host).port(self.port).user(&self.user).dbname(&self.database);
        if let Some(password) = &self.password {
            config.password(password);
        }
        config
    }
}

/// Parameters shared by every scenario.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Connection settings for the notifying and listening sessions
    pub conn: ConnConfig,

    /// Channel the listener subscribes to and the notifier sends on
    pub channel: String,

    /// How long the listener blocks for each notification before failing the run
    pub wait_timeout: Duration,

    /// Rows inserted per statement in the multi-insert scenario
    pub batch_size: u32,
}

impl ScenarioConfig {
    pub fn builder(conn: ConnConfig) -> ScenarioConfigBuilder {
        ScenarioConfigBuilder { conn, channel: "bench".to_string(), wait_timeout: Duration::from_secs(1), batch_size: 10 }
    }
}

/// Builder for ScenarioConfig with the harness defaults.
pub struct ScenarioConfigBuilder {
    conn: ConnConfig,
    channel: String,
    wait_timeout: Duration,
    batch_size: u32,
}

impl ScenarioConfigBuilder {
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn batch_size(mut self, size: u32) -> Self {
        self.batch_size = size.max(1);
        self
    }

    pub fn build(self) -> ScenarioConfig {
        ScenarioConfig { conn: self.conn, channel: self.channel, wait_timeout: self.wait_timeout, batch_size: self.batch_size }
    }
}

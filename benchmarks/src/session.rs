//! A single database connection with named prepared statements.
//!
//! `postgres::Client` hands back anonymous `Statement` handles; benchmarks refer to
//! statements by name, so the session keeps its own name table. `exec` accepts either a
//! prepared statement's name or plain SQL text.

use crate::config::ConnConfig;
use crate::error::{BenchError, Result};
use postgres::fallible_iterator::FallibleIterator;
use postgres::types::ToSql;
use postgres::{Client, NoTls, Statement};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// An asynchronous notification delivered to a listening session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Backend process id of the notifying session
    pub process_id: i32,
    pub channel: String,
    pub payload: String,
}

impl From<postgres::Notification> for Notification {
    fn from(n: postgres::Notification) -> Self {
        Self { process_id: n.process_id(), channel: n.channel().to_string(), payload: n.payload().to_string() }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notification {{ pid: {}, channel: {:?}, payload: {:?} }}", self.process_id, self.channel, self.payload)
    }
}

/// Result descriptor of an executed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTag {
    pub rows_affected: u64,
}

pub struct Session {
    client: Client,
    statements: HashMap<String, Statement>,
}

impl Session {
    pub fn connect(config: &ConnConfig) -> Result<Self> {
        debug!("connecting to {}:{}/{} as {}", config.host, config.port, config.database, config.user);
        let client = config.to_pg_config().connect(NoTls).map_err(BenchError::Connect)?;
        Ok(Self { client, statements: HashMap::new() })
    }

    /// Prepares `sql` and registers it under `name`, replacing any statement of the same name.
    pub fn prepare(&mut self, name: &str, sql: &str) -> Result<()> {
        debug!("Session.prepare({name}): {sql}");
        let statement = self.client.prepare(sql).map_err(|source| BenchError::Prepare { name: name.to_string(), source })?;
        self.statements.insert(name.to_string(), statement);
        Ok(())
    }

    /// Executes the statement prepared as `statement`, or `statement` itself as SQL when no such name exists.
    pub fn exec(&mut self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<CommandTag> {
        let result = match self.statements.get(statement) {
            Some(prepared) => self.client.execute(prepared, params),
            None => self.client.execute(statement, params),
        };

        let rows_affected = result.map_err(|source| BenchError::Exec { statement: statement.to_string(), source })?;
        Ok(CommandTag { rows_affected })
    }

    /// Runs a parameterless, possibly multi-statement script.
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.client.batch_execute(sql).map_err(|source| BenchError::Exec { statement: sql.trim().to_string(), source })
    }

    pub fn listen(&mut self, channel: &str) -> Result<()> {
        debug!("Session.listen({channel})");
        self.client
            .batch_execute(&format!("LISTEN {}", quote_identifier(channel)))
            .map_err(|source| BenchError::Listen { channel: channel.to_string(), source })
    }

    /// Blocks until the next notification arrives, failing with `Timeout` after `timeout`.
    pub fn wait_for_notification(&mut self, timeout: Duration) -> Result<Notification> {
        let mut notifications = self.client.notifications();
        match notifications.timeout_iter(timeout).next() {
            Ok(Some(notification)) => Ok(notification.into()),
            Ok(None) => Err(BenchError::Timeout { timeout }),
            Err(err) => Err(BenchError::Wait(err)),
        }
    }
}

/// Quotes `name` as a SQL identifier so any channel name survives `LISTEN`.
pub fn quote_identifier(name: &str) -> String { format!("\"{}\"", name.replace('"', "\"\"")) }

/// Quotes `value` as a SQL string literal.
pub fn quote_literal(value: &str) -> String { format!("'{}'", value.replace('\'', "''")) }

//! Error type shared by every benchmark scenario.
//!
//! Every variant is fatal for the run that produced it; nothing here is retried.

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    /// An environment variable could not be interpreted
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("connect failed")]
    Connect(#[source] postgres::Error),

    #[error("prepare {name:?} failed")]
    Prepare {
        name: String,
        #[source]
        source: postgres::Error,
    },

    /// Holds the statement name, or the SQL text when no statement of that name was prepared
    #[error("exec {statement:?} failed")]
    Exec {
        statement: String,
        #[source]
        source: postgres::Error,
    },

    #[error("listen on {channel:?} failed")]
    Listen {
        channel: String,
        #[source]
        source: postgres::Error,
    },

    #[error("wait for notification failed")]
    Wait(#[source] postgres::Error),

    #[error("no notification received within {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("notification on channel {actual:?}, expected {expected:?}")]
    UnexpectedChannel { expected: String, actual: String },

    #[error("notification payload {payload:?} is not an integer")]
    InvalidPayload { payload: String },

    #[error("notification payload {actual}, expected {expected}")]
    PayloadMismatch { expected: i64, actual: i64 },

    #[error("listener thread panicked")]
    ListenerPanicked,
}

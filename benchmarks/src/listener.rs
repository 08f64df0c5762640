//! Receiving side: a session subscribed to one channel, validating each notification.

use crate::error::{BenchError, Result};
use crate::session::{Notification, Session};
use std::time::Duration;

pub struct Listener {
    session: Session,
    channel: String,
    timeout: Duration,
}

impl Listener {
    /// Subscribes `session` to `channel`. Each later wait blocks for at most `timeout`.
    pub fn new(mut session: Session, channel: impl Into<String>, timeout: Duration) -> Result<Self> {
        let channel = channel.into();
        session.listen(&channel)?;
        Ok(Self { session, channel, timeout })
    }

    pub fn channel(&self) -> &str { &self.channel }

    pub fn set_timeout(&mut self, timeout: Duration) { self.timeout = timeout; }

    /// Waits for the next notification and checks it carries `expected`.
    pub fn expect(&mut self, expected: u64) -> Result<Notification> {
        let notification = self.session.wait_for_notification(self.timeout)?;
        validate(&notification, &self.channel, Some(expected))?;
        Ok(notification)
    }

    /// Waits for payloads `0..count`, in order.
    pub fn expect_sequence(&mut self, count: u64) -> Result<()> {
        for i in 0..count {
            self.expect(i)?;
        }
        Ok(())
    }

    /// Waits for `count` notifications on the channel whose payloads are integers, whatever their value.
    pub fn expect_count(&mut self, count: u64) -> Result<()> {
        for _ in 0..count {
            let notification = self.session.wait_for_notification(self.timeout)?;
            validate(&notification, &self.channel, None)?;
        }
        Ok(())
    }
}

/// Checks the channel and that the payload parses as an integer, equal to `expected` when given.
pub fn validate(notification: &Notification, channel: &str, expected: Option<u64>) -> Result<i64> {
    if notification.channel != channel {
        return Err(BenchError::UnexpectedChannel { expected: channel.to_string(), actual: notification.channel.clone() });
    }

    let actual: i64 = notification.payload.parse().map_err(|_| BenchError::InvalidPayload { payload: notification.payload.clone() })?;

    if let Some(expected) = expected {
        if i64::try_from(expected).ok() != Some(actual) {
            return Err(BenchError::PayloadMismatch { expected: expected as i64, actual });
        }
    }

    Ok(actual)
}

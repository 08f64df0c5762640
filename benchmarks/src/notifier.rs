//! Sending side: a session with the `pg_notify` statement prepared.

use crate::error::Result;
use crate::session::{CommandTag, Session};

pub const NOTIFY_STATEMENT: &str = "notify";
pub const NOTIFY_SQL: &str = "select pg_notify($1, $2)";

pub struct Notifier {
    session: Session,
}

impl Notifier {
    pub fn new(mut session: Session) -> Result<Self> {
        session.prepare(NOTIFY_STATEMENT, NOTIFY_SQL)?;
        Ok(Self { session })
    }

    /// Sends one notification whose payload is `counter` in decimal.
    pub fn notify(&mut self, channel: &str, counter: u64) -> Result<CommandTag> {
        let payload = counter.to_string();
        self.session.exec(NOTIFY_STATEMENT, &[&channel, &payload])
    }

    /// Sends payloads `0..count` in order.
    pub fn run(&mut self, channel: &str, count: u64) -> Result<()> {
        for i in 0..count {
            self.notify(channel, i)?;
        }
        Ok(())
    }
}

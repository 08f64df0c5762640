//! Benchmark scenarios. Each one is built by an untimed `setup` and then driven by `run`,
//! which is the only part a benchmark should time.

use crate::config::ScenarioConfig;
use crate::error::{BenchError, Result};
use crate::listener::Listener;
use crate::notifier::Notifier;
use crate::session::{Session, quote_literal};
use std::thread;
use tracing::{info, warn};

pub const INSERT_STATEMENT: &str = "insertBench";
pub const INSERT_NOTIFY_STATEMENT: &str = "insertNotifyBench";
pub const INSERT_MULTIPLE_NOTIFY_STATEMENT: &str = "insertMultipleNotifyBench";

pub trait Scenario: Sized {
    /// Benchmark name, also used as the report phase name.
    const NAME: &'static str;

    /// Opens connections, creates schema objects and prepares statements.
    fn setup(config: &ScenarioConfig) -> Result<Self>;

    /// Drives `iterations` rounds; the first failure aborts the run.
    fn run(&mut self, iterations: u64) -> Result<()>;

    /// Number of notifications or rows handled by `iterations` rounds.
    fn operations(&self, iterations: u64) -> u64 { iterations }
}

/// One thread alternates notify and wait, so there is never more than one notification in flight.
pub struct SequentialListenNotify {
    notifier: Notifier,
    listener: Listener,
}

impl Scenario for SequentialListenNotify {
    const NAME: &'static str = "sequential_listen_notify";

    fn setup(config: &ScenarioConfig) -> Result<Self> {
        info!("{}: setup on channel {:?}", Self::NAME, config.channel);
        let notifier = Notifier::new(Session::connect(&config.conn)?)?;
        let listener = Listener::new(Session::connect(&config.conn)?, config.channel.clone(), config.wait_timeout)?;
        Ok(Self { notifier, listener })
    }

    fn run(&mut self, iterations: u64) -> Result<()> {
        for i in 0..iterations {
            self.notifier.notify(self.listener.channel(), i)?;
            self.listener.expect(i)?;
        }
        Ok(())
    }
}

/// A listener thread waits for `0..N` while the calling thread sends them.
pub struct ParallelListenNotify {
    notifier: Notifier,
    listener: Listener,
}

impl Scenario for ParallelListenNotify {
    const NAME: &'static str = "parallel_listen_notify";

    fn setup(config: &ScenarioConfig) -> Result<Self> {
        info!("{}: setup on channel {:?}", Self::NAME, config.channel);
        let notifier = Notifier::new(Session::connect(&config.conn)?)?;
        let listener = Listener::new(Session::connect(&config.conn)?, config.channel.clone(), config.wait_timeout)?;
        Ok(Self { notifier, listener })
    }

    fn run(&mut self, iterations: u64) -> Result<()> {
        let channel = self.listener.channel().to_string();
        let Self { notifier, listener } = self;
        with_listener(listener, |listener| listener.expect_sequence(iterations), || notifier.run(&channel, iterations))
    }
}

/// Baseline: single-row inserts into a table without a trigger.
pub struct SingleInsertWithoutNotify {
    session: Session,
    next_id: i32,
}

impl Scenario for SingleInsertWithoutNotify {
    const NAME: &'static str = "single_insert_without_notify";

    fn setup(config: &ScenarioConfig) -> Result<Self> {
        info!("{}: setup", Self::NAME);
        let mut session = Session::connect(&config.conn)?;
        session.execute_batch("drop table if exists notify_bench; create table notify_bench(id serial primary key)")?;
        session.prepare(INSERT_STATEMENT, "insert into notify_bench(id) values($1)")?;
        Ok(Self { session, next_id: 0 })
    }

    fn run(&mut self, iterations: u64) -> Result<()> {
        for _ in 0..iterations {
            self.session.exec(INSERT_STATEMENT, &[&self.next_id])?;
            self.next_id += 1;
        }
        Ok(())
    }
}

/// Single-row inserts whose AFTER INSERT trigger sends one notification per row.
pub struct SingleInsertWithTriggeredNotify {
    inserter: Session,
    listener: Listener,
}

impl Scenario for SingleInsertWithTriggeredNotify {
    const NAME: &'static str = "single_insert_with_triggered_notify";

    fn setup(config: &ScenarioConfig) -> Result<Self> {
        info!("{}: setup on channel {:?}", Self::NAME, config.channel);
        let mut inserter = Session::connect(&config.conn)?;
        create_notifying_table(&mut inserter, &config.channel)?;
        inserter.prepare(INSERT_NOTIFY_STATEMENT, "insert into notify_bench(n) values($1)")?;

        let listener = Listener::new(Session::connect(&config.conn)?, config.channel.clone(), config.wait_timeout)?;
        Ok(Self { inserter, listener })
    }

    fn run(&mut self, iterations: u64) -> Result<()> {
        let Self { inserter, listener } = self;
        with_listener(
            listener,
            |listener| listener.expect_count(iterations),
            || {
                for i in 0..iterations {
                    inserter.exec(INSERT_NOTIFY_STATEMENT, &[&(i as i32)])?;
                }
                Ok(())
            },
        )
    }
}

/// Each statement inserts `batch_size` rows through `generate_series`, firing one notification per row.
pub struct MultipleInsertWithNotify {
    inserter: Session,
    listener: Listener,
    batch_size: u32,
}

impl Scenario for MultipleInsertWithNotify {
    const NAME: &'static str = "multiple_insert_with_notify";

    fn setup(config: &ScenarioConfig) -> Result<Self> {
        info!("{}: setup on channel {:?}, {} rows per insert", Self::NAME, config.channel, config.batch_size);
        let mut inserter = Session::connect(&config.conn)?;
        create_notifying_table(&mut inserter, &config.channel)?;
        inserter.prepare(INSERT_MULTIPLE_NOTIFY_STATEMENT, "insert into notify_bench(n) select generate_series(1,$1)")?;

        let listener = Listener::new(Session::connect(&config.conn)?, config.channel.clone(), config.wait_timeout)?;
        Ok(Self { inserter, listener, batch_size: config.batch_size })
    }

    fn run(&mut self, iterations: u64) -> Result<()> {
        let expected = self.operations(iterations);
        let rows = self.batch_size as i32;
        let Self { inserter, listener, .. } = self;
        with_listener(
            listener,
            |listener| listener.expect_count(expected),
            || {
                for _ in 0..iterations {
                    inserter.exec(INSERT_MULTIPLE_NOTIFY_STATEMENT, &[&rows])?;
                }
                Ok(())
            },
        )
    }

    fn operations(&self, iterations: u64) -> u64 { iterations * u64::from(self.batch_size) }
}

/// Recreates `notify_bench` with a trigger that sends each inserted `n` on `channel`.
pub fn create_notifying_table(session: &mut Session, channel: &str) -> Result<()> {
    session.execute_batch("drop table if exists notify_bench; create table notify_bench(id serial primary key, n integer)")?;
    session.execute_batch(&format!(
        r#"
CREATE OR REPLACE FUNCTION insert_notifier() RETURNS trigger
    LANGUAGE plpgsql
    AS $$
  begin
    perform pg_notify({}, new.n::text);
    return new;
  end;
$$;
"#,
        quote_literal(channel)
    ))?;
    session.execute_batch("CREATE TRIGGER insert_notifier AFTER INSERT ON notify_bench FOR EACH ROW EXECUTE PROCEDURE insert_notifier()")
}

/// Runs `listen` on a scoped thread while `produce` runs on the caller's. Joining the listener is the
/// completion signal. A producer error is returned ahead of the listener's.
fn with_listener<L, P>(listener: &mut Listener, listen: L, produce: P) -> Result<()>
where
    L: FnOnce(&mut Listener) -> Result<()> + Send,
    P: FnOnce() -> Result<()>,
{
    thread::scope(|scope| {
        let handle = scope.spawn(move || listen(listener));
        let produced = produce();
        let listened = handle.join().map_err(|_| BenchError::ListenerPanicked)?;
        if let Err(err) = &listened {
            warn!("listener failed: {err}");
        }
        produced.and(listened)
    })
}

use anyhow::Result;
use notify_bench::notifier::{NOTIFY_SQL, NOTIFY_STATEMENT};
use notify_bench::{ConnConfig, Session};
use std::time::Duration;

const CHANNEL: &str = "bench";

/// Sends one notification and prints it once the listening connection receives it.
fn main() -> Result<()> {
    // initialize tracing
    notify_bench::init_tracing();

    let config = ConnConfig::from_env()?;

    let mut notifier = Session::connect(&config)?;
    let mut listener = Session::connect(&config)?;

    listener.listen(CHANNEL)?;
    notifier.prepare(NOTIFY_STATEMENT, NOTIFY_SQL)?;
    notifier.exec(NOTIFY_STATEMENT, &[&CHANNEL, &"hello"])?;

    let notification = listener.wait_for_notification(Duration::from_secs(1))?;
    println!("{notification}");

    Ok(())
}

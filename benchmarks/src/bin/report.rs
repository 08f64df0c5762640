use anyhow::{Context, Result};
use notify_bench::{ConnConfig, Runner, ScenarioConfig};

/// Runs every scenario once for `NOTIFY_BENCH_ITERATIONS` rounds and prints the report,
/// as JSON when `NOTIFY_BENCH_JSON=1`.
fn main() -> Result<()> {
    notify_bench::init_tracing();

    let iterations = match std::env::var("NOTIFY_BENCH_ITERATIONS") {
        Ok(value) => value.parse::<u64>().with_context(|| format!("NOTIFY_BENCH_ITERATIONS {value:?} is not a number"))?,
        Err(_) => 1000,
    };

    let config = ScenarioConfig::builder(ConnConfig::from_env()?).build();
    let report = Runner::new(config).run_all(iterations)?;

    if std::env::var("NOTIFY_BENCH_JSON").is_ok_and(|value| value == "1") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_summary();
    }

    Ok(())
}

//! Runs every scenario once and collects the timings into a report.

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::instrumentation::{PhaseTimer, Report, ReportMetadata};
use crate::scenarios::{
    MultipleInsertWithNotify, ParallelListenNotify, Scenario, SequentialListenNotify, SingleInsertWithTriggeredNotify,
    SingleInsertWithoutNotify,
};
use tracing::info;

/// Orchestrates scenario execution.
pub struct Runner {
    config: ScenarioConfig,
}

impl Runner {
    pub fn new(config: ScenarioConfig) -> Self { Self { config } }

    /// Runs each scenario for `iterations` rounds. The first failing scenario aborts the whole run.
    pub fn run_all(&self, iterations: u64) -> Result<Report> {
        let conn = &self.config.conn;
        let mut report = Report::new(ReportMetadata::now(conn.host.as_str(), conn.database.as_str(), self.config.channel.as_str()));

        self.measure::<SequentialListenNotify>(&mut report, iterations)?;
        self.measure::<ParallelListenNotify>(&mut report, iterations)?;
        self.measure::<SingleInsertWithoutNotify>(&mut report, iterations)?;
        self.measure::<SingleInsertWithTriggeredNotify>(&mut report, iterations)?;
        self.measure::<MultipleInsertWithNotify>(&mut report, iterations)?;

        Ok(report)
    }

    /// Sets up `S` untimed, then times `iterations` rounds of it.
    pub fn measure<S: Scenario>(&self, report: &mut Report, iterations: u64) -> Result<()> {
        let mut scenario = S::setup(&self.config)?;

        let timer = PhaseTimer::start();
        scenario.run(iterations)?;
        let elapsed = timer.elapsed();

        info!("{}: {} iterations in {:?}", S::NAME, iterations, elapsed);
        report.add_phase(S::NAME, iterations, elapsed, scenario.operations(iterations));
        Ok(())
    }
}

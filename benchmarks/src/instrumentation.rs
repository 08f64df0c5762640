//! Instrumentation and reporting for benchmark runs.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Captures timing and metadata for a run of every scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// One entry per scenario, in execution order
    pub phases: Vec<PhaseReport>,
    /// Sum of the timed sections; setup is excluded
    pub total_duration: Duration,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseReport {
    pub name: String,
    pub iterations: u64,
    pub duration: Duration,
    pub operations: u64,
    pub ops_per_sec: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub host: String,
    pub database: String,
    pub channel: String,
    pub timestamp: String,
}

impl ReportMetadata {
    /// Stamps the metadata with the current UTC time in RFC 3339.
    pub fn now(host: impl Into<String>, database: impl Into<String>, channel: impl Into<String>) -> Self {
        let timestamp = time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_default();
        Self { host: host.into(), database: database.into(), channel: channel.into(), timestamp }
    }
}

impl Report {
    pub fn new(metadata: ReportMetadata) -> Self { Self { phases: Vec::new(), total_duration: Duration::ZERO, metadata } }

    pub fn add_phase(&mut self, name: impl Into<String>, iterations: u64, duration: Duration, operations: u64) {
        let ops_per_sec = if duration.as_secs_f64() > 0.0 { operations as f64 / duration.as_secs_f64() } else { 0.0 };
        self.phases.push(PhaseReport { name: name.into(), iterations, duration, operations, ops_per_sec });
        self.total_duration += duration;
    }

    /// Prints a concise table summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== LISTEN/NOTIFY Benchmark Report ===");
        println!("Server: {}/{}", self.metadata.host, self.metadata.database);
        println!("Channel: {}", self.metadata.channel);
        println!("Timestamp: {}", self.metadata.timestamp);
        println!("\nScenario Results:");
        println!("{:<38} {:>10} {:>12} {:>12} {:>15}", "Scenario", "Iters", "Duration", "Operations", "Ops/sec");
        println!("{}", "-".repeat(91));
        for phase in &self.phases {
            println!(
                "{:<38} {:>10} {:>11.3}s {:>12} {:>15.2}",
                phase.name,
                phase.iterations,
                phase.duration.as_secs_f64(),
                phase.operations,
                phase.ops_per_sec
            );
        }
        println!("{}", "-".repeat(91));
        println!("{:<38} {:>10} {:>11.3}s", "Total", "", self.total_duration.as_secs_f64());
        println!();
    }
}

/// Timer for measuring phase durations.
pub struct PhaseTimer {
    start: Instant,
}

impl PhaseTimer {
    pub fn start() -> Self { Self { start: Instant::now() } }

    pub fn elapsed(&self) -> Duration { self.start.elapsed() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            host: "localhost".to_string(),
            database: "bench".to_string(),
            channel: "bench".to_string(),
            timestamp: "2024-12-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_report_phase_tracking() {
        let mut report = Report::new(metadata());
        report.add_phase("sequential_listen_notify", 100, Duration::from_secs(2), 100);
        report.add_phase("multiple_insert_with_notify", 5, Duration::from_secs(1), 50);

        assert_eq!(report.phases.len(), 2);
        assert_eq!(report.phases[0].name, "sequential_listen_notify");
        assert_eq!(report.phases[0].ops_per_sec, 50.0);
        assert_eq!(report.phases[1].operations, 50);
        assert_eq!(report.total_duration, Duration::from_secs(3));
    }

    #[test]
    fn test_zero_duration_phase() {
        let mut report = Report::new(metadata());
        report.add_phase("empty", 0, Duration::ZERO, 0);
        assert_eq!(report.phases[0].ops_per_sec, 0.0);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut report = Report::new(metadata());
        report.add_phase("parallel_listen_notify", 10, Duration::from_millis(500), 10);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["phases"][0]["name"], "parallel_listen_notify");
        assert_eq!(json["phases"][0]["ops_per_sec"], 20.0);
        assert_eq!(json["metadata"]["channel"], "bench");
    }

    #[test]
    fn test_metadata_timestamp_is_rfc3339() {
        let metadata = ReportMetadata::now("localhost", "bench", "bench");
        assert!(time::OffsetDateTime::parse(&metadata.timestamp, &time::format_description::well_known::Rfc3339).is_ok());
    }

    #[test]
    fn test_phase_timer() {
        let timer = PhaseTimer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed();
        assert!(elapsed >= Duration::from_millis(10));
    }
}

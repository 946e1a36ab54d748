use std::fmt;

use crate::run::RunReport;

/// `true` when more than `max_anomalies` anomalies exist. A scan cut short by
/// the index capacity at or above the limit means at least `max + 1` exist.
/// No limit never fails.
pub fn anomalies_exceeded(report: &RunReport, max_anomalies: Option<u64>) -> bool {
    match max_anomalies {
        Some(max) => {
            let found = report.anomalies.count() as u64;
            found > max || (report.anomalies.is_truncated() && found >= max)
        }
        None => false,
    }
}

/// Text rendering of a [`RunReport`] against an optional anomaly limit.
pub struct ReportView<'a> {
    pub report: &'a RunReport,
    pub max_anomalies: Option<u64>,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let pass_fail = |exceeded: bool| if exceeded { "✗" } else { "✓" };
        let exceeded = anomalies_exceeded(report, self.max_anomalies);
        let s = &report.scenario;
        let m = &report.metrics;

        writeln!(f, "Stressor Simulation Results")?;
        writeln!(f, "===========================")?;
        writeln!(f, "Clients:               {}", s.clients)?;
        writeln!(f, "Rate per client:       {} rps", s.requests_per_second_per_client)?;
        writeln!(f, "Duration:              {} s", s.duration_secs)?;
        writeln!(
            f,
            "Latency profile:       base {:.1} ms  jitter {:.1} ms  spikes {:.1}%",
            s.latency.base_ms,
            s.latency.jitter_ms,
            s.latency.spike_chance * 100.0,
        )?;
        writeln!(f, "Seed:                  {}", report.seed)?;
        writeln!(f)?;

        let truncated = if report.written.is_truncated() { "  (truncated at capacity)" } else { "" };
        writeln!(
            f,
            "Samples:               {} / {}{}",
            report.written.count(),
            report.capacity,
            truncated,
        )?;
        writeln!(
            f,
            "Throughput:            {} samples ({:.1} rps)",
            m.throughput,
            report.rate_per_sec,
        )?;
        writeln!(f, "Mean latency:          {:.2} ms", m.mean)?;
        writeln!(f, "P50 latency:           {:.2} ms", m.p50)?;
        writeln!(f, "P95 latency:           {:.2} ms", m.p95)?;
        writeln!(f, "P99 latency:           {:.2} ms", report.p99)?;
        writeln!(f)?;

        writeln!(
            f,
            "Anomaly threshold:     {:.2} ms  (mean x {})",
            report.threshold,
            report.multiplier,
        )?;
        let limit = match self.max_anomalies {
            Some(max) => format!("[threshold: {max}]  {}", pass_fail(exceeded)),
            None => "[no limit]".to_string(),
        };
        let more = if report.anomalies.is_truncated() { "+" } else { "" };
        writeln!(f, "Anomalies:             {}{}    {}", report.anomalies.count(), more, limit)?;
        writeln!(f)?;
        writeln!(f, "Result: {}", if exceeded { "FAIL" } else { "PASS" })
    }
}

pub fn render_report(report: &RunReport, max_anomalies: Option<u64>) -> String {
    ReportView { report, max_anomalies }.to_string()
}

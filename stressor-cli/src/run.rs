use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use stressor_common::{Metrics, Result, Scenario, StressError, Written};
use stressor_engine::export::write_csv;
use stressor_engine::{
    anomaly_threshold, compute_metrics, detect_anomalies, percentile, run_simulation, Lcg64,
};
use tracing::info;

/// Everything the CLI needs to drive one simulate-and-analyse pass.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scenario: Scenario,
    /// Fixed generator state; `None` seeds from the wall clock.
    pub seed: Option<u64>,
    /// Sample buffer capacity; `None` uses `Scenario::suggested_capacity`.
    pub max_samples: Option<usize>,
    pub multiplier: f64,
    /// Anomaly index capacity; `None` allows one per sample.
    pub max_out: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub scenario: Scenario,
    pub seed: u64,
    pub capacity: usize,
    pub written: Written,
    pub metrics: Metrics,
    pub p99: f64,
    /// Samples per simulated second.
    pub rate_per_sec: f64,
    pub multiplier: f64,
    pub threshold: f64,
    pub anomalies: Written,
    pub anomaly_indices: Vec<usize>,
}

pub struct Run {
    pub report: RunReport,
    pub samples: Vec<f64>,
}

/// Simulate `config.scenario`, then reduce and scan the resulting buffer.
///
/// A run that produces no samples (zero duration) fails with
/// [`StressError::EmptySamples`]; there is nothing to report.
pub fn execute(config: &RunConfig) -> Result<Run> {
    let mut rng = match config.seed {
        Some(seed) => Lcg64::new(seed),
        None => Lcg64::from_time(),
    };
    let seed = rng.state();
    let scenario = config.scenario;

    let capacity = config
        .max_samples
        .unwrap_or_else(|| scenario.suggested_capacity());
    let mut samples = vec![0.0; capacity];
    let written = run_simulation(&scenario, &mut rng, &mut samples)?;
    samples.truncate(written.count());

    let metrics = compute_metrics(&samples)?;
    let p99 = percentile(&samples, 0.99).ok_or(StressError::EmptySamples)?;
    let threshold =
        anomaly_threshold(&samples, config.multiplier).ok_or(StressError::EmptySamples)?;

    let mut anomaly_indices = vec![0usize; config.max_out.unwrap_or(samples.len())];
    let anomalies = detect_anomalies(&samples, config.multiplier, &mut anomaly_indices)?;
    anomaly_indices.truncate(anomalies.count());

    info!(seed, written = written.count(), anomalies = anomalies.count(), "run complete");

    let report = RunReport {
        scenario,
        seed,
        capacity,
        written,
        metrics,
        p99,
        rate_per_sec: samples.len() as f64 / scenario.duration_secs.max(1) as f64,
        multiplier: config.multiplier,
        threshold,
        anomalies,
        anomaly_indices,
    };
    Ok(Run { report, samples })
}

/// Write `samples` as CSV to a new file at `path`.
pub fn export_csv(path: &Path, samples: &[f64]) -> std::io::Result<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), samples)?;
    info!(path = %path.display(), rows = samples.len(), "exported samples");
    Ok(())
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Baseline latency of a simulated request, in milliseconds.
pub const DEFAULT_BASE_LATENCY_MS: f64 = 50.0;
/// Full jitter width in milliseconds; the Gaussian term uses half of it as its scale.
pub const DEFAULT_JITTER_MS: f64 = 15.0;
/// Probability that a sample receives a tail-latency spike.
pub const DEFAULT_SPIKE_CHANCE: f64 = 0.05;
/// Smallest capacity `Scenario::suggested_capacity` will ever return.
pub const MIN_SUGGESTED_CAPACITY: usize = 1_000;

/// Error types for Stressor operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressError {
    #[error("Output buffer has zero capacity")]
    ZeroCapacity,

    #[error("Sample buffer is empty")]
    EmptySamples,
}

/// Result type for Stressor operations
pub type Result<T> = std::result::Result<T, StressError>;

/// Outcome of a bounded write into a caller-owned buffer.
///
/// `Truncated` means the buffer filled up before the operation ran out of
/// things to write; the count is still exactly what landed in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Written {
    Complete(usize),
    Truncated(usize),
}

impl Written {
    /// Number of elements written into the output buffer.
    pub fn count(self) -> usize {
        match self {
            Written::Complete(n) | Written::Truncated(n) => n,
        }
    }

    pub fn is_truncated(self) -> bool {
        matches!(self, Written::Truncated(_))
    }
}

/// Summary statistics for a sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    /// Number of samples reduced, used as a proxy for requests served.
    pub throughput: f64,
}

impl Metrics {
    /// Result used when the sorted working copy could not be allocated.
    pub fn degraded(mean: f64) -> Self {
        Self { mean, p50: 0.0, p95: 0.0, throughput: 0.0 }
    }

    /// `[mean, p50, p95, throughput]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.mean, self.p50, self.p95, self.throughput]
    }

    /// Metrics are only produced for non-empty input, so a zero throughput
    /// can only come from the degraded path.
    pub fn is_degraded(&self) -> bool {
        self.throughput == 0.0
    }
}

/// Shape of a single simulated latency sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyProfile {
    pub base_ms: f64,
    pub jitter_ms: f64,
    /// Probability in `[0, 1]`.
    pub spike_chance: f64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            base_ms: DEFAULT_BASE_LATENCY_MS,
            jitter_ms: DEFAULT_JITTER_MS,
            spike_chance: DEFAULT_SPIKE_CHANCE,
        }
    }
}

/// Parameters of a simulated load run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub clients: u32,
    pub requests_per_second_per_client: f64,
    pub duration_secs: u32,
    #[serde(default)]
    pub latency: LatencyProfile,
}

impl Scenario {
    pub fn new(clients: u32, requests_per_second_per_client: f64, duration_secs: u32) -> Self {
        Self {
            clients,
            requests_per_second_per_client,
            duration_secs,
            latency: LatencyProfile::default(),
        }
    }

    /// Samples generated per simulated second: `round(clients * rps)`, never below 1.
    pub fn per_second(&self) -> u64 {
        let raw = (self.clients as f64 * self.requests_per_second_per_client).round();
        if raw.is_nan() || raw < 1.0 {
            1
        } else {
            // Float-to-int casts saturate.
            raw as u64
        }
    }

    /// Samples the run would produce with unlimited capacity.
    pub fn planned_samples(&self) -> u64 {
        (self.duration_secs as u64).saturating_mul(self.per_second())
    }

    /// Buffer size a caller should allocate: 20% headroom over the nominal
    /// request count, with a floor of [`MIN_SUGGESTED_CAPACITY`].
    pub fn suggested_capacity(&self) -> usize {
        let nominal = self.clients as f64
            * self.requests_per_second_per_client
            * self.duration_secs as f64
            * 1.2;
        let wanted = if nominal.is_nan() { 0 } else { nominal.ceil() as usize };
        wanted.max(MIN_SUGGESTED_CAPACITY)
    }
}

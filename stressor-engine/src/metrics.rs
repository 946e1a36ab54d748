use stressor_common::{Metrics, Result, StressError};
use tracing::warn;

use crate::config::{P50, P95};

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Nearest-rank percentile: sort a copy ascending and return the element at
/// index `floor((n - 1) * q)`. No interpolation between ranks.
/// `q` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn percentile(samples: &[f64], q: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Some(nearest_rank(&sorted, q))
}

fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let idx = (last as f64 * q.clamp(0.0, 1.0)).floor() as usize;
    sorted[idx.min(last)]
}

/// Reduce `samples` to mean, p50, p95 and throughput (the sample count).
///
/// If the sorted working copy cannot be allocated the mean is still returned,
/// with the other three fields zeroed (see [`Metrics::is_degraded`]).
pub fn compute_metrics(samples: &[f64]) -> Result<Metrics> {
    compute_with(samples, |scratch, n| scratch.try_reserve_exact(n).is_ok())
}

fn compute_with(
    samples: &[f64],
    reserve: impl FnOnce(&mut Vec<f64>, usize) -> bool,
) -> Result<Metrics> {
    let mean = mean(samples).ok_or(StressError::EmptySamples)?;

    let mut sorted = Vec::new();
    if !reserve(&mut sorted, samples.len()) {
        warn!(count = samples.len(), "could not allocate sort buffer, returning mean only");
        return Ok(Metrics::degraded(mean));
    }
    sorted.extend_from_slice(samples);
    sorted.sort_unstable_by(f64::total_cmp);

    Ok(Metrics {
        mean,
        p50: nearest_rank(&sorted, P50),
        p95: nearest_rank(&sorted, P95),
        throughput: samples.len() as f64,
    })
}

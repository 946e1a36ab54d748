use stressor_common::{Result, StressError, Written};
use tracing::debug;

use crate::metrics::mean;

/// `mean(samples) * multiplier`, or `None` for an empty slice.
pub fn anomaly_threshold(samples: &[f64], multiplier: f64) -> Option<f64> {
    mean(samples).map(|m| m * multiplier)
}

/// Indices of samples strictly above the threshold, in original order.
fn exceeding(samples: &[f64], threshold: f64) -> impl Iterator<Item = usize> + '_ {
    samples
        .iter()
        .enumerate()
        .filter(move |&(_, &v)| v > threshold)
        .map(|(i, _)| i)
}

/// Write the index of every sample strictly greater than
/// `mean(samples) * multiplier` into `out`, in ascending order, stopping once
/// `out` is full.
///
/// Returns [`Written::Truncated`] when at least one more exceeding index
/// existed past the end of `out`.
pub fn detect_anomalies(samples: &[f64], multiplier: f64, out: &mut [usize]) -> Result<Written> {
    let threshold = anomaly_threshold(samples, multiplier).ok_or(StressError::EmptySamples)?;
    if out.is_empty() {
        return Err(StressError::ZeroCapacity);
    }

    let mut hits = exceeding(samples, threshold);
    let mut written = 0usize;
    for (slot, idx) in out.iter_mut().zip(hits.by_ref()) {
        *slot = idx;
        written += 1;
    }
    let truncated = written == out.len() && hits.next().is_some();

    debug!(count = samples.len(), threshold, written, truncated, "anomaly scan finished");

    if truncated {
        Ok(Written::Truncated(written))
    } else {
        Ok(Written::Complete(written))
    }
}

/// Growable form of [`detect_anomalies`]. Empty input yields no indices.
pub fn find_anomalies(samples: &[f64], multiplier: f64) -> Vec<usize> {
    match anomaly_threshold(samples, multiplier) {
        Some(threshold) => exceeding(samples, threshold).collect(),
        None => Vec::new(),
    }
}

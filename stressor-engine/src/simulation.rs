use stressor_common::{LatencyProfile, Result, Scenario, StressError, Written};
use tracing::{debug, warn};

use crate::config::{MIN_LATENCY_MS, SPIKE_OFFSET, SPIKE_SCALE};
use crate::rng::Lcg64;

/// Draw one latency sample in milliseconds.
///
/// Draw order is fixed: a Gaussian for the jitter, one uniform for the spike
/// roll, then a second Gaussian only when the roll hits.
pub fn draw_latency(profile: &LatencyProfile, rng: &mut Lcg64) -> f64 {
    let jitter = profile.jitter_ms;
    let mut value = profile.base_ms + rng.gaussian() * (jitter / 2.0);
    if rng.uniform() < profile.spike_chance {
        value += rng.gaussian().abs() * jitter * SPIKE_SCALE + jitter * SPIKE_OFFSET;
    }
    if value < MIN_LATENCY_MS {
        value = MIN_LATENCY_MS;
    }
    value
}

/// Lazily generate every sample of `scenario` in simulated-time order.
///
/// The per-second rate is constant for a run, so `duration_secs` seconds of
/// `per_second()` samples flatten into one sequence of `planned_samples()`.
pub fn samples<'a>(scenario: &Scenario, rng: &'a mut Lcg64) -> impl Iterator<Item = f64> + 'a {
    let profile = scenario.latency;
    (0..scenario.planned_samples()).map(move |_| draw_latency(&profile, rng))
}

/// Fill `out` with the samples of `scenario`, stopping silently when either
/// the run ends or `out` is full.
///
/// Returns [`Written::Truncated`] when capacity cut the run short. No sample
/// is drawn for a slot that does not exist, so the generator is left exactly
/// `count` samples further along.
pub fn run_simulation(scenario: &Scenario, rng: &mut Lcg64, out: &mut [f64]) -> Result<Written> {
    if out.is_empty() {
        return Err(StressError::ZeroCapacity);
    }

    let planned = scenario.planned_samples();
    let mut written = 0usize;
    // `out` comes first so a full buffer stops the zip before another draw.
    for (slot, value) in out.iter_mut().zip(samples(scenario, rng)) {
        *slot = value;
        written += 1;
    }

    debug!(
        clients = scenario.clients,
        per_second = scenario.per_second(),
        duration_secs = scenario.duration_secs,
        planned,
        written,
        "simulation finished"
    );

    if (written as u64) < planned {
        warn!(planned, capacity = out.len(), "simulation truncated at buffer capacity");
        Ok(Written::Truncated(written))
    } else {
        Ok(Written::Complete(written))
    }
}

/// Growable form of [`run_simulation`]: produces all `planned_samples()`
/// values. Callers with large scenarios should prefer the bounded form.
pub fn simulate(scenario: &Scenario, rng: &mut Lcg64) -> Vec<f64> {
    let out: Vec<f64> = samples(scenario, rng).collect();
    debug!(written = out.len(), "simulation finished");
    out
}

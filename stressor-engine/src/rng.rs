//! Pseudo-random source behind the simulation.
//!
//! A 64-bit linear congruential generator with a Box-Muller Gaussian on top.
//! Every simulation run owns its own [`Lcg64`], so concurrent runs never share
//! or race on generator state.

use rand::{RngCore, SeedableRng};
use std::f64::consts::PI;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::config::{
    FALLBACK_SEED, GAUSSIAN_UNIFORM_FLOOR, LCG_INCREMENT, LCG_MULTIPLIER, LCG_OUTPUT_SHIFT,
    SEED_MIX,
};

/// Abstraction over current time for testability.
pub trait Clock: Send + Sync {
    fn unix_now_secs(&self) -> u64;
}

/// Production clock backed by `SystemTime`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Derive a generator seed from wall-clock seconds.
/// Never returns zero.
pub fn clock_seed(unix_secs: u64) -> u64 {
    match unix_secs ^ SEED_MIX {
        0 => FALLBACK_SEED,
        seed => seed,
    }
}

const TWO_POW_32: f64 = 4_294_967_296.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    /// Start from exactly `state`. Zero is a valid state here; only clock
    /// seeding substitutes the fallback.
    pub fn new(state: u64) -> Self {
        Self { state }
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        let seed = clock_seed(clock.unix_now_secs());
        debug!(seed, "seeded generator from clock");
        Self::new(seed)
    }

    pub fn from_time() -> Self {
        Self::from_clock(&SystemClock)
    }

    /// Current internal state. Feeding it back into [`Lcg64::new`] replays
    /// the remaining sequence.
    pub fn state(&self) -> u64 {
        self.state
    }

    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        // Truncation keeps the low 32 bits of the shifted state.
        (self.state >> LCG_OUTPUT_SHIFT) as u32
    }

    /// Uniform draw in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.step() as f64 / TWO_POW_32
    }

    /// Standard-normal draw via Box-Muller. Consumes two uniforms.
    pub fn gaussian(&mut self) -> f64 {
        let u = self.uniform().max(GAUSSIAN_UNIFORM_FLOOR);
        let v = self.uniform();
        (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
    }
}

impl RngCore for Lcg64 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.step() as u64;
        let hi = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.step().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// Uses `state` verbatim instead of expanding it, so a seed printed by a
    /// run can be passed straight back in.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Multiplier of the 64-bit linear congruential generator.
pub const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
/// Increment of the 64-bit linear congruential generator.
pub const LCG_INCREMENT: u64 = 1;
/// Right shift applied to the state before taking the low 32 output bits.
pub const LCG_OUTPUT_SHIFT: u32 = 12;

/// Mixed into the wall-clock seconds when seeding from time.
pub const SEED_MIX: u64 = 0xdead_beef;
/// Used when the mixed clock seed comes out as zero.
pub const FALLBACK_SEED: u64 = 123_456_789;

/// Lower bound on the first Box-Muller uniform, keeps `ln(u)` finite.
pub const GAUSSIAN_UNIFORM_FLOOR: f64 = 1e-12;

/// Spike magnitude is `|N| * jitter * SPIKE_SCALE + jitter * SPIKE_OFFSET`.
pub const SPIKE_SCALE: f64 = 8.0;
pub const SPIKE_OFFSET: f64 = 2.0;
/// Simulated latencies never drop below this many milliseconds.
pub const MIN_LATENCY_MS: f64 = 1.0;

pub const P50: f64 = 0.50;
pub const P95: f64 = 0.95;

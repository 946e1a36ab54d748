//! Latency simulation and analysis for synthetic load scenarios.
//!
//! Callers own every buffer. Each operation comes in a bounded form that
//! writes into a caller-sized slice and reports a [`Written`] count, and a
//! growable form that returns a `Vec`.

pub mod anomaly;
pub mod config;
pub mod export;
pub mod metrics;
pub mod rng;
pub mod simulation;

pub use anomaly::{anomaly_threshold, detect_anomalies, find_anomalies};
pub use metrics::{compute_metrics, percentile};
pub use rng::{Clock, Lcg64, SystemClock};
pub use simulation::{run_simulation, simulate};
pub use stressor_common::{LatencyProfile, Metrics, Result, Scenario, StressError, Written};

use rand::seq::SliceRandom;
use std::fs;
use stressor_common::{Scenario, StressError, Written};
use stressor_engine::export::write_csv;
use stressor_engine::{
    compute_metrics, detect_anomalies, find_anomalies, run_simulation, simulate, Lcg64,
};

#[test]
fn test_simulate_then_analyse_pipeline() {
    let scenario = Scenario::new(50, 4.0, 30); // 6000 planned
    let mut samples = vec![0.0; scenario.suggested_capacity()];
    let written = run_simulation(&scenario, &mut Lcg64::new(2025), &mut samples).unwrap();
    assert_eq!(written, Written::Complete(6_000));
    samples.truncate(written.count());

    let m = compute_metrics(&samples).unwrap();
    assert_eq!(m.throughput, 6_000.0);
    assert!(m.p50 <= m.p95);
    // Median sits on the un-spiked base latency; p95 is pulled up by spikes.
    assert!((45.0..55.0).contains(&m.p50), "p50 {}", m.p50);
    assert!(m.p95 > m.p50);

    let mut indices = vec![0usize; samples.len()];
    let found = detect_anomalies(&samples, 2.0, &mut indices).unwrap();
    indices.truncate(found.count());
    assert!(!found.is_truncated());
    assert!(!indices.is_empty(), "5% spike rate should produce anomalies at 2x mean");
    assert!(indices.iter().all(|&i| samples[i] > m.mean * 2.0));
    assert_eq!(indices, find_anomalies(&samples, 2.0));
}

#[test]
fn test_independent_generators_do_not_interfere() {
    let scenario = Scenario::new(5, 5.0, 10);
    let solo = simulate(&scenario, &mut Lcg64::new(1));

    // Interleave draws from a second generator; the first run must not change.
    let mut a = Lcg64::new(1);
    let mut b = Lcg64::new(2);
    let mut other = vec![0.0; 10];
    let mut first = vec![0.0; 10];
    run_simulation(&scenario, &mut a, &mut first).unwrap();
    run_simulation(&scenario, &mut b, &mut other).unwrap();
    let rest = simulate(&Scenario::new(5, 5.0, 10), &mut a);

    assert_eq!(&first[..], &solo[..10]);
    assert_eq!(&rest[..solo.len() - 10], &solo[10..]);
}

#[test]
fn test_generators_on_separate_threads_are_reproducible() {
    let scenario = Scenario::new(10, 10.0, 10);
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || simulate(&scenario, &mut Lcg64::new(99))))
        .collect();
    let runs: Vec<Vec<f64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(runs.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_metrics_independent_of_sample_order() {
    let scenario = Scenario::new(8, 8.0, 8);
    let samples = simulate(&scenario, &mut Lcg64::new(5));
    let mut shuffled = samples.clone();
    shuffled.shuffle(&mut Lcg64::new(6));

    let a = compute_metrics(&samples).unwrap();
    let b = compute_metrics(&shuffled).unwrap();
    assert_eq!((a.p50, a.p95, a.throughput), (b.p50, b.p95, b.throughput));
    assert!((a.mean - b.mean).abs() < 1e-9);
}

#[test]
fn test_invalid_inputs_are_distinguished_from_truncation() {
    let scenario = Scenario::new(100, 100.0, 100);
    let mut none: [f64; 0] = [];
    assert_eq!(
        run_simulation(&scenario, &mut Lcg64::new(1), &mut none),
        Err(StressError::ZeroCapacity)
    );

    let mut small = [0.0; 4];
    assert_eq!(
        run_simulation(&scenario, &mut Lcg64::new(1), &mut small),
        Ok(Written::Truncated(4))
    );

    assert_eq!(compute_metrics(&[]), Err(StressError::EmptySamples));
}

#[test]
fn test_export_round_trip_through_file() {
    let samples = simulate(&Scenario::new(3, 3.0, 3), &mut Lcg64::new(12));
    let file = tempfile::NamedTempFile::new().unwrap();
    write_csv(file.as_file(), &samples).unwrap();

    let text = fs::read_to_string(file.path()).unwrap();
    let parsed: Vec<f64> = text
        .lines()
        .skip(1)
        .map(|line| line.split(',').nth(1).unwrap().parse().unwrap())
        .collect();
    assert_eq!(parsed.len(), samples.len());
    for (p, s) in parsed.iter().zip(&samples) {
        assert!((p - s).abs() < 1e-6);
    }
}

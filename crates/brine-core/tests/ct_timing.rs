//! Timing test for tag comparison (dudect methodology).
//!
//! Two input classes are timed interleaved: tags that differ in their first
//! byte and tags that differ only in their last. An early-exit comparison
//! separates the two; a constant-time one does not. Welch's t-statistic above
//! the threshold indicates a leak.
//!
//! Timing is sensitive to the machine and its load, so the test is ignored by
//! default. Run it on a quiet release build:
//!
//! ```text
//! cargo test -p brine-core --release --test ct_timing -- --ignored
//! ```

use std::{hint::black_box, time::Instant};

use brine_core::ct::is_equal;

const MEASUREMENTS: usize = 20_000;

/// |t| above this is a statistically significant timing difference
const T_THRESHOLD: f64 = 4.5;

fn welch_t(times_a: &[f64], times_b: &[f64]) -> f64 {
    let n_a = times_a.len() as f64;
    let n_b = times_b.len() as f64;

    let mean_a = times_a.iter().sum::<f64>() / n_a;
    let mean_b = times_b.iter().sum::<f64>() / n_b;

    let var_a = times_a.iter().map(|x| (x - mean_a).powi(2)).sum::<f64>() / (n_a - 1.0);
    let var_b = times_b.iter().map(|x| (x - mean_b).powi(2)).sum::<f64>() / (n_b - 1.0);

    let stderr = (var_a / n_a + var_b / n_b).sqrt();
    if stderr < 1e-10 { 0.0 } else { (mean_a - mean_b) / stderr }
}

fn measure<F: Fn() -> bool>(f: F) -> f64 {
    let start = Instant::now();
    black_box(f());
    start.elapsed().as_nanos() as f64
}

#[test]
#[ignore = "timing-sensitive; run manually in release mode"]
fn tag_comparison_does_not_leak_mismatch_position() {
    let reference = [0x5Au8; 64];
    let mut early = reference;
    early[0] ^= 0xFF;
    let mut late = reference;
    late[63] ^= 0xFF;

    let mut times_early = Vec::with_capacity(MEASUREMENTS);
    let mut times_late = Vec::with_capacity(MEASUREMENTS);

    for _ in 0..MEASUREMENTS {
        times_early.push(measure(|| is_equal(black_box(&reference), black_box(&early))));
        times_late.push(measure(|| is_equal(black_box(&reference), black_box(&late))));
    }

    let t = welch_t(&times_early, &times_late);
    assert!(t.abs() < T_THRESHOLD, "timing leak in is_equal: t={t:.2} (threshold {T_THRESHOLD})");
}

#[test]
fn welch_t_of_identical_samples_is_zero() {
    let samples = [10.0, 12.0, 11.0, 13.0];
    assert!(welch_t(&samples, &samples).abs() < f64::EPSILON);
}

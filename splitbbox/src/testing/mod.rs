//! Testing utilities for splitbbox.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    common::log_setup::init_test_logging();
}

/// Per-pixel arrays of a synthetic detector.
#[derive(Debug, Clone)]
pub struct SyntheticDetector {
    pub weights: Vec<f32>,
    pub pos0: Vec<f64>,
    pub delta_pos0: Vec<f64>,
    pub pos1: Vec<f64>,
    pub delta_pos1: Vec<f64>,
}

impl SyntheticDetector {
    pub fn len(&self) -> usize {
        self.weights.len()
    }
}

/// Random pixels whose footprints lie strictly inside `[0, 10] x [-3, 3]`.
///
/// Centers are drawn from `[1, 9] x [-2, 2]`, half-widths from `(0, max_delta]`
/// with `max_delta <= 1`. Seeded for reproducibility.
pub fn random_detector(len: usize, max_delta: f64, seed: u64) -> SyntheticDetector {
    assert!(max_delta > 0.0 && max_delta <= 1.0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut detector = SyntheticDetector {
        weights: Vec::with_capacity(len),
        pos0: Vec::with_capacity(len),
        delta_pos0: Vec::with_capacity(len),
        pos1: Vec::with_capacity(len),
        delta_pos1: Vec::with_capacity(len),
    };
    for _ in 0..len {
        detector.weights.push(rng.random_range(1.0f32..100.0));
        detector.pos0.push(rng.random_range(1.0..9.0));
        detector.delta_pos0.push(rng.random_range(1e-3..=max_delta));
        detector.pos1.push(rng.random_range(-2.0..2.0));
        detector.delta_pos1.push(rng.random_range(1e-3..=max_delta));
    }
    detector
}

/// Asserts `actual` is within `eps` of `expected`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() <= eps,
        "expected {expected}, got {actual} (eps {eps})"
    );
}

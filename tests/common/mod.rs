#![allow(dead_code)]

pub use wfmakespan_test_utils::builders;
pub use wfmakespan_test_utils::init_tracing;

/// Relative float comparison for estimator outputs.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

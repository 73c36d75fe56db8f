// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Quadrature
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Trapezoid rule on tabulated data and log-spaced sample points.

use ndarray::{Array1, ArrayView1};

/// Trapezoid rule ∫y dx over tabulated points. Zero for fewer than two
/// points.
///
/// # Panics
/// If `x` and `y` have different lengths.
pub fn trapz(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    assert_eq!(x.len(), y.len(), "trapz length mismatch");
    x.windows(2)
        .into_iter()
        .zip(y.windows(2))
        .map(|(xw, yw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum()
}

/// `n` points from `start` to `stop` inclusive, spaced geometrically.
/// Both bounds must be positive.
pub fn logspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let log_min = start.ln();
            let log_max = stop.ln();
            let last = (n - 1) as f64;
            let mut out = Array1::from_shape_fn(n, |i| {
                (log_min + i as f64 / last * (log_max - log_min)).exp()
            });
            out[0] = start;
            out[n - 1] = stop;
            out
        }
    }
}

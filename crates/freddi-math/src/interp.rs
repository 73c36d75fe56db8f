// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Interpolation
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Piecewise-linear interpolation on a sorted table.

/// Interpolate `ys(x)` linearly on increasing abscissae `xs`.
///
/// Values outside `[xs[0], xs[n-1]]` are clamped to the end values.
///
/// # Panics
/// If the tables are empty or have different lengths.
pub fn interp1d(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    assert!(!xs.is_empty(), "empty interpolation table");
    assert_eq!(xs.len(), ys.len(), "table length mismatch");
    let n = xs.len();
    if n == 1 || x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    // first index with xs[i] > x, in 1..n
    let hi = xs.partition_point(|&xi| xi <= x);
    let lo = hi - 1;
    let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}

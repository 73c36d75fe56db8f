// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Closure
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Closure between viscous torque `F` and the integrated surface density
//! functional `W`, the nonlinearity of `∂W/∂t = ∂²F/∂h²`.

use ndarray::{Array1, ArrayView1};

/// Pointwise map `(h, F) → W` and its derivative in `F`.
pub trait DiffusionClosure {
    fn w(&self, h: f64, f: f64) -> f64;

    /// `∂W/∂F`, used as the Newton Jacobian diagonal.
    fn dw_df(&self, h: f64, f: f64) -> f64;
}

/// Evaluate `W` on indices `first..=last`; entries below `first` are zero.
///
/// # Panics
/// If `last` is out of range for `h` or `f`.
pub fn surface_density_functional<C: DiffusionClosure + ?Sized>(
    closure: &C,
    h: ArrayView1<'_, f64>,
    f: ArrayView1<'_, f64>,
    first: usize,
    last: usize,
) -> Array1<f64> {
    let mut w = Array1::zeros(last + 1);
    for i in first..=last {
        w[i] = closure.w(h[i], f[i]);
    }
    w
}

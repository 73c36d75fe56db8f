// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Nonlinear Diffusion
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Implicit step of `∂W(h, F)/∂t = ∂²F/∂h²` on a nonuniform grid.
//!
//! Backward Euler in finite-volume form: node `i` owns the cell between the
//! midpoints of its neighbours, fluxes `∂F/∂h` live on the edges. The
//! nonlinearity is Newton-linearized through the closure, and each
//! iteration is one tridiagonal solve.
//!
//! Boundaries: `F[0] = F_in` (Dirichlet), `∂F/∂h = Mdot_out` at the outer
//! edge (Neumann).

use freddi_math::tridiag::TridiagonalSystem;
use freddi_types::error::{FreddiError, FreddiResult};
use ndarray::{ArrayView1, ArrayViewMut1};

use crate::closure::DiffusionClosure;

/// Newton solver for one implicit diffusion step.
#[derive(Debug, Clone)]
pub struct DiffusionStepper {
    eps: f64,
    max_iterations: usize,
    system: TridiagonalSystem,
    w_old: Vec<f64>,
    volume: Vec<f64>,
    update: Vec<f64>,
}

impl DiffusionStepper {
    pub fn new(eps: f64, max_iterations: usize) -> FreddiResult<Self> {
        if !eps.is_finite() || eps <= 0.0 {
            return Err(FreddiError::ConfigError(format!(
                "diffusion tolerance must be finite and > 0, got {eps}"
            )));
        }
        if max_iterations == 0 {
            return Err(FreddiError::ConfigError(
                "diffusion iteration budget must be >= 1".to_string(),
            ));
        }
        Ok(DiffusionStepper {
            eps,
            max_iterations,
            system: TridiagonalSystem::default(),
            w_old: Vec::new(),
            volume: Vec::new(),
            update: Vec::new(),
        })
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Advance `f` by `tau` in place and return the Newton iterations used.
    ///
    /// `f[0]` is overwritten with `f_in`. On error `f` holds the last
    /// iterate and must not be used further.
    pub fn step<C: DiffusionClosure + ?Sized>(
        &mut self,
        tau: f64,
        f_in: f64,
        mdot_out: f64,
        closure: &C,
        h: ArrayView1<'_, f64>,
        mut f: ArrayViewMut1<'_, f64>,
    ) -> FreddiResult<usize> {
        let n = h.len();
        if n < 2 || f.len() != n {
            return Err(FreddiError::ConfigError(format!(
                "diffusion step needs matching h/F of length >= 2, got {n} and {}",
                f.len()
            )));
        }
        if !tau.is_finite() || tau <= 0.0 {
            return Err(FreddiError::ConfigError(format!(
                "diffusion time step must be finite and > 0, got {tau}"
            )));
        }

        let unknowns = n - 1;
        self.system.resize(unknowns);
        self.w_old.clear();
        self.volume.clear();
        self.update.clear();
        self.update.resize(unknowns, 0.0);
        for i in 1..n {
            self.w_old.push(closure.w(h[i], f[i]));
            self.volume.push(cell_volume(h, i));
        }
        f[0] = f_in;

        for iteration in 1..=self.max_iterations {
            for j in 0..unknowns {
                let i = j + 1;
                let f_k = f[i];
                let dw = closure.dw_df(h[i], f_k);
                let w_k = closure.w(h[i], f_k);
                let vol = self.volume[j];
                let inv_left = 1.0 / (h[i] - h[i - 1]);

                let mut diag = vol * dw / tau + inv_left;
                let mut rhs = vol * (dw * f_k - w_k + self.w_old[j]) / tau;
                let upper = if i < n - 1 {
                    let inv_right = 1.0 / (h[i + 1] - h[i]);
                    diag += inv_right;
                    -inv_right
                } else {
                    rhs += mdot_out;
                    0.0
                };
                if j == 0 {
                    rhs += f_in * inv_left;
                }
                self.system.lower[j] = -inv_left;
                self.system.diag[j] = diag;
                self.system.upper[j] = upper;
                self.system.rhs[j] = rhs;
            }

            self.system
                .solve(&mut self.update)
                .map_err(|e| FreddiError::SolverDiverged {
                    iteration,
                    message: e.to_string(),
                })?;

            let mut max_change: f64 = 0.0;
            let mut max_value: f64 = 0.0;
            for j in 0..unknowns {
                let old = f[j + 1];
                let mut new = self.update[j];
                if !new.is_finite() {
                    return Err(FreddiError::SolverDiverged {
                        iteration,
                        message: format!("non-finite torque at index {}", j + 1),
                    });
                }
                if new <= 0.0 {
                    new = 0.5 * old;
                }
                max_change = max_change.max((new - old).abs());
                max_value = max_value.max(new.abs());
                f[j + 1] = new;
            }

            if max_change <= self.eps * max_value {
                return Ok(iteration);
            }
        }

        Err(FreddiError::SolverDiverged {
            iteration: self.max_iterations,
            message: format!(
                "no convergence to relative tolerance {} on {n} points",
                self.eps
            ),
        })
    }
}

/// Control volume of node `i ≥ 1`: half the distance between neighbours,
/// or half the last interval at the outer edge.
pub fn cell_volume(h: ArrayView1<'_, f64>, i: usize) -> f64 {
    let n = h.len();
    if i + 1 < n {
        0.5 * (h[i + 1] - h[i - 1])
    } else {
        0.5 * (h[i] - h[i - 1])
    }
}

// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Tridiag
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Thomas algorithm for tridiagonal systems.
//!
//! The implicit diffusion step assembles and solves one system per Newton
//! iteration, so [`TridiagonalSystem`] keeps its buffers between solves.

use freddi_types::error::{FreddiError, FreddiResult};

/// Reusable tridiagonal system `A x = d`.
///
/// Row `i` reads `lower[i]·x[i-1] + diag[i]·x[i] + upper[i]·x[i+1] = rhs[i]`;
/// `lower[0]` and `upper[n-1]` are ignored.
#[derive(Debug, Clone, Default)]
pub struct TridiagonalSystem {
    pub lower: Vec<f64>,
    pub diag: Vec<f64>,
    pub upper: Vec<f64>,
    pub rhs: Vec<f64>,
    scratch: Vec<f64>,
}

impl TridiagonalSystem {
    pub fn with_capacity(n: usize) -> Self {
        let mut system = TridiagonalSystem::default();
        system.resize(n);
        system
    }

    /// Set the system size to `n` and zero all coefficients.
    pub fn resize(&mut self, n: usize) {
        for buf in [
            &mut self.lower,
            &mut self.diag,
            &mut self.upper,
            &mut self.rhs,
            &mut self.scratch,
        ] {
            buf.clear();
            buf.resize(n, 0.0);
        }
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Solve in place of `x`, which must have the system size.
    ///
    /// Returns `LinAlg` on a zero or non-finite pivot. The coefficient
    /// buffers are left untouched.
    pub fn solve(&mut self, x: &mut [f64]) -> FreddiResult<()> {
        let n = self.len();
        if n == 0 {
            return Err(FreddiError::LinAlg("empty tridiagonal system".to_string()));
        }
        if x.len() != n {
            return Err(FreddiError::LinAlg(format!(
                "solution length {} does not match system size {n}",
                x.len()
            )));
        }

        let c_prime = &mut self.scratch;
        let pivot = self.diag[0];
        check_pivot(pivot, 0)?;
        c_prime[0] = self.upper[0] / pivot;
        x[0] = self.rhs[0] / pivot;

        // Forward sweep
        for i in 1..n {
            let den = self.diag[i] - self.lower[i] * c_prime[i - 1];
            check_pivot(den, i)?;
            c_prime[i] = if i < n - 1 { self.upper[i] / den } else { 0.0 };
            x[i] = (self.rhs[i] - self.lower[i] * x[i - 1]) / den;
        }

        // Back substitution
        for i in (0..n - 1).rev() {
            x[i] -= c_prime[i] * x[i + 1];
        }
        Ok(())
    }
}

fn check_pivot(pivot: f64, row: usize) -> FreddiResult<()> {
    if pivot == 0.0 || !pivot.is_finite() {
        return Err(FreddiError::LinAlg(format!(
            "singular tridiagonal system: pivot {pivot} at row {row}"
        )));
    }
    Ok(())
}

/// Solve `Ax = d` once, allocating the workspace.
///
/// - `a`: sub-diagonal \[n\] (a\[0\] unused)
/// - `b`: main diagonal \[n\]
/// - `c`: super-diagonal \[n\] (c\[n-1\] unused)
/// - `d`: right-hand side \[n\]
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> FreddiResult<Vec<f64>> {
    let n = d.len();
    if a.len() != n || b.len() != n || c.len() != n {
        return Err(FreddiError::LinAlg(format!(
            "diagonal lengths {}/{}/{} do not match rhs length {n}",
            a.len(),
            b.len(),
            c.len()
        )));
    }
    let mut system = TridiagonalSystem {
        lower: a.to_vec(),
        diag: b.to_vec(),
        upper: c.to_vec(),
        rhs: d.to_vec(),
        scratch: vec![0.0; n],
    };
    let mut x = vec![0.0; n];
    system.solve(&mut x)?;
    Ok(x)
}

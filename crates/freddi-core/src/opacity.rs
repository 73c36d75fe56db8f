// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Opacity Closure
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Power-law opacity closure for a standard α-disk.
//!
//! With κ = κ0 ρ^a T^b and the vertical structure coefficients Π1..Π4 of
//! Ketsaris & Shakura (1998), the central temperature follows
//! `T_c ∝ F^m R^p`, which turns the viscous evolution into
//! `∂W/∂t = ∂²F/∂h²` with `W = F^(1-m) h^n / ((1-m) D)`.

use freddi_math::interp::interp1d;
use freddi_types::config::OpacityLaw;
use freddi_types::constants::{GAS_CONSTANT, GRAVITATIONAL_CONSTANT, STEFAN_BOLTZMANN};
use freddi_types::error::{FreddiError, FreddiResult};
use std::f64::consts::PI;

use crate::closure::DiffusionClosure;

/// Floor for `F` in `∂W/∂F`, which diverges at zero torque.
const MIN_TORQUE: f64 = 1e-300;

/// RK4 steps used to tabulate the quasi-stationary shape.
const SHAPE_STEPS: usize = 2000;

/// Bisection iterations for the shape eigenvalue.
const SHAPE_BISECTIONS: usize = 80;

/// Opacity law coefficients: κ0, density and temperature exponents, and the
/// vertical structure factors Π1..Π4.
#[derive(Debug, Clone, Copy)]
struct OpacityCoefficients {
    kappa0: f64,
    a: f64,
    b: f64,
    pi: [f64; 4],
}

fn coefficients(law: OpacityLaw) -> OpacityCoefficients {
    match law {
        OpacityLaw::Kramers => OpacityCoefficients {
            kappa0: 5e24,
            a: 1.0,
            b: -3.5,
            pi: [5.36, 0.534, 1.15, 0.46],
        },
        OpacityLaw::Opal => OpacityCoefficients {
            kappa0: 1.5e20,
            a: 1.0,
            b: -2.5,
            pi: [6.31, 0.5, 1.13, 0.39],
        },
    }
}

/// Immutable closure bundle built once per run.
#[derive(Debug, Clone)]
pub struct OpacityClosure {
    pub law: OpacityLaw,
    /// Exponent of `F` in the central temperature.
    pub m: f64,
    /// Exponent of `h` in `W`.
    pub n: f64,
    /// Normalization of `W`.
    pub d: f64,
    gm: f64,
    height_norm: f64,
    height_r_exp: f64,
    shape: QuasiStationaryShape,
}

impl OpacityClosure {
    /// `mx` is the central mass in grams.
    pub fn new(law: OpacityLaw, mx: f64, alpha: f64, mu: f64) -> FreddiResult<Self> {
        for (name, value) in [("Mx", mx), ("alpha", alpha), ("mu", mu)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FreddiError::ConfigError(format!(
                    "opacity closure requires finite {name} > 0, got {value}"
                )));
            }
        }
        let OpacityCoefficients { kappa0, a, b, pi } = coefficients(law);
        let [pi1, pi2, pi3, pi4] = pi;
        let gm = GRAVITATIONAL_CONSTANT * mx;
        let x = GAS_CONSTANT / mu;

        let a1 = pi3 / (2.0 * PI * alpha * x);
        let a2 = a1 * gm.sqrt() / (2.0 * pi2 * (pi1 * x).sqrt());
        let a3 = 3.0 * gm.sqrt() / (8.0 * PI * STEFAN_BOLTZMANN);
        let k = 3.0 * kappa0 * a2.powf(a) * a1 * a3 / (32.0 * pi4);

        let e = 5.0 + 1.5 * a - b;
        let m = (a + 2.0) / e;
        let p = -(7.0 * a + 11.0) / (2.0 * e);
        let q = -2.0 - p;
        let n = 3.0 + 2.0 * q;
        let d = gm.powf(2.0 + q) / ((1.0 - m) * 8.0 * PI * a1 * k.powf(-1.0 / e));

        let height_norm = (pi1 * x).sqrt() * k.powf(0.5 / e) / gm.sqrt();
        let height_r_exp = 0.5 * p + 1.5;

        if ![m, n, d, height_norm].iter().all(|v| v.is_finite()) || m >= 1.0 {
            return Err(FreddiError::PhysicsViolation(format!(
                "degenerate {law} closure: m={m}, n={n}, D={d}"
            )));
        }

        Ok(OpacityClosure {
            law,
            m,
            n,
            d,
            gm,
            height_norm,
            height_r_exp,
            shape: QuasiStationaryShape::new(m, n),
        })
    }

    pub fn gm(&self) -> f64 {
        self.gm
    }

    /// Disk semi-thickness at radius `r` [cm] for torque `f` [dyn cm].
    pub fn height(&self, r: f64, f: f64) -> f64 {
        self.height_norm * f.max(0.0).powf(0.5 * self.m) * r.powf(self.height_r_exp)
    }

    /// Quasi-stationary torque shape `f_F(ξ)`, ξ = h/h_out.
    pub fn f_f(&self, xi: f64) -> f64 {
        self.shape.value(xi)
    }

    pub fn shape(&self) -> &QuasiStationaryShape {
        &self.shape
    }
}

impl DiffusionClosure for OpacityClosure {
    fn w(&self, h: f64, f: f64) -> f64 {
        f.max(0.0).powf(1.0 - self.m) * h.powf(self.n) / ((1.0 - self.m) * self.d)
    }

    fn dw_df(&self, h: f64, f: f64) -> f64 {
        f.max(MIN_TORQUE).powf(-self.m) * h.powf(self.n) / self.d
    }
}

/// Self-similar torque profile of a disk with a fixed outer edge
/// (Lipunova & Shakura 2000).
///
/// Solves `f'' = -λ ξ^n f^(1-m)` on `[0, 1]` with `f(1) = 1`, `f'(1) = 0`
/// and picks the eigenvalue λ that gives `f(0) = 0`.
#[derive(Debug, Clone)]
pub struct QuasiStationaryShape {
    lambda: f64,
    xi: Vec<f64>,
    f: Vec<f64>,
}

impl QuasiStationaryShape {
    pub fn new(m: f64, n: f64) -> Self {
        let f_at_zero = |lambda: f64| integrate_inward(lambda, m, n, None);

        let mut lo = 0.0;
        let mut hi = 1.0;
        while f_at_zero(hi) > 0.0 {
            lo = hi;
            hi *= 2.0;
        }
        for _ in 0..SHAPE_BISECTIONS {
            let mid = 0.5 * (lo + hi);
            if f_at_zero(mid) > 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let lambda = 0.5 * (lo + hi);

        let mut table = Vec::with_capacity(SHAPE_STEPS + 1);
        integrate_inward(lambda, m, n, Some(&mut table));
        table.reverse();
        let (xi, mut f): (Vec<f64>, Vec<f64>) = table.into_iter().unzip();
        for v in f.iter_mut() {
            *v = v.max(0.0);
        }
        f[0] = 0.0;
        QuasiStationaryShape { lambda, xi, f }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// `f(ξ)`, clamped to the end values outside `[0, 1]`.
    pub fn value(&self, xi: f64) -> f64 {
        interp1d(&self.xi, &self.f, xi)
    }
}

/// RK4 from ξ = 1 down to ξ = 0; returns `f(0)`. When `table` is given,
/// every node `(ξ, f)` is pushed onto it.
fn integrate_inward(
    lambda: f64,
    m: f64,
    n: f64,
    mut table: Option<&mut Vec<(f64, f64)>>,
) -> f64 {
    let rhs = |xi: f64, f: f64| -lambda * xi.max(0.0).powf(n) * f.max(0.0).powf(1.0 - m);
    let step = -1.0 / SHAPE_STEPS as f64;
    let mut xi = 1.0;
    let mut f = 1.0;
    let mut df = 0.0;
    if let Some(t) = table.as_deref_mut() {
        t.push((xi, f));
    }
    for k in 1..=SHAPE_STEPS {
        let k1f = df;
        let k1d = rhs(xi, f);
        let k2f = df + 0.5 * step * k1d;
        let k2d = rhs(xi + 0.5 * step, f + 0.5 * step * k1f);
        let k3f = df + 0.5 * step * k2d;
        let k3d = rhs(xi + 0.5 * step, f + 0.5 * step * k2f);
        let k4f = df + step * k3d;
        let k4d = rhs(xi + step, f + step * k3f);
        f += step / 6.0 * (k1f + 2.0 * k2f + 2.0 * k3f + k4f);
        df += step / 6.0 * (k1d + 2.0 * k2d + 2.0 * k3d + k4d);
        xi = 1.0 - k as f64 / SHAPE_STEPS as f64;
        if let Some(t) = table.as_deref_mut() {
            t.push((xi, f));
        }
    }
    f
}

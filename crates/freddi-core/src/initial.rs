// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Initial Conditions
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Analytic initial torque profiles.

use freddi_types::config::{InitialCondition, TorqueNormalization};
use freddi_types::error::{FreddiError, FreddiResult};
use freddi_types::state::Grid;
use ndarray::Array1;
use std::f64::consts::PI;

use crate::boundary::critical_surface_density;
use crate::opacity::OpacityClosure;

/// Weak sinusoid added under the Gaussian bump, relative to its peak.
const GAUSS_SINUS_FRACTION: f64 = 1e-6;

/// Fraction of `h_out` where the sinusoid of `sinusparabola` peaks.
const PARABOLA_PEAK: f64 = 0.9;

/// Initial torque and the outer mass flux the shape implies.
#[derive(Debug, Clone)]
pub struct InitialProfile {
    pub f: Array1<f64>,
    pub mdot_out: f64,
}

/// Build the initial torque on the full grid. `alpha` and `mx` [g] are
/// only used by `sinusparabola`.
pub fn initial_torque(
    shape: &InitialCondition,
    grid: &Grid,
    closure: &OpacityClosure,
    alpha: f64,
    mx: f64,
) -> FreddiResult<InitialProfile> {
    let h = grid.h();
    let h_in = grid.h_in();
    let h_out = grid.h_out();
    let xi = |hi: f64| (hi - h_in) / (h_out - h_in);
    let mut mdot_out = 0.0;

    let f = match *shape {
        InitialCondition::PowerF { f0, order } => h.mapv(|hi| f0 * xi(hi).powf(order)),
        InitialCondition::PowerSigma { f0, order } => {
            let (m, n) = (closure.m, closure.n);
            h.mapv(|hi| {
                let sigma_to_sigma_out = xi(hi).powf(order);
                f0 * (hi / h_out).powf((3.0 - n) / (1.0 - m))
                    * sigma_to_sigma_out.powf(1.0 / (1.0 - m))
            })
        }
        InitialCondition::SinusF { normalization } => {
            let f0 = match normalization {
                TorqueNormalization::Torque(f0) => f0,
                TorqueNormalization::AccretionRate(mdot) => mdot * (h_out - h_in) * 2.0 / PI,
            };
            h.mapv(|hi| f0 * (xi(hi) * PI / 2.0).sin())
        }
        InitialCondition::SinusGauss {
            f0,
            width_factor,
            cut_to_r_out,
        } => {
            let gauss = |hi: f64| {
                f0 * (-(hi - h_out).powi(2) / (2.0 * h_out * h_out / (width_factor * width_factor)))
                    .exp()
            };
            let f_cut = gauss(h_out / cut_to_r_out.sqrt());
            let f0_sinus = GAUSS_SINUS_FRACTION * f0;
            h.mapv(|hi| (gauss(hi) - f_cut).max(0.0) + f0_sinus * (xi(hi) * PI / 2.0).sin())
        }
        InitialCondition::SinusParabola { k_mdot_out } => {
            let gm = grid.gm();
            let h_f0 = PARABOLA_PEAK * h_out;
            let delta_h = h_out - h_f0;
            let sigma_hot = critical_surface_density(grid.r_out(), alpha, mx);
            let f0 = 1.24e13
                * sigma_hot.powf(10.0 / 7.0)
                * h_out.powf(22.0 / 7.0)
                * gm.powf(-10.0 / 7.0)
                * alpha.powf(8.0 / 7.0);
            mdot_out = -k_mdot_out * f0 / (h_f0 - h_in) * PI * PI;
            h.mapv(|hi| {
                if hi < h_f0 {
                    f0 * ((hi - h_in) / (h_f0 - h_in) * PI / 2.0).sin()
                } else {
                    f0 * (1.0 - k_mdot_out / (h_f0 - h_in) / delta_h * PI / 4.0 * (hi - h_f0).powi(2))
                }
            })
        }
        InitialCondition::Quasistat { normalization } => {
            let f0 = match normalization {
                TorqueNormalization::Torque(f0) => f0,
                TorqueNormalization::AccretionRate(mdot) => {
                    let f_inner = closure.f_f(h_in / h_out);
                    if f_inner <= 0.0 {
                        return Err(FreddiError::PhysicsViolation(format!(
                            "quasi-stationary shape vanishes at h_in/h_out = {}",
                            h_in / h_out
                        )));
                    }
                    mdot * (h_out - h_in) / h_out * h_in / f_inner
                }
            };
            h.mapv(|hi| {
                f0 * closure.f_f(hi / h_out) * (1.0 - h_in / hi) / (1.0 - h_in / h_out)
            })
        }
    };

    if f.iter().any(|v| !v.is_finite()) {
        return Err(FreddiError::PhysicsViolation(format!(
            "initial {} profile is not finite",
            shape.name()
        )));
    }
    Ok(InitialProfile { f, mdot_out })
}

// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Spectrum
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Multicolour blackbody disk spectra: Planck functions, band luminosity,
//! monochromatic intensity, optical magnitudes and the relativistic
//! effective temperature of Page & Thorne (1974).

use freddi_math::quadrature::{logspace, trapz};
use freddi_types::config::PhotometricBand;
use freddi_types::constants::{
    BOLTZMANN, GRAVITATIONAL_CONSTANT, PLANCK, SPEED_OF_LIGHT, STEFAN_BOLTZMANN,
};
use ndarray::{Array1, ArrayView1};
use std::f64::consts::PI;

use crate::orbit::gravitational_radius;

/// Frequency points used for band luminosity.
pub const LUMINOSITY_FREQUENCY_POINTS: usize = 100;

/// B_ν(T) [erg s⁻¹ cm⁻² Hz⁻¹ sr⁻¹]. Zero for non-positive temperature.
pub fn planck_nu(temperature: f64, nu: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    let x = PLANCK * nu / (BOLTZMANN * temperature);
    2.0 * PLANCK * nu.powi(3) / (SPEED_OF_LIGHT * SPEED_OF_LIGHT) / x.exp_m1()
}

/// B_λ(T) [erg s⁻¹ cm⁻² cm⁻¹ sr⁻¹]. Zero for non-positive temperature.
pub fn planck_lambda(temperature: f64, lambda: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    let x = PLANCK * SPEED_OF_LIGHT / (lambda * BOLTZMANN * temperature);
    2.0 * PLANCK * SPEED_OF_LIGHT * SPEED_OF_LIGHT / lambda.powi(5) / x.exp_m1()
}

/// Luminosity of both disk faces between `nu_min` and `nu_max` [Hz]:
/// `4π² ∫∫ R B_ν(T(R)) dR dν`.
pub fn luminosity(
    r: ArrayView1<'_, f64>,
    t: ArrayView1<'_, f64>,
    nu_min: f64,
    nu_max: f64,
    n_nu: usize,
) -> f64 {
    let nu = logspace(nu_min, nu_max, n_nu);
    let per_nu: Array1<f64> = nu.mapv(|freq| {
        let integrand: Array1<f64> = r
            .iter()
            .zip(t.iter())
            .map(|(&ri, &ti)| ri * planck_nu(ti, freq))
            .collect();
        trapz(r, integrand.view())
    });
    4.0 * PI * PI * trapz(nu.view(), per_nu.view())
}

/// Face-on intensity integrated over the disk, `2π ∫ R B_λ(T(R)) dR`.
pub fn i_lambda(r: ArrayView1<'_, f64>, t: ArrayView1<'_, f64>, lambda: f64) -> f64 {
    let integrand: Array1<f64> = r
        .iter()
        .zip(t.iter())
        .map(|(&ri, &ti)| ri * planck_lambda(ti, lambda))
        .collect();
    2.0 * PI * trapz(r, integrand.view())
}

/// Relativistic effective temperature of a thin disk around a Kerr black
/// hole at radius `r` for accretion rate `mdot`, zero-torque inner edge at
/// `r_in`. Zero inside `r_in`, for non-positive `mdot`, and wherever the
/// formula is not finite.
pub fn t_gr(r: f64, kerr: f64, mx: f64, mdot: f64, r_in: f64) -> f64 {
    if r <= r_in || mdot <= 0.0 {
        return 0.0;
    }
    let a = kerr;
    let r_g = gravitational_radius(mx);
    let x = (r / r_g).sqrt();
    let x0 = (r_in / r_g).sqrt();
    let phi = a.acos() / 3.0;
    let roots = [
        2.0 * (phi - PI / 3.0).cos(),
        2.0 * (phi + PI / 3.0).cos(),
        -2.0 * phi.cos(),
    ];

    let mut b = x - x0 - 1.5 * a * (x / x0).ln();
    for k in 0..3 {
        let xk = roots[k];
        if xk.abs() < 1e-12 {
            continue;
        }
        let denom: f64 = (0..3).filter(|&j| j != k).map(|j| xk - roots[j]).product();
        b -= 3.0 * (xk - a).powi(2) / (xk * denom) * ((x - xk) / (x0 - xk)).ln();
    }

    let gm = GRAVITATIONAL_CONSTANT * mx;
    let q = 3.0 * gm * mdot / (8.0 * PI * r.powi(3)) * x * x * b / (x.powi(3) - 3.0 * x + 2.0 * a);
    let t = (q / STEFAN_BOLTZMANN).powf(0.25);
    if t.is_finite() {
        t
    } else {
        0.0
    }
}

/// Optical magnitudes of the disk in a set of photometric bands.
#[derive(Debug, Clone)]
pub struct Photometry {
    bands: Vec<PhotometricBand>,
    cos_i_over_d2: f64,
}

impl Photometry {
    /// `distance` in cm.
    pub fn new(bands: Vec<PhotometricBand>, cos_inclination: f64, distance: f64) -> Self {
        Photometry {
            bands,
            cos_i_over_d2: cos_inclination / (distance * distance),
        }
    }

    pub fn bands(&self) -> &[PhotometricBand] {
        &self.bands
    }

    /// `m = -2.5 log10(I_λ cos i / d² / F_0)` per band.
    pub fn magnitudes(&self, r: ArrayView1<'_, f64>, tph: ArrayView1<'_, f64>) -> Vec<f64> {
        self.bands
            .iter()
            .map(|band| {
                let flux = i_lambda(r, tph, band.lambda_cm()) * self.cos_i_over_d2;
                -2.5 * (flux / band.zero_point_cgs()).log10()
            })
            .collect()
    }
}

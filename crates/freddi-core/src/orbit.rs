// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Orbit
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Binary orbit and compact object geometry. Masses in grams, lengths in
//! cm, periods in seconds.

use freddi_types::constants::{GRAVITATIONAL_CONSTANT, SPEED_OF_LIGHT};
use std::f64::consts::PI;

/// Outer disk radius as a fraction of the accretor Roche lobe.
pub const TIDAL_RADIUS_FRACTION: f64 = 0.8;

/// Gravitational radius GM/c².
pub fn gravitational_radius(mx: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * mx / (SPEED_OF_LIGHT * SPEED_OF_LIGHT)
}

/// Innermost stable circular orbit in units of GM/c² (Bardeen et al. 1972).
/// Negative spin gives the retrograde orbit.
pub fn r_isco_dimensionless(kerr: f64) -> f64 {
    let a = kerr;
    let z1 = 1.0 + (1.0 - a * a).cbrt() * ((1.0 + a).cbrt() + (1.0 - a).cbrt());
    let z2 = (3.0 * a * a + z1 * z1).sqrt();
    3.0 + z2 - a.signum() * ((3.0 - z1) * (3.0 + z1 + 2.0 * z2)).sqrt()
}

pub fn r_isco(kerr: f64, mx: f64) -> f64 {
    r_isco_dimensionless(kerr) * gravitational_radius(mx)
}

/// Radiative efficiency of accretion onto a Kerr black hole, 1 - E_isco.
pub fn efficiency_of_accretion(kerr: f64) -> f64 {
    1.0 - (1.0 - 2.0 / (3.0 * r_isco_dimensionless(kerr))).sqrt()
}

/// Kepler's third law.
pub fn semi_axis(mx: f64, mopt: f64, period: f64) -> f64 {
    (GRAVITATIONAL_CONSTANT * (mx + mopt) * period * period / (4.0 * PI * PI)).cbrt()
}

/// Eggleton (1983) Roche lobe radius of the star with mass ratio
/// `q = M_star / M_companion`, in units of the separation.
pub fn roche_lobe_fraction(q: f64) -> f64 {
    let q23 = q.powf(2.0 / 3.0);
    0.49 * q23 / (0.6 * q23 + (1.0 + q.cbrt()).ln())
}

/// Roche lobe radius of the accretor.
pub fn roche_lobe_radius(mx: f64, mopt: f64, period: f64) -> f64 {
    roche_lobe_fraction(mx / mopt) * semi_axis(mx, mopt, period)
}

/// Default outer radius of the disk.
pub fn tidal_radius(mx: f64, mopt: f64, period: f64) -> f64 {
    TIDAL_RADIUS_FRACTION * roche_lobe_radius(mx, mopt, period)
}

// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Boundary
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Outer edge of the hot disk.
//!
//! Each step scans inward from the current edge while the selected
//! criterion says the gas is too cold to stay ionized; the first point
//! that passes becomes the new edge.

use freddi_types::config::BoundaryCondition;
use freddi_types::constants::SOLAR_MASS;
use freddi_types::state::{BoundaryState, DerivedFields};
use ndarray::ArrayView1;

/// Minimum surface density of the hot branch of the thermal equilibrium
/// S-curve [g cm⁻²] at radius `r` [cm] for central mass `mx` [g]
/// (Lasota, Dubus & Kruk 2008; Menou et al. 1999).
pub fn critical_surface_density(r: f64, alpha: f64, mx: f64) -> f64 {
    39.9 * (alpha / 0.1).powf(-0.80) * (r / 1e10).powf(1.11) * (mx / SOLAR_MASS).powf(-0.37)
}

/// Cold-gas test for one boundary policy.
#[derive(Debug, Clone)]
pub struct BoundaryTracker {
    condition: BoundaryCondition,
    photosphere_on_rise: bool,
    alpha: f64,
    mx: f64,
}

impl BoundaryTracker {
    /// `photosphere_on_rise` switches the Tirr policy to the photospheric
    /// temperature while the accretion rate is not decreasing.
    pub fn new(condition: BoundaryCondition, photosphere_on_rise: bool, alpha: f64, mx: f64) -> Self {
        BoundaryTracker {
            condition,
            photosphere_on_rise,
            alpha,
            mx,
        }
    }

    pub fn condition(&self) -> BoundaryCondition {
        self.condition
    }

    /// Find the new outer edge index `ii` over the active radii `r`.
    ///
    /// The criterion holds at `ii` and fails above it. The scan stops at
    /// index 1, so at least two points always remain. For `MdotOut` the
    /// outer mass flux in `state` is updated first.
    pub fn locate_outer_edge(
        &self,
        fields: &DerivedFields,
        r: ArrayView1<'_, f64>,
        state: &mut BoundaryState,
    ) -> usize {
        let last = r.len() - 1;
        if let BoundaryCondition::MdotOut { k_mdot_out } = self.condition {
            state.mdot_out = -k_mdot_out * state.mdot_in;
        }
        let use_photosphere = self.photosphere_on_rise && state.mdot_in >= state.mdot_in_prev;
        let sigma_crit = |i: usize| critical_surface_density(r[i], self.alpha, self.mx);

        let is_cold = |i: usize| match self.condition {
            BoundaryCondition::MdotOut { .. } => fields.sigma[i] < sigma_crit(i),
            BoundaryCondition::FourSigmaCrit => fields.sigma[i] < 4.0 * sigma_crit(i),
            BoundaryCondition::Teff { t_hot } => fields.tph[i] < t_hot,
            BoundaryCondition::Tirr { t_hot } if use_photosphere => fields.tph[i] < t_hot,
            BoundaryCondition::Tirr { t_hot } => fields.tirr[i] < t_hot,
        };

        let mut ii = last;
        while ii > 1 && is_cold(ii) {
            ii -= 1;
        }
        ii
    }
}

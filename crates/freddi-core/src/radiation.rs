// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Radiation
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Radial fields derived from the torque: surface density, thickness,
//! viscous and X-ray photosphere temperatures, and self-irradiation.

use freddi_types::config::{IrradiationConfig, IrradiationKind};
use freddi_types::constants::{SPEED_OF_LIGHT, STEFAN_BOLTZMANN};
use freddi_types::state::{DerivedFields, Grid};
use ndarray::ArrayView1;
use std::f64::consts::PI;

use crate::opacity::OpacityClosure;
use crate::spectrum::{luminosity, t_gr, LUMINOSITY_FREQUENCY_POINTS};

/// Per-step radial field evaluation.
#[derive(Debug, Clone)]
pub struct RadiativeFieldCalculator {
    mx: f64,
    kerr: f64,
    efficiency: f64,
    irradiation: IrradiationConfig,
}

impl RadiativeFieldCalculator {
    /// `mx` in grams, `efficiency` is the radiative efficiency of accretion.
    pub fn new(mx: f64, kerr: f64, efficiency: f64, irradiation: IrradiationConfig) -> Self {
        RadiativeFieldCalculator {
            mx,
            kerr,
            efficiency,
            irradiation,
        }
    }

    /// Fill every field except `w` on the active grid. `fields.w` must
    /// already hold the closure functional for `f`; index 0 is left at zero.
    pub fn compute(
        &self,
        grid: &Grid,
        f: ArrayView1<'_, f64>,
        closure: &OpacityClosure,
        mdot_in: f64,
        fields: &mut DerivedFields,
    ) {
        let gm = grid.gm();
        let h = grid.h();
        let r = grid.r();
        let r_in = grid.r_in();
        let fc = self.irradiation.dilution;
        let c_irr_input = self.irradiation.c_irr;
        // Qx · R² / C_irr
        let x_ray_flux = self.efficiency * mdot_in * SPEED_OF_LIGHT * SPEED_OF_LIGHT / (4.0 * PI);

        for i in 1..grid.len() {
            let (hi, ri, fi) = (h[i], r[i], f[i]);
            fields.sigma[i] = fields.w[i] * gm * gm / (4.0 * PI * hi.powi(3));
            let height = closure.height(ri, fi);
            fields.height[i] = height;
            let tph_vis =
                gm * hi.powf(-1.75) * (3.0 / (8.0 * PI) * fi.max(0.0) / STEFAN_BOLTZMANN).powf(0.25);
            fields.tph_vis[i] = tph_vis;
            fields.tph_x[i] = fc * t_gr(ri, self.kerr, self.mx, mdot_in, r_in);

            let c_irr = match self.irradiation.kind {
                IrradiationKind::Const => c_irr_input,
                IrradiationKind::Square => c_irr_input * (height / ri).powi(2),
            };
            fields.c_irr[i] = c_irr;
            let qx = (c_irr * x_ray_flux / (ri * ri)).max(0.0);
            fields.tirr[i] = (qx / STEFAN_BOLTZMANN).powf(0.25);
            fields.tph[i] = if qx > 0.0 {
                (tph_vis.powi(4) + qx / STEFAN_BOLTZMANN).powf(0.25)
            } else {
                tph_vis
            };
        }
    }

    /// Band X-ray luminosity from the colour-corrected inner disk
    /// temperature, divided back by `fc⁴`.
    pub fn x_ray_luminosity(&self, grid: &Grid, fields: &DerivedFields) -> f64 {
        let len = grid.len();
        let tph_x = fields.tph_x.slice(ndarray::s![..len]);
        luminosity(
            grid.r(),
            tph_x,
            self.irradiation.nu_min_hz(),
            self.irradiation.nu_max_hz(),
            LUMINOSITY_FREQUENCY_POINTS,
        ) / self.irradiation.dilution.powi(4)
    }
}

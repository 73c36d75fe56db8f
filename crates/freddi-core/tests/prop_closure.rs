// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Property-Based Tests (proptest) for freddi-core
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for freddi-core using proptest.
//!
//! Covers: opacity closure positivity, mass conservation of the implicit
//! step, outer edge scan invariants, disk mass.

use freddi_core::boundary::BoundaryTracker;
use freddi_core::closure::DiffusionClosure;
use freddi_core::diffusion::{cell_volume, DiffusionStepper};
use freddi_core::evolution::disk_mass;
use freddi_core::opacity::OpacityClosure;
use freddi_types::config::{BoundaryCondition, OpacityLaw};
use freddi_types::constants::{GRAVITATIONAL_CONSTANT, SOLAR_MASS};
use freddi_types::state::{BoundaryState, DerivedFields};
use ndarray::Array1;
use proptest::prelude::*;

fn opacity_law() -> impl Strategy<Value = OpacityLaw> {
    prop_oneof![Just(OpacityLaw::Kramers), Just(OpacityLaw::Opal)]
}

// ── Closure ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// W is finite and non-negative for non-negative torque, and grows
    /// with it.
    #[test]
    fn closure_is_finite_and_monotone(
        law in opacity_law(),
        mx_solar in 1.0f64..20.0,
        alpha in 0.01f64..1.0,
        log_f in 30.0f64..40.0,
        log_r in 8.0f64..12.0,
    ) {
        let mx = mx_solar * SOLAR_MASS;
        let closure = OpacityClosure::new(law, mx, alpha, 0.62).unwrap();
        let h = (GRAVITATIONAL_CONSTANT * mx * 10f64.powf(log_r)).sqrt();
        let f = 10f64.powf(log_f);
        let w = closure.w(h, f);
        prop_assert!(w.is_finite() && w > 0.0);
        prop_assert_eq!(closure.w(h, 0.0), 0.0);
        prop_assert!(closure.w(h, 2.0 * f) > w);
        let dw = closure.dw_df(h, f);
        prop_assert!(dw.is_finite() && dw > 0.0);
    }

    /// The implicit step changes the disk mass by exactly the boundary
    /// fluxes, up to the Newton tolerance.
    #[test]
    fn implicit_step_conserves_mass(
        law in opacity_law(),
        n in 20usize..150,
        order in 1.0f64..4.0,
        tau in 1e3f64..1e5,
    ) {
        let mx = 10.0 * SOLAR_MASS;
        let gm = GRAVITATIONAL_CONSTANT * mx;
        let closure = OpacityClosure::new(law, mx, 0.25, 0.62).unwrap();
        let (h_in, h_out) = ((gm * 1e7).sqrt(), (gm * 1e11).sqrt());
        let h = Array1::from_shape_fn(n, |i| {
            h_in * (h_out / h_in).powf(i as f64 / (n - 1) as f64)
        });
        let mut f = h.mapv(|hi| 1e36 * ((hi - h_in) / (h_out - h_in)).powf(order));
        let w_before: Vec<f64> = (0..n).map(|i| closure.w(h[i], f[i])).collect();

        let mut stepper = DiffusionStepper::new(1e-12, 500).unwrap();
        stepper.step(tau, 0.0, 0.0, &closure, h.view(), f.view_mut()).unwrap();

        let mut change = 0.0;
        let mut scale = 0.0;
        for i in 1..n {
            let dm = cell_volume(h.view(), i) * (closure.w(h[i], f[i]) - w_before[i]);
            change += dm;
            scale += dm.abs();
        }
        let inflow = -tau * (f[1] - f[0]) / (h[1] - h[0]);
        prop_assert!(
            (change - inflow).abs() <= 1e-6 * scale.max(inflow.abs()),
            "ΔW {} vs boundary flux {}", change, inflow
        );
    }
}

// ── Outer Edge ───────────────────────────────────────────────────────

proptest! {
    /// The Teff scan leaves a hot point at the edge and a cold one just
    /// outside, and never grows the disk.
    #[test]
    fn teff_scan_brackets_threshold(
        tph in prop::collection::vec(0.0f64..3e4, 3..60),
        t_hot in 1.0f64..3e4,
    ) {
        let n = tph.len();
        let mut fields = DerivedFields::new(n);
        fields.tph = Array1::from(tph);
        let r = Array1::linspace(1e9, 1e11, n);
        let tracker = BoundaryTracker::new(BoundaryCondition::Teff { t_hot }, false, 0.25, 1e34);
        let mut state = BoundaryState::default();
        let ii = tracker.locate_outer_edge(&fields, r.view(), &mut state);
        prop_assert!((1..n).contains(&ii));
        prop_assert!(fields.tph[ii] >= t_hot || ii == 1);
        for i in ii + 1..n {
            prop_assert!(fields.tph[i] < t_hot);
        }
    }

    /// Disk mass is linear in Σ and non-negative for non-negative Σ.
    #[test]
    fn disk_mass_is_linear(
        sigma in prop::collection::vec(0.0f64..1e4, 2..100),
        k in 0.1f64..10.0,
    ) {
        let n = sigma.len();
        let r = Array1::from_shape_fn(n, |i| 1e9 * 1.05f64.powi(i as i32));
        let sigma = Array1::from(sigma);
        let m = disk_mass(r.view(), sigma.view());
        prop_assert!(m >= 0.0);
        let scaled = disk_mass(r.view(), sigma.mapv(|s| k * s).view());
        prop_assert!((scaled - k * m).abs() <= 1e-12 * (k * m).max(1.0));
    }
}

// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Disk Evolution
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Time loop of the viscous disk.
//!
//! One step: implicit diffusion of the torque, inner accretion rate from
//! the torque gradient, radial fields, outer edge scan and truncation,
//! then the observables of the step.

use freddi_types::config::DiskConfig;
use freddi_types::constants::GRAVITATIONAL_CONSTANT;
use freddi_types::error::{FreddiError, FreddiResult};
use freddi_types::state::{BoundaryState, DerivedFields, Grid, StepRecord};
use ndarray::{s, Array1, ArrayView1};
use std::f64::consts::PI;

use crate::boundary::BoundaryTracker;
use crate::closure::surface_density_functional;
use crate::diffusion::DiffusionStepper;
use crate::initial::initial_torque;
use crate::opacity::OpacityClosure;
use crate::orbit::{efficiency_of_accretion, r_isco, tidal_radius};
use crate::radiation::RadiativeFieldCalculator;
use crate::spectrum::Photometry;

/// Torque at the inner edge; zero-torque boundary.
const INNER_TORQUE: f64 = 0.0;

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// Every step up to the time horizon completed.
    Horizon,
    /// The diffusion solver failed; records emitted before it stand.
    SolverFailure { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub termination: Termination,
}

/// Evolving accretion disk: grid, torque profile and the rates carried
/// between steps.
#[derive(Debug, Clone)]
pub struct DiskEvolution {
    config: DiskConfig,
    grid: Grid,
    torque: Array1<f64>,
    fields: DerivedFields,
    state: BoundaryState,
    closure: OpacityClosure,
    stepper: DiffusionStepper,
    radiation: RadiativeFieldCalculator,
    boundary: BoundaryTracker,
    photometry: Photometry,
    step: usize,
    tau: f64,
}

impl DiskEvolution {
    /// Validate the configuration and build the initial disk. Every
    /// configuration error surfaces here, before any step.
    pub fn new(config: &DiskConfig) -> FreddiResult<Self> {
        config.validate()?;
        let binary = &config.binary;
        let disk = &config.disk;
        let numerics = &config.numerics;

        let mx = binary.mx_grams();
        let gm = GRAVITATIONAL_CONSTANT * mx;
        let r_in = binary
            .r_in_cm()
            .unwrap_or_else(|| r_isco(binary.kerr, mx));
        let r_out = binary.r_out_cm().unwrap_or_else(|| {
            tidal_radius(mx, binary.mopt_grams(), binary.period_seconds())
        });
        if r_in >= r_out {
            return Err(FreddiError::ConfigError(format!(
                "inner radius {r_in:.4e} cm must lie below outer radius {r_out:.4e} cm"
            )));
        }

        let grid = Grid::new(
            (gm * r_in).sqrt(),
            (gm * r_out).sqrt(),
            numerics.nx,
            numerics.grid_scale,
            gm,
        )?;
        let closure = OpacityClosure::new(disk.opacity, mx, disk.alpha, disk.mu)?;
        let profile = initial_torque(&disk.initial, &grid, &closure, disk.alpha, mx)?;

        let state = BoundaryState {
            mdot_in: disk.initial.initial_accretion_rate(),
            mdot_in_prev: 0.0,
            mdot_out: profile.mdot_out,
            c_irr: config.irradiation.c_irr,
        };
        let stepper = DiffusionStepper::new(numerics.eps, numerics.max_iterations)?;
        let radiation = RadiativeFieldCalculator::new(
            mx,
            binary.kerr,
            efficiency_of_accretion(binary.kerr),
            config.irradiation.clone(),
        );
        let boundary = BoundaryTracker::new(
            disk.boundary,
            disk.initial.tracks_photosphere_on_rise(),
            disk.alpha,
            mx,
        );
        let photometry = Photometry::new(
            config.output.bands.clone(),
            binary.cos_inclination(),
            binary.distance_cm(),
        );

        Ok(DiskEvolution {
            config: config.clone(),
            fields: DerivedFields::new(grid.capacity()),
            grid,
            torque: profile.f,
            state,
            closure,
            stepper,
            radiation,
            boundary,
            photometry,
            step: 0,
            tau: numerics.tau_seconds(),
        })
    }

    pub fn config(&self) -> &DiskConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Torque on the active grid.
    pub fn torque(&self) -> ArrayView1<'_, f64> {
        self.torque.slice(s![..self.grid.len()])
    }

    /// Fields of the last completed step; zeros before the first one.
    pub fn fields(&self) -> &DerivedFields {
        &self.fields
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn closure(&self) -> &OpacityClosure {
        &self.closure
    }

    pub fn photometry(&self) -> &Photometry {
        &self.photometry
    }

    /// Completed steps.
    pub fn steps(&self) -> usize {
        self.step
    }

    /// Time label of the last completed step [s]. The first solve is
    /// labelled `t = 0`, the k-th one `(k - 1) τ`.
    pub fn time(&self) -> f64 {
        self.step.saturating_sub(1) as f64 * self.tau
    }

    /// Advance one time step.
    ///
    /// A solver error leaves the engine unusable; the previous record is
    /// the last valid one.
    pub fn step(&mut self) -> FreddiResult<StepRecord> {
        let len = self.grid.len();
        self.stepper.step(
            self.tau,
            INNER_TORQUE,
            self.state.mdot_out,
            &self.closure,
            self.grid.h(),
            self.torque.slice_mut(s![..len]),
        )?;
        self.step += 1;

        let h = self.grid.h();
        let f = self.torque.slice(s![..len]);
        self.fields.clear();
        let w = surface_density_functional(&self.closure, h, f, 1, len - 1);
        self.fields.w.slice_mut(s![..len]).assign(&w);

        self.state.mdot_in_prev = self.state.mdot_in;
        self.state.mdot_in = (f[1] - f[0]) / (h[1] - h[0]);

        self.radiation
            .compute(&self.grid, f, &self.closure, self.state.mdot_in, &mut self.fields);
        let lx = self.radiation.x_ray_luminosity(&self.grid, &self.fields);

        let ii = self
            .boundary
            .locate_outer_edge(&self.fields, self.grid.r(), &mut self.state);
        if ii + 1 < len {
            self.grid.truncate(ii + 1);
            if ii == 1 {
                tracing::warn!(
                    step = self.step - 1,
                    condition = self.boundary.condition().name(),
                    "hot disk shrank to the minimum of two grid points"
                );
            }
        }
        self.state.c_irr = self.fields.c_irr[ii];

        let active = self.grid.len();
        let r = self.grid.r();
        let fields = &self.fields;
        let magnitudes = self
            .photometry
            .magnitudes(r, fields.tph.slice(s![..active]));
        let m_disk = disk_mass(r, fields.sigma.slice(s![..active]));
        let last = active - 1;

        let record = StepRecord {
            step: self.step - 1,
            time: self.time(),
            mdot_in: self.state.mdot_in,
            lx,
            h_to_r_out: fields.height[last] / r[last],
            r_out: r[last],
            tph_out: fields.tph[last],
            m_disk,
            c_irr: self.state.c_irr,
            qirr_to_qvis_out: (fields.tirr[last] / fields.tph_vis[last]).powi(4),
            magnitudes,
        };
        tracing::debug!(
            step = record.step,
            mdot_in = record.mdot_in,
            lx = record.lx,
            points = active,
            "disk step"
        );
        Ok(record)
    }

    /// Step until the time horizon, handing each record to `on_step`.
    ///
    /// Solver failure ends the run with `Termination::SolverFailure`; any
    /// other error, including one returned by `on_step`, is propagated.
    pub fn run<F>(&mut self, mut on_step: F) -> FreddiResult<RunSummary>
    where
        F: FnMut(&StepRecord, &DiskEvolution) -> FreddiResult<()>,
    {
        let horizon = self.config.numerics.horizon_seconds();
        let slack = 1e-9 * self.tau;
        tracing::info!(
            points = self.grid.len(),
            r_out = self.grid.r_out(),
            opacity = %self.closure.law,
            boundary = self.boundary.condition().name(),
            initial = self.config.disk.initial.name(),
            "disk evolution started"
        );

        let mut steps = 0;
        let mut termination = Termination::Horizon;
        // Records at t = 0, τ, 2τ, ... up to and including the horizon.
        while self.step as f64 * self.tau <= horizon + slack {
            match self.step() {
                Ok(record) => {
                    on_step(&record, self)?;
                    steps += 1;
                }
                Err(e) if e.is_numerical() => {
                    tracing::warn!(step = self.step, "diffusion solver failed: {e}");
                    termination = Termination::SolverFailure {
                        message: e.to_string(),
                    };
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            steps,
            time = self.time(),
            points = self.grid.len(),
            "disk evolution finished"
        );
        Ok(RunSummary { steps, termination })
    }
}

/// Mass of the disk, `Σ ½ Σ_i 2π R_i ΔR_i` with one-sided `ΔR` at the
/// ends and `R[i+1] - R[i-1]` inside.
pub fn disk_mass(r: ArrayView1<'_, f64>, sigma: ArrayView1<'_, f64>) -> f64 {
    let n = r.len();
    if n < 2 {
        return 0.0;
    }
    let mut sum = sigma[0] * r[0] * (r[1] - r[0]) + sigma[n - 1] * r[n - 1] * (r[n - 1] - r[n - 2]);
    for i in 1..n - 1 {
        sum += sigma[i] * r[i] * (r[i + 1] - r[i - 1]);
    }
    PI * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use freddi_types::config::{BoundaryCondition, InitialCondition};
    use freddi_types::constants::DAY;

    fn quick_config() -> DiskConfig {
        let mut config = DiskConfig::default();
        config.numerics.nx = 120;
        config.numerics.time = 2.0;
        config
    }

    #[test]
    fn test_disk_mass_uniform_annulus() {
        // Σ = 1 on a uniform grid gives π (R_out² - R_in²)
        let r = Array1::linspace(1.0, 2.0, 101);
        let sigma = Array1::from_elem(101, 1.0);
        let mass = disk_mass(r.view(), sigma.view());
        let expected = PI * (4.0 - 1.0);
        assert!((mass - expected).abs() / expected < 1e-3, "M = {mass}");
        assert_eq!(disk_mass(r.slice(s![..1]), sigma.slice(s![..1])), 0.0);
    }

    #[test]
    fn test_new_builds_grid_from_orbit() {
        let config = quick_config();
        let engine = DiskEvolution::new(&config).expect("engine");
        let mx = config.binary.mx_grams();
        let r_out = tidal_radius(mx, config.binary.mopt_grams(), config.binary.period_seconds());
        assert_eq!(engine.grid().len(), 120);
        assert!((engine.grid().r_out() - r_out).abs() / r_out < 1e-12);
        assert!((engine.grid().r_in() - r_isco(0.0, mx)).abs() / engine.grid().r_in() < 1e-12);
        assert_eq!(engine.steps(), 0);
        assert_eq!(engine.torque()[0], 0.0);
    }

    #[test]
    fn test_rejects_inverted_radii() {
        let mut config = quick_config();
        config.binary.r_in = Some(1e6);
        config.binary.r_out = Some(0.01);
        let err = DiskEvolution::new(&config).expect_err("r_in above r_out");
        assert!(matches!(err, FreddiError::ConfigError(_)));
    }

    #[test]
    fn test_step_advances_time_and_keeps_torque_positive() {
        let mut engine = DiskEvolution::new(&quick_config()).expect("engine");
        let record = engine.step().expect("first step");
        assert_eq!(record.step, 0);
        assert_eq!(record.time, 0.0);
        assert!(record.mdot_in.is_finite() && record.mdot_in > 0.0);
        assert!(record.m_disk > 0.0);
        assert_eq!(record.magnitudes.len(), 6);
        assert!(engine.torque().iter().skip(1).all(|&v| v > 0.0));
        assert_eq!(engine.state().mdot_in, record.mdot_in);
    }

    #[test]
    fn test_run_reaches_horizon() {
        let mut engine = DiskEvolution::new(&quick_config()).expect("engine");
        let mut times = Vec::new();
        let mut indices = Vec::new();
        let summary = engine
            .run(|record, _| {
                times.push(record.time / DAY);
                indices.push(record.step);
                Ok(())
            })
            .expect("run");
        assert_eq!(summary.termination, Termination::Horizon);
        assert_eq!(summary.steps, 9);
        assert_eq!(indices, (0..9).collect::<Vec<_>>());
        for (k, t) in times.iter().enumerate() {
            assert!((t - 0.25 * k as f64).abs() < 1e-12, "t[{k}] = {t}");
        }
        assert_eq!(engine.steps(), 9);
        assert!((engine.time() / DAY - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_teff_boundary_truncates_grid() {
        let mut config = quick_config();
        config.disk.boundary = BoundaryCondition::Teff { t_hot: 1e4 };
        config.disk.initial = InitialCondition::PowerF {
            f0: 1e36,
            order: 6.0,
        };
        let mut engine = DiskEvolution::new(&config).expect("engine");
        let capacity = engine.grid().capacity();
        let mut lengths = vec![capacity];
        engine
            .run(|_, disk| {
                lengths.push(disk.grid().len());
                Ok(())
            })
            .expect("run");
        assert!(lengths.windows(2).all(|w| w[1] <= w[0]));
        let len = engine.grid().len();
        let tph = &engine.fields().tph;
        if len < capacity {
            assert!(tph[len - 1] >= 1e4 || len == 2);
        }
    }

    #[test]
    fn test_callback_error_propagates() {
        let mut engine = DiskEvolution::new(&quick_config()).expect("engine");
        let err = engine
            .run(|_, _| Err(FreddiError::PhysicsViolation("stop".to_string())))
            .expect_err("callback error");
        assert!(matches!(err, FreddiError::PhysicsViolation(_)));
        assert_eq!(engine.steps(), 1);
    }
}

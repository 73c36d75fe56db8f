// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — State
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
use ndarray::{s, Array1, ArrayView1};

use crate::config::GridScale;
use crate::error::{FreddiError, FreddiResult};

/// Specific angular momentum grid `h` and the matching radii `R = h²/GM`.
///
/// Storage is allocated once at full capacity. The hot disk only ever
/// shrinks, so truncation moves the active length and nothing is reallocated.
#[derive(Debug, Clone)]
pub struct Grid {
    h: Array1<f64>,
    r: Array1<f64>,
    len: usize,
    gm: f64,
}

impl Grid {
    /// Build `n` points from `h_in` to `h_out` inclusive.
    pub fn new(h_in: f64, h_out: f64, n: usize, scale: GridScale, gm: f64) -> FreddiResult<Self> {
        if n < 2 {
            return Err(FreddiError::ConfigError(format!(
                "grid needs at least 2 points, got {n}"
            )));
        }
        if !h_in.is_finite() || !h_out.is_finite() || h_in >= h_out {
            return Err(FreddiError::ConfigError(format!(
                "grid bounds must be finite with h_in < h_out, got [{h_in}, {h_out}]"
            )));
        }
        if !gm.is_finite() || gm <= 0.0 {
            return Err(FreddiError::ConfigError(format!(
                "GM must be finite and > 0, got {gm}"
            )));
        }
        let last = (n - 1) as f64;
        let h = match scale {
            GridScale::Log => {
                if h_in <= 0.0 {
                    return Err(FreddiError::ConfigError(format!(
                        "log grid requires h_in > 0, got {h_in}"
                    )));
                }
                let ratio = h_out / h_in;
                Array1::from_shape_fn(n, |i| h_in * ratio.powf(i as f64 / last))
            }
            GridScale::Linear => {
                Array1::from_shape_fn(n, |i| h_in + (h_out - h_in) * i as f64 / last)
            }
        };
        let mut h = h;
        // pin the end points against rounding in powf
        h[0] = h_in;
        h[n - 1] = h_out;
        let r = h.mapv(|hi| hi * hi / gm);
        Ok(Grid { h, r, len: n, gm })
    }

    /// Active number of points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a grid keeps at least two points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.h.len()
    }

    pub fn gm(&self) -> f64 {
        self.gm
    }

    pub fn h(&self) -> ArrayView1<'_, f64> {
        self.h.slice(s![..self.len])
    }

    pub fn r(&self) -> ArrayView1<'_, f64> {
        self.r.slice(s![..self.len])
    }

    pub fn h_in(&self) -> f64 {
        self.h[0]
    }

    pub fn h_out(&self) -> f64 {
        self.h[self.len - 1]
    }

    pub fn r_in(&self) -> f64 {
        self.r[0]
    }

    pub fn r_out(&self) -> f64 {
        self.r[self.len - 1]
    }

    /// Shrink the active range to `new_len` points.
    ///
    /// # Panics
    /// If `new_len` is below 2 or above the current length.
    pub fn truncate(&mut self, new_len: usize) {
        assert!(
            (2..=self.len).contains(&new_len),
            "truncate to {new_len} outside [2, {}]",
            self.len
        );
        self.len = new_len;
    }
}

/// Per-step radial fields derived from the torque profile.
///
/// Arrays have the grid capacity; only the active prefix is meaningful and
/// index 0 (the inner edge) always holds zeros.
#[derive(Debug, Clone)]
pub struct DerivedFields {
    pub w: Array1<f64>,
    pub sigma: Array1<f64>,
    pub height: Array1<f64>,
    pub tph_vis: Array1<f64>,
    pub tph_x: Array1<f64>,
    pub tirr: Array1<f64>,
    pub tph: Array1<f64>,
    pub c_irr: Array1<f64>,
}

impl DerivedFields {
    pub fn new(capacity: usize) -> Self {
        DerivedFields {
            w: Array1::zeros(capacity),
            sigma: Array1::zeros(capacity),
            height: Array1::zeros(capacity),
            tph_vis: Array1::zeros(capacity),
            tph_x: Array1::zeros(capacity),
            tirr: Array1::zeros(capacity),
            tph: Array1::zeros(capacity),
            c_irr: Array1::zeros(capacity),
        }
    }

    pub fn clear(&mut self) {
        for field in [
            &mut self.w,
            &mut self.sigma,
            &mut self.height,
            &mut self.tph_vis,
            &mut self.tph_x,
            &mut self.tirr,
            &mut self.tph,
            &mut self.c_irr,
        ] {
            field.fill(0.0);
        }
    }
}

/// Accretion rates carried between steps [g/s] and the last irradiation
/// factor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundaryState {
    pub mdot_in: f64,
    pub mdot_in_prev: f64,
    pub mdot_out: f64,
    pub c_irr: f64,
}

/// Immutable per-step summary.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    /// [s]
    pub time: f64,
    /// [g/s]
    pub mdot_in: f64,
    /// [erg/s]
    pub lx: f64,
    pub h_to_r_out: f64,
    /// [cm]
    pub r_out: f64,
    /// [K]
    pub tph_out: f64,
    /// [g]
    pub m_disk: f64,
    pub c_irr: f64,
    pub qirr_to_qvis_out: f64,
    /// One per configured band, in band order.
    pub magnitudes: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_grid_end_points_and_ratio() {
        let grid = Grid::new(1.0, 100.0, 11, GridScale::Log, 1.0).expect("valid grid");
        let h = grid.h();
        assert_eq!(h[0], 1.0);
        assert_eq!(h[10], 100.0);
        let ratio = h[1] / h[0];
        for i in 1..10 {
            assert!((h[i + 1] / h[i] - ratio).abs() < 1e-12);
        }
        assert!((grid.r()[10] - 1e4).abs() < 1e-9);
    }

    #[test]
    fn test_linear_grid_constant_step() {
        let grid = Grid::new(2.0, 12.0, 6, GridScale::Linear, 4.0).expect("valid grid");
        let h = grid.h();
        for i in 0..5 {
            assert!((h[i + 1] - h[i] - 2.0).abs() < 1e-12);
        }
        assert!((grid.r_in() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_invalid_grids() {
        assert!(Grid::new(1.0, 2.0, 1, GridScale::Log, 1.0).is_err());
        assert!(Grid::new(2.0, 1.0, 10, GridScale::Linear, 1.0).is_err());
        assert!(Grid::new(0.0, 1.0, 10, GridScale::Log, 1.0).is_err());
        assert!(Grid::new(f64::NAN, 1.0, 10, GridScale::Linear, 1.0).is_err());
        assert!(Grid::new(0.0, 1.0, 10, GridScale::Linear, 1.0).is_ok());
    }

    #[test]
    fn test_truncate_moves_active_length_only() {
        let mut grid = Grid::new(1.0, 10.0, 10, GridScale::Linear, 1.0).expect("valid grid");
        grid.truncate(4);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.capacity(), 10);
        assert_eq!(grid.h().len(), 4);
        assert!((grid.h_out() - 4.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn test_truncate_cannot_grow() {
        let mut grid = Grid::new(1.0, 10.0, 10, GridScale::Linear, 1.0).expect("valid grid");
        grid.truncate(4);
        grid.truncate(5);
    }

    #[test]
    #[should_panic]
    fn test_truncate_keeps_two_points() {
        let mut grid = Grid::new(1.0, 10.0, 10, GridScale::Linear, 1.0).expect("valid grid");
        grid.truncate(1);
    }

    #[test]
    fn test_derived_fields_clear() {
        let mut fields = DerivedFields::new(5);
        fields.tph.fill(3.0);
        fields.clear();
        assert!(fields.tph.iter().all(|&t| t == 0.0));
        assert_eq!(fields.sigma.len(), 5);
    }
}

// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Property-Based Tests (proptest) for freddi-types
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for freddi-types using proptest.
//!
//! Covers: grid construction invariants, truncation, configuration
//! serialization roundtrip.

use freddi_types::config::{DiskConfig, GridScale, InitialCondition, TorqueNormalization};
use freddi_types::state::Grid;
use proptest::prelude::*;

// ── Grid Construction Invariants ─────────────────────────────────────

proptest! {
    /// Log grids are strictly increasing with exact end points and a
    /// constant ratio between neighbours.
    #[test]
    fn log_grid_invariants(
        n in 2usize..400,
        h_in in 1e15f64..1e17,
        span in 1.5f64..1e3,
    ) {
        let h_out = h_in * span;
        let grid = Grid::new(h_in, h_out, n, GridScale::Log, 1.3e27).unwrap();
        let h = grid.h();
        prop_assert_eq!(h.len(), n);
        prop_assert_eq!(h[0], h_in);
        prop_assert_eq!(h[n - 1], h_out);
        let ratio = (h_out / h_in).powf(1.0 / (n - 1) as f64);
        for i in 0..n - 1 {
            prop_assert!(h[i + 1] > h[i]);
            prop_assert!((h[i + 1] / h[i] - ratio).abs() < 1e-9 * ratio);
        }
    }

    /// Linear grids have a constant difference between neighbours.
    #[test]
    fn linear_grid_invariants(
        n in 2usize..400,
        h_in in 0.0f64..1e17,
        width in 1e14f64..1e18,
    ) {
        let h_out = h_in + width;
        let grid = Grid::new(h_in, h_out, n, GridScale::Linear, 1.3e27).unwrap();
        let h = grid.h();
        let step = width / (n - 1) as f64;
        for i in 0..n - 1 {
            prop_assert!(h[i + 1] > h[i]);
            prop_assert!((h[i + 1] - h[i] - step).abs() < 1e-9 * step);
        }
    }

    /// Radii follow R = h²/GM on the whole active range.
    #[test]
    fn radii_match_angular_momentum(n in 2usize..100, gm in 1e25f64..1e28) {
        let grid = Grid::new(1e16, 1e18, n, GridScale::Log, gm).unwrap();
        for (h, r) in grid.h().iter().zip(grid.r().iter()) {
            prop_assert!((r - h * h / gm).abs() <= 1e-12 * r);
        }
    }

    /// Truncation never grows the grid and keeps the inner part untouched.
    #[test]
    fn truncation_keeps_prefix(n in 3usize..200, cut in 2usize..200) {
        let cut = cut.min(n);
        let mut grid = Grid::new(1.0, 2.0, n, GridScale::Linear, 1.0).unwrap();
        let before: Vec<f64> = grid.h().iter().copied().take(cut).collect();
        grid.truncate(cut);
        prop_assert_eq!(grid.len(), cut);
        prop_assert_eq!(grid.capacity(), n);
        prop_assert_eq!(grid.h().to_vec(), before);
    }
}

// ── Configuration Roundtrip ──────────────────────────────────────────

proptest! {
    /// Any valid configuration survives a JSON roundtrip unchanged.
    #[test]
    fn config_json_roundtrip(
        mx in 1.0f64..30.0,
        alpha in 0.01f64..1.0,
        nx in 2usize..5000,
        mdot0 in 1e15f64..1e20,
        use_log in any::<bool>(),
    ) {
        let mut cfg = DiskConfig::default();
        cfg.binary.mx = mx;
        cfg.disk.alpha = alpha;
        cfg.disk.initial = InitialCondition::Quasistat {
            normalization: TorqueNormalization::AccretionRate(mdot0),
        };
        cfg.numerics.nx = nx;
        cfg.numerics.grid_scale = if use_log { GridScale::Log } else { GridScale::Linear };

        let json = cfg.to_json_pretty().unwrap();
        let back = DiskConfig::from_json_str(&json).unwrap();
        prop_assert_eq!(back, cfg);
    }
}

// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Freddi Math
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Numerical primitives for the Freddi disk evolution engine.

pub mod interp;
pub mod quadrature;
pub mod tridiag;

// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Freddi Core
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Disk evolution engine.
//!
//! Leaves first: opacity closure, initial torque profiles, implicit
//! diffusion step, radiative fields, outer boundary tracking, and the
//! time loop that ties them together.

pub mod boundary;
pub mod closure;
pub mod diffusion;
pub mod evolution;
pub mod initial;
pub mod opacity;
pub mod orbit;
pub mod radiation;
pub mod spectrum;

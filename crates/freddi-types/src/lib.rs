// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Freddi Types
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
pub mod config;
pub mod constants;
pub mod error;
pub mod state;

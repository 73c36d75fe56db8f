// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Error Types
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreddiError {
    #[error("Solver diverged at iteration {iteration}: {message}")]
    SolverDiverged { iteration: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Linear algebra error: {0}")]
    LinAlg(String),
}

impl FreddiError {
    /// True for failures that end a run early but keep already emitted output.
    pub fn is_numerical(&self) -> bool {
        matches!(self, FreddiError::SolverDiverged { .. })
    }
}

pub type FreddiResult<T> = Result<T, FreddiError>;

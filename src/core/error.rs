//! Error types for BSM Options

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BsmError {
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Implied volatility: {0}")]
    Convergence(#[from] ConvergenceFailure),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type BsmResult<T> = Result<T, BsmError>;

impl BsmError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Name of the offending field, if this is an input error
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Why the implied volatility iteration stopped without an answer.
///
/// These are ordinary outcomes for a caller to handle, distinct from a
/// volatility of zero.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "failure", rename_all = "snake_case")]
pub enum ConvergenceFailure {
    /// Price is insensitive to volatility at the trial point.
    #[error("vega is zero at iteration {iteration} (trial sigma {sigma})")]
    ZeroVega { iteration: usize, sigma: f64 },

    #[error("no convergence after {iterations} iterations (last sigma {last_sigma})")]
    NotConverged { iterations: usize, last_sigma: f64 },
}

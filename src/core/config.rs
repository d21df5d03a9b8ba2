//! Configuration for the implied volatility solver

use serde::{Deserialize, Serialize};

use super::{BsmError, BsmResult};

/// Newton-Raphson solver settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Iteration cap
    /// Default: 1000
    pub max_iterations: usize,

    /// Absolute tolerance on successive decimal volatilities
    /// Default: 1e-5 (0.001 percentage points)
    pub tolerance: f64,

    /// Starting volatility (decimal)
    /// Default: 0.30
    pub initial_guess: f64,

    /// Optional clamp applied to each Newton step, as (low, high) decimals.
    /// Default: None (steps are unconstrained)
    pub vol_bounds: Option<(f64, f64)>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-5,
            initial_guess: 0.30,
            vol_bounds: None,
        }
    }
}

impl SolverConfig {
    /// Default settings with trial volatility kept inside [0.01%, 500%]
    pub fn bounded() -> Self {
        Self {
            vol_bounds: Some((0.0001, 5.0)),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> BsmResult<()> {
        if self.max_iterations == 0 {
            return Err(BsmError::invalid_input("max_iterations", "must be at least 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(BsmError::invalid_input("tolerance", "must be a positive number"));
        }
        if !(self.initial_guess.is_finite() && self.initial_guess > 0.0) {
            return Err(BsmError::invalid_input("initial_guess", "must be a positive number"));
        }
        if let Some((low, high)) = self.vol_bounds {
            if !(low.is_finite() && high.is_finite() && low > 0.0 && low < high) {
                return Err(BsmError::invalid_input(
                    "vol_bounds",
                    format!("expected 0 < low < high, got ({low}, {high})"),
                ));
            }
        }
        Ok(())
    }

    /// Parse settings from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> BsmResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BsmError::serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

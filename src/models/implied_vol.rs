//! Implied volatility solver
//!
//! Newton-Raphson on volatility using the Black-Scholes-Merton price and
//! vega. Each solve owns its trial contract, so queries can be solved from
//! any number of threads with one shared solver.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::black_scholes::{derived_terms, model_price, vega};
use crate::core::{
    BsmResult, ConvergenceFailure, ImpliedVolatilityQuery, SolverConfig, PERCENT_PER_UNIT,
};

/// Volatility in percentage points
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    pub fn from_decimal(value: f64) -> Self {
        Self(value * PERCENT_PER_UNIT)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn to_decimal(&self) -> f64 {
        self.0 / PERCENT_PER_UNIT
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}%", self.0)
    }
}

/// Newton-Raphson implied volatility solver
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolatilitySolver {
    config: SolverConfig,
}

impl ImpliedVolatilitySolver {
    pub fn new(config: SolverConfig) -> BsmResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the volatility that reproduces the query's market price.
    ///
    /// Fails with `ZeroVega` as soon as the price stops responding to
    /// volatility (expired or far out of the money), and with
    /// `NotConverged` when the iteration cap is reached or a step leaves
    /// the real line.
    pub fn solve(&self, query: &ImpliedVolatilityQuery) -> Result<Percent, ConvergenceFailure> {
        let config = &self.config;
        let market_price = query.market_price();

        let mut sigma_guess = config.initial_guess;
        let mut trial = query.trial_contract(sigma_guess);

        for iteration in 0..config.max_iterations {
            trial = trial.with_trial_sigma(sigma_guess);

            let terms = derived_terms(&trial);
            let price = model_price(&trial, &terms);
            // Newton needs dPrice/dσ per unit of vol, not per percentage point
            let vega = vega(&trial, &terms) * PERCENT_PER_UNIT;

            tracing::trace!(iteration, sigma = sigma_guess, price, vega, "newton step");

            if vega == 0.0 {
                tracing::warn!(
                    iteration,
                    sigma = sigma_guess,
                    "vega is zero, implied volatility undefined"
                );
                return Err(ConvergenceFailure::ZeroVega {
                    iteration,
                    sigma: sigma_guess,
                });
            }

            let raw_next = sigma_guess - (price - market_price) / vega;
            if !raw_next.is_finite() {
                tracing::warn!(iteration, sigma = sigma_guess, "newton step diverged");
                return Err(ConvergenceFailure::NotConverged {
                    iterations: iteration + 1,
                    last_sigma: sigma_guess,
                });
            }

            // Convergence is judged on the unclamped step so a guess pinned
            // at a bound is never reported as a solution.
            let converged = (sigma_guess - raw_next).abs() < config.tolerance;
            let sigma_next = match config.vol_bounds {
                Some((low, high)) => raw_next.clamp(low, high),
                None => raw_next,
            };

            if converged {
                tracing::debug!(
                    iterations = iteration + 1,
                    sigma = sigma_next,
                    "implied volatility converged"
                );
                return Ok(Percent::from_decimal(sigma_next));
            }

            sigma_guess = sigma_next;
        }

        tracing::warn!(
            iterations = config.max_iterations,
            last_sigma = sigma_guess,
            "implied volatility did not converge"
        );
        Err(ConvergenceFailure::NotConverged {
            iterations: config.max_iterations,
            last_sigma: sigma_guess,
        })
    }

    /// Solve and wrap the outcome for presentation
    pub fn report(&self, query: &ImpliedVolatilityQuery) -> ImpliedVolatilityReport {
        ImpliedVolatilityReport::from(self.solve(query))
    }
}

/// Solve with the default settings (start at 30%, tolerance 1e-5, 1000 iterations)
pub fn solve_implied_volatility(
    query: &ImpliedVolatilityQuery,
) -> Result<Percent, ConvergenceFailure> {
    ImpliedVolatilitySolver::default().solve(query)
}

/// Outcome of a solve: a volatility, or the reason there is none
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImpliedVolatility {
    Solved(Percent),
    Failed(ConvergenceFailure),
}

impl ImpliedVolatility {
    pub fn solved(&self) -> Option<Percent> {
        match self {
            ImpliedVolatility::Solved(p) => Some(*p),
            ImpliedVolatility::Failed(_) => None,
        }
    }
}

/// Serializes as `{"implied_volatility": 20.0}` or
/// `{"implied_volatility": {"failure": "zero_vega", ...}}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpliedVolatilityReport {
    pub implied_volatility: ImpliedVolatility,
}

impl From<Result<Percent, ConvergenceFailure>> for ImpliedVolatilityReport {
    fn from(result: Result<Percent, ConvergenceFailure>) -> Self {
        let implied_volatility = match result {
            Ok(p) => ImpliedVolatility::Solved(p),
            Err(f) => ImpliedVolatility::Failed(f),
        };
        Self { implied_volatility }
    }
}

//! Core data types for BSM Options
//!
//! Defines fundamental types:
//! - OptionContract / ImpliedVolatilityQuery: contract terms and unit conventions
//! - Greeks / PricingResult: model outputs
//! - SolverConfig: implied volatility settings
//! - BsmError / ConvergenceFailure: error taxonomy

pub mod config;
pub mod error;
pub mod greeks;
pub mod option;

pub use config::*;
pub use error::*;
pub use greeks::*;
pub use option::*;

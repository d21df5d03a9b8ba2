//! # BSM Options - Black-Scholes-Merton pricing and implied volatility
//!
//! Closed-form European option pricing with a continuous dividend yield,
//! the five standard Greeks, and a Newton-Raphson implied volatility solver.
//!
//! ## Units
//!
//! Contracts are stored in model units (decimal rates, years). The
//! `from_market_units` constructors and the plain accessors use the units a
//! form or CLI collects: rates, yields and volatility in percentage points,
//! time in calendar days (`decimal = percent / 100`, `years = days / 365`).
//!
//! ## Usage
//!
//! ```rust
//! use bsm_options::prelude::*;
//!
//! // 100/100 call, 5% rate, half a year, 20% vol, no dividends
//! let contract =
//!     OptionContract::from_market_units(OptionType::Call, 100.0, 100.0, 5.0, 182.5, 20.0, 0.0)
//!         .unwrap();
//! let result = price_and_greeks(&contract).unwrap();
//! assert!((result.call_price - 6.89).abs() < 0.01);
//!
//! // Back out the volatility from the call price
//! let query = ImpliedVolatilityQuery::from_market_units(
//!     OptionType::Call, 100.0, 100.0, 5.0, 182.5, 0.0, result.call_price,
//! )
//! .unwrap();
//! let iv = solve_implied_volatility(&query).unwrap();
//! assert!((iv.value() - 20.0).abs() < 1e-3);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Price American or path-dependent options
//! - Stochastic volatility or volatility surface calibration
//! - Numerical integration or Monte Carlo simulation

pub mod core;
pub mod models;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        BsmError, BsmResult, ConvergenceFailure, Greeks, ImpliedVolatilityQuery, OptionContract,
        OptionType, PricingResult, SolverConfig,
    };

    // Models
    pub use crate::models::{
        derived_terms, norm_cdf, norm_pdf, price_and_greeks, solve_implied_volatility,
        DerivedTerms, ImpliedVolatility, ImpliedVolatilityReport, ImpliedVolatilitySolver,
        Percent,
    };
}

// Re-export main types at crate root
pub use crate::core::{BsmError, BsmResult};
pub use crate::models::{price_and_greeks, solve_implied_volatility};

//! Pricing models
//!
//! Implements:
//! - Black-Scholes-Merton (prices, Greeks, d1/d2 building blocks)
//! - Implied volatility (Newton-Raphson inverse of the BSM price)

pub mod black_scholes;
pub mod implied_vol;

pub use black_scholes::*;
pub use implied_vol::*;

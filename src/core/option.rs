//! Option contract definitions
//!
//! Contracts are held in model units (decimal rates, years). Accessors named
//! after the market convention (`rate()`, `days()`, `volatility()`) return
//! percentage points and calendar days, the units a form or CLI works in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{BsmError, BsmResult};

/// Calendar days per year used for `years = days / 365`
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Percentage points per unit, `decimal = percent / 100`
pub const PERCENT_PER_UNIT: f64 = 100.0;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl FromStr for OptionType {
    type Err = BsmError;

    /// Accepts "call"/"c" and "put"/"p" in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(BsmError::invalid_input(
                "option_type",
                format!("unrecognized option type {other:?}"),
            )),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("call"),
            OptionType::Put => f.write_str("put"),
        }
    }
}

fn finite(field: &'static str, value: f64) -> BsmResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BsmError::invalid_input(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> BsmResult<f64> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(BsmError::invalid_input(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> BsmResult<f64> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(BsmError::invalid_input(field, format!("must not be negative, got {value}")))
    }
}

/// European option contract with a known volatility
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionContract {
    option_type: OptionType,
    /// Spot price
    spot: f64,
    /// Strike price
    strike: f64,
    /// Continuously compounded risk-free rate (decimal)
    rate: f64,
    /// Time to expiry in years
    time: f64,
    /// Annualized volatility (decimal)
    sigma: f64,
    /// Continuous dividend yield (decimal)
    dividend_yield: f64,
}

impl OptionContract {
    /// Create a contract from model units (decimals and years)
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        sigma: f64,
        dividend_yield: f64,
    ) -> BsmResult<Self> {
        let contract = Self {
            option_type,
            spot,
            strike,
            rate,
            time,
            sigma,
            dividend_yield,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Create a contract from market units: rate, volatility and yield in
    /// percentage points, time in calendar days
    pub fn from_market_units(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate_pct: f64,
        days: f64,
        sigma_pct: f64,
        dividend_pct: f64,
    ) -> BsmResult<Self> {
        Self::new(
            option_type,
            spot,
            strike,
            rate_pct / PERCENT_PER_UNIT,
            days / DAYS_PER_YEAR,
            sigma_pct / PERCENT_PER_UNIT,
            dividend_pct / PERCENT_PER_UNIT,
        )
    }

    /// Check the pricing preconditions, naming the first offending field
    pub fn validate(&self) -> BsmResult<()> {
        positive("spot", self.spot)?;
        positive("strike", self.strike)?;
        finite("rate", self.rate)?;
        non_negative("dividend_yield", self.dividend_yield)?;
        non_negative("time", self.time)?;
        non_negative("sigma", self.sigma)?;
        Ok(())
    }

    /// Same contract at another (decimal) volatility
    pub fn with_volatility(&self, sigma: f64) -> BsmResult<Self> {
        Self::new(
            self.option_type,
            self.spot,
            self.strike,
            self.rate,
            self.time,
            sigma,
            self.dividend_yield,
        )
    }

    /// Trial point for root finding; the volatility is not range-checked
    /// because Newton steps may leave the positive half-line.
    pub(crate) fn with_trial_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Risk-free rate in percentage points
    pub fn rate(&self) -> f64 {
        self.rate * PERCENT_PER_UNIT
    }

    /// Dividend yield in percentage points
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield * PERCENT_PER_UNIT
    }

    /// Time to expiry in calendar days
    pub fn days(&self) -> f64 {
        self.time * DAYS_PER_YEAR
    }

    /// Volatility in percentage points
    pub fn volatility(&self) -> f64 {
        self.sigma * PERCENT_PER_UNIT
    }

    pub fn rate_decimal(&self) -> f64 {
        self.rate
    }

    pub fn dividend_yield_decimal(&self) -> f64 {
        self.dividend_yield
    }

    pub fn years(&self) -> f64 {
        self.time
    }

    pub fn sigma_decimal(&self) -> f64 {
        self.sigma
    }

    /// Has the contract expired (no time value left)?
    pub fn is_expired(&self) -> bool {
        self.time == 0.0
    }
}

/// Market observation of an option whose volatility is to be solved for
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpliedVolatilityQuery {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    dividend_yield: f64,
    /// Observed option price
    market_price: f64,
}

impl ImpliedVolatilityQuery {
    /// Create a query from model units (decimals and years)
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        dividend_yield: f64,
        market_price: f64,
    ) -> BsmResult<Self> {
        let query = Self {
            option_type,
            spot,
            strike,
            rate,
            time,
            dividend_yield,
            market_price,
        };
        query.validate()?;
        Ok(query)
    }

    /// Create a query from market units (percentage points, calendar days)
    pub fn from_market_units(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate_pct: f64,
        days: f64,
        dividend_pct: f64,
        market_price: f64,
    ) -> BsmResult<Self> {
        Self::new(
            option_type,
            spot,
            strike,
            rate_pct / PERCENT_PER_UNIT,
            days / DAYS_PER_YEAR,
            dividend_pct / PERCENT_PER_UNIT,
            market_price,
        )
    }

    pub fn validate(&self) -> BsmResult<()> {
        positive("spot", self.spot)?;
        positive("strike", self.strike)?;
        finite("rate", self.rate)?;
        non_negative("dividend_yield", self.dividend_yield)?;
        non_negative("time", self.time)?;
        non_negative("market_price", self.market_price)?;
        Ok(())
    }

    /// Contract sharing this query's terms at the given trial volatility
    pub(crate) fn trial_contract(&self, sigma: f64) -> OptionContract {
        OptionContract {
            option_type: self.option_type,
            spot: self.spot,
            strike: self.strike,
            rate: self.rate,
            time: self.time,
            sigma,
            dividend_yield: self.dividend_yield,
        }
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Risk-free rate in percentage points
    pub fn rate(&self) -> f64 {
        self.rate * PERCENT_PER_UNIT
    }

    /// Dividend yield in percentage points
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield * PERCENT_PER_UNIT
    }

    /// Time to expiry in calendar days
    pub fn days(&self) -> f64 {
        self.time * DAYS_PER_YEAR
    }

    pub fn years(&self) -> f64 {
        self.time
    }

    pub fn market_price(&self) -> f64 {
        self.market_price
    }
}

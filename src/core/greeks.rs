//! Option Greeks and pricing results

use serde::{Deserialize, Serialize};

use super::OptionType;

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt (time decay per calendar day)
    pub theta: f64,
    /// Vega: dV/dσ (per 1% vol move)
    pub vega: f64,
    /// Rho: dV/dr (per 1% rate move)
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }
}

/// Prices and Greeks for one contract.
///
/// Serializes to the flat metric mapping (`call_price`, `put_price`,
/// `delta_value`, ...) consumed by presentation layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub call_price: f64,
    pub put_price: f64,
    #[serde(rename = "delta_value")]
    pub delta: f64,
    #[serde(rename = "gamma_value")]
    pub gamma: f64,
    #[serde(rename = "theta_value")]
    pub theta: f64,
    #[serde(rename = "vega_value")]
    pub vega: f64,
    #[serde(rename = "rho_value")]
    pub rho: f64,
}

impl PricingResult {
    pub fn new(call_price: f64, put_price: f64, greeks: Greeks) -> Self {
        Self {
            call_price,
            put_price,
            delta: greeks.delta,
            gamma: greeks.gamma,
            theta: greeks.theta,
            vega: greeks.vega,
            rho: greeks.rho,
        }
    }

    pub fn greeks(&self) -> Greeks {
        Greeks::new(self.delta, self.gamma, self.theta, self.vega, self.rho)
    }

    /// Theoretical price for the given side
    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }

    /// Metric name / value pairs in display order
    pub fn metrics(&self) -> [(&'static str, f64); 7] {
        [
            ("call_price", self.call_price),
            ("put_price", self.put_price),
            ("delta_value", self.delta),
            ("gamma_value", self.gamma),
            ("theta_value", self.theta),
            ("vega_value", self.vega),
            ("rho_value", self.rho),
        ]
    }
}

//! Black-Scholes-Merton Model
//!
//! Provides:
//! - European option pricing with continuous dividend yield
//! - Greeks computation (theta per day, vega and rho per 1% move)
//! - The building blocks (d1/d2 and normal terms) reused by the
//!   implied volatility solver
//!
//! Expired contracts (t = 0) never divide by zero: d1 and d2 are taken as
//! +∞ and every quantity uses its closed-form boundary value.

use std::f64::consts::{PI, SQRT_2};

use serde::Serialize;
use statrs::function::erf::erfc;

use crate::core::{BsmResult, Greeks, OptionContract, OptionType, PricingResult};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    if x == f64::INFINITY {
        1.0
    } else if x == f64::NEG_INFINITY {
        0.0
    } else {
        0.5 * erfc(-x / SQRT_2)
    }
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// d1, d2 and the standard normal terms derived from them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedTerms {
    pub d1: f64,
    pub d2: f64,
    /// Φ(d1)
    pub cdf_d1: f64,
    /// φ(d1)
    pub pdf_d1: f64,
    /// Φ(d2)
    pub cdf_d2: f64,
    /// Φ(-d1)
    pub cdf_neg_d1: f64,
    /// Φ(-d2)
    pub cdf_neg_d2: f64,
}

impl DerivedTerms {
    fn from_d(d1: f64, d2: f64) -> Self {
        Self {
            d1,
            d2,
            cdf_d1: norm_cdf(d1),
            pdf_d1: norm_pdf(d1),
            cdf_d2: norm_cdf(d2),
            cdf_neg_d1: norm_cdf(-d1),
            cdf_neg_d2: norm_cdf(-d2),
        }
    }
}

/// Compute d1/d2 and the normal terms for a contract
pub fn derived_terms(contract: &OptionContract) -> DerivedTerms {
    let time = contract.years();
    if time == 0.0 {
        return DerivedTerms::from_d(f64::INFINITY, f64::INFINITY);
    }

    let vol = contract.sigma_decimal();
    let vol_sqrt_t = vol * time.sqrt();
    let log_moneyness = (contract.spot() / contract.strike()).ln();
    let carry = contract.rate_decimal() - contract.dividend_yield_decimal();

    if vol_sqrt_t == 0.0 {
        // Zero vol: the terminal spot is the forward, so d is ±∞ by its side of the strike
        let drift = log_moneyness + carry * time;
        let d = if drift > 0.0 {
            f64::INFINITY
        } else if drift < 0.0 {
            f64::NEG_INFINITY
        } else {
            0.0
        };
        return DerivedTerms::from_d(d, d);
    }

    let d1 = (log_moneyness + (carry + 0.5 * vol * vol) * time) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    DerivedTerms::from_d(d1, d2)
}

fn dividend_discount(contract: &OptionContract) -> f64 {
    (-contract.dividend_yield_decimal() * contract.years()).exp()
}

fn rate_discount(contract: &OptionContract) -> f64 {
    (-contract.rate_decimal() * contract.years()).exp()
}

/// European call price
pub fn call_price(contract: &OptionContract, terms: &DerivedTerms) -> f64 {
    if contract.is_expired() {
        return OptionType::Call.intrinsic(contract.spot(), contract.strike());
    }
    terms.cdf_d1 * contract.spot() * dividend_discount(contract)
        - terms.cdf_d2 * contract.strike() * rate_discount(contract)
}

/// European put price
pub fn put_price(contract: &OptionContract, terms: &DerivedTerms) -> f64 {
    if contract.is_expired() {
        return OptionType::Put.intrinsic(contract.spot(), contract.strike());
    }
    contract.strike() * rate_discount(contract) * terms.cdf_neg_d2
        - contract.spot() * dividend_discount(contract) * terms.cdf_neg_d1
}

/// Price for the contract's own option type
pub fn model_price(contract: &OptionContract, terms: &DerivedTerms) -> f64 {
    match contract.option_type() {
        OptionType::Call => call_price(contract, terms),
        OptionType::Put => put_price(contract, terms),
    }
}

/// Delta. At expiry follows Natenberg's boundary rule: 0.5 / -0.5 at the
/// money, S > K gives 1 / 0 and S < K gives 0 / 1 (call / put).
pub fn delta(contract: &OptionContract, terms: &DerivedTerms) -> f64 {
    let option_type = contract.option_type();
    if contract.is_expired() {
        let (spot, strike) = (contract.spot(), contract.strike());
        return if spot == strike {
            match option_type {
                OptionType::Call => 0.5,
                OptionType::Put => -0.5,
            }
        } else if spot > strike {
            match option_type {
                OptionType::Call => 1.0,
                OptionType::Put => 0.0,
            }
        } else {
            match option_type {
                OptionType::Call => 0.0,
                OptionType::Put => 1.0,
            }
        };
    }

    match option_type {
        OptionType::Call => terms.cdf_d1 * dividend_discount(contract),
        OptionType::Put => -terms.cdf_neg_d1 * dividend_discount(contract),
    }
}

/// Gamma (same for call and put)
pub fn gamma(contract: &OptionContract, terms: &DerivedTerms) -> f64 {
    let vol_sqrt_t = contract.sigma_decimal() * contract.years().sqrt();
    if contract.is_expired() || vol_sqrt_t == 0.0 {
        return 0.0;
    }
    dividend_discount(contract) * terms.pdf_d1 / (contract.spot() * vol_sqrt_t)
}

/// Theta per calendar day
pub fn theta(contract: &OptionContract, terms: &DerivedTerms) -> f64 {
    if contract.is_expired() {
        return 0.0;
    }

    let (spot, strike) = (contract.spot(), contract.strike());
    let (rate, div) = (contract.rate_decimal(), contract.dividend_yield_decimal());
    let div_factor = dividend_discount(contract);
    let df = rate_discount(contract);

    let decay = -(spot * div_factor * contract.sigma_decimal() * terms.pdf_d1)
        / (2.0 * contract.years().sqrt());
    let theta = match contract.option_type() {
        OptionType::Call => {
            decay - rate * strike * df * terms.cdf_d2 + div * spot * div_factor * terms.cdf_d1
        }
        OptionType::Put => {
            decay + rate * strike * df * terms.cdf_neg_d2
                - div * spot * div_factor * terms.cdf_neg_d1
        }
    };
    theta / 365.0
}

/// Vega per 1% vol move (same for call and put)
pub fn vega(contract: &OptionContract, terms: &DerivedTerms) -> f64 {
    if contract.is_expired() {
        return 0.0;
    }
    contract.spot() * dividend_discount(contract) * contract.years().sqrt() * terms.pdf_d1 / 100.0
}

/// Rho per 1% rate move
pub fn rho(contract: &OptionContract, terms: &DerivedTerms) -> f64 {
    if contract.is_expired() {
        return 0.0;
    }
    let discounted_strike = contract.strike() * contract.years() * rate_discount(contract);
    match contract.option_type() {
        OptionType::Call => discounted_strike * terms.cdf_d2 / 100.0,
        OptionType::Put => -discounted_strike * terms.cdf_neg_d2 / 100.0,
    }
}

/// Black-Scholes-Merton Greeks for the contract's option type
pub fn greeks(contract: &OptionContract) -> BsmResult<Greeks> {
    contract.validate()?;
    let terms = derived_terms(contract);
    Ok(greeks_from_terms(contract, &terms))
}

fn greeks_from_terms(contract: &OptionContract, terms: &DerivedTerms) -> Greeks {
    Greeks::new(
        delta(contract, terms),
        gamma(contract, terms),
        theta(contract, terms),
        vega(contract, terms),
        rho(contract, terms),
    )
}

/// Call and put prices plus the Greeks for the contract's option type
pub fn price_and_greeks(contract: &OptionContract) -> BsmResult<PricingResult> {
    contract.validate()?;
    let terms = derived_terms(contract);

    Ok(PricingResult::new(
        call_price(contract, &terms),
        put_price(contract, &terms),
        greeks_from_terms(contract, &terms),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(option_type: OptionType, spot: f64, strike: f64, time: f64, vol: f64) -> OptionContract {
        OptionContract::new(option_type, spot, strike, 0.05, time, vol, 0.0).unwrap()
    }

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-10);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
        assert_eq!(norm_pdf(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_derived_terms_atm() {
        let c = contract(OptionType::Call, 100.0, 100.0, 0.5, 0.20);
        let t = derived_terms(&c);

        assert!((t.d1 - 0.2475).abs() < 1e-4);
        assert!((t.d2 - 0.1061).abs() < 1e-4);
        assert!((t.cdf_d1 + t.cdf_neg_d1 - 1.0).abs() < 1e-12);
        assert!((t.cdf_d2 + t.cdf_neg_d2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_expired_terms_are_infinite() {
        let c = contract(OptionType::Put, 90.0, 100.0, 0.0, 0.20);
        let t = derived_terms(&c);
        assert_eq!(t.d1, f64::INFINITY);
        assert_eq!(t.d2, f64::INFINITY);
    }

    #[test]
    fn test_bs_price() {
        // ATM call, 20% vol, 1 year, 5% rate
        let r = price_and_greeks(&contract(OptionType::Call, 100.0, 100.0, 1.0, 0.20)).unwrap();

        // Should be around 10.45 for these parameters
        assert!((r.call_price - 10.4506).abs() < 1e-3);
        assert!((r.put_price - 5.5735).abs() < 1e-3);
    }

    #[test]
    fn test_greeks() {
        let g = greeks(&contract(OptionType::Call, 100.0, 100.0, 1.0, 0.20)).unwrap();

        // ATM call delta should be around 0.5-0.7
        assert!(g.delta > 0.5 && g.delta < 0.7);
        assert!(g.gamma > 0.0);
        // Theta should be negative (time decay)
        assert!(g.theta < 0.0);
        assert!(g.vega > 0.0);
        assert!(g.rho > 0.0);

        let p = greeks(&contract(OptionType::Put, 100.0, 100.0, 1.0, 0.20)).unwrap();
        assert!((g.delta - p.delta - 1.0).abs() < 1e-12);
        assert!((g.gamma - p.gamma).abs() < 1e-15);
        assert!((g.vega - p.vega).abs() < 1e-15);
        assert!(p.rho < 0.0);
    }

    #[test]
    fn test_theta_with_dividends() {
        let c = OptionContract::new(OptionType::Call, 100.0, 100.0, 0.05, 0.5, 0.2, 0.03).unwrap();
        let p = OptionContract::new(OptionType::Put, 100.0, 100.0, 0.05, 0.5, 0.2, 0.03).unwrap();
        let tc = theta(&c, &derived_terms(&c));
        let tp = theta(&p, &derived_terms(&p));

        // Θc - Θp = (q·S·e^{-qt} - r·K·e^{-rt}) / 365
        let expected = (0.03 * 100.0 * (-0.015f64).exp() - 0.05 * 100.0 * (-0.025f64).exp()) / 365.0;
        assert!((tc - tp - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vol_is_discounted_intrinsic() {
        let c = contract(OptionType::Call, 110.0, 100.0, 1.0, 0.0);
        let r = price_and_greeks(&c).unwrap();

        let expected = 110.0 - 100.0 * (-0.05f64).exp();
        assert!((r.call_price - expected).abs() < 1e-12);
        assert!(r.put_price.abs() < 1e-12);
        assert_eq!(r.gamma, 0.0);
        assert_eq!(r.vega, 0.0);
        assert!((r.delta - 1.0).abs() < 1e-12);
        assert!(r.theta.is_finite());
    }

    #[test]
    fn test_rejects_invalid_contract() {
        let c = contract(OptionType::Call, 100.0, 100.0, 0.5, 0.2).with_trial_sigma(-0.1);
        let err = price_and_greeks(&c).unwrap_err();
        assert_eq!(err.field(), Some("sigma"));
    }
}

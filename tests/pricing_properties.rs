//! Black-Scholes-Merton property tests
//!
//! Put-call parity, expiry boundaries, monotonicity and implied volatility
//! round trips over small grids of contracts.

use bsm_options::prelude::*;

const SPOTS: [f64; 5] = [50.0, 90.0, 100.0, 110.0, 200.0];
const STRIKES: [f64; 4] = [80.0, 100.0, 105.0, 150.0];

fn contract(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    vol: f64,
    div: f64,
) -> OptionContract {
    OptionContract::new(option_type, spot, strike, rate, time, vol, div).expect("valid contract")
}

#[test]
fn put_call_parity_holds() {
    for &spot in &SPOTS {
        for &strike in &STRIKES {
            for &(rate, div) in &[(0.05, 0.0), (-0.01, 0.02), (0.08, 0.04)] {
                for &time in &[0.0, 0.01, 0.5, 2.0] {
                    for &vol in &[0.0, 0.05, 0.2, 0.8] {
                        let c = contract(OptionType::Call, spot, strike, rate, time, vol, div);
                        let r = price_and_greeks(&c).unwrap();
                        let lhs = r.call_price - r.put_price;
                        let rhs = if time == 0.0 {
                            spot - strike
                        } else {
                            spot * (-div * time).exp() - strike * (-rate * time).exp()
                        };
                        assert!(
                            (lhs - rhs).abs() < 1e-9,
                            "S={spot} K={strike} r={rate} q={div} t={time} vol={vol}: {lhs} vs {rhs}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn expiry_boundary() {
    for &spot in &SPOTS {
        for &strike in &STRIKES {
            for option_type in [OptionType::Call, OptionType::Put] {
                let r = price_and_greeks(&contract(option_type, spot, strike, 0.05, 0.0, 0.2, 0.01)).unwrap();
                assert_eq!(r.call_price, (spot - strike).max(0.0));
                assert_eq!(r.put_price, (strike - spot).max(0.0));
                assert_eq!(r.gamma, 0.0);
                assert_eq!(r.theta, 0.0);
                assert_eq!(r.vega, 0.0);
                assert_eq!(r.rho, 0.0);
            }
        }
    }
}

#[test]
fn expiry_delta_boundary() {
    let delta = |option_type, spot| {
        price_and_greeks(&contract(option_type, spot, 100.0, 0.05, 0.0, 0.2, 0.0))
            .unwrap()
            .delta
    };

    assert_eq!(delta(OptionType::Call, 100.0), 0.5);
    assert_eq!(delta(OptionType::Put, 100.0), -0.5);
    assert_eq!(delta(OptionType::Call, 120.0), 1.0);
    assert_eq!(delta(OptionType::Put, 120.0), 0.0);
    assert_eq!(delta(OptionType::Call, 80.0), 0.0);
    assert_eq!(delta(OptionType::Put, 80.0), 1.0);
}

#[test]
fn short_option_type_behaves_like_long_form_at_expiry() {
    let short: OptionType = "p".parse().unwrap();
    let long: OptionType = "put".parse().unwrap();
    let a = price_and_greeks(&contract(short, 100.0, 100.0, 0.05, 0.0, 0.2, 0.0)).unwrap();
    let b = price_and_greeks(&contract(long, 100.0, 100.0, 0.05, 0.0, 0.2, 0.0)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn prices_are_monotone_in_spot_and_strike() {
    let price = |spot, strike| {
        price_and_greeks(&contract(OptionType::Call, spot, strike, 0.03, 0.75, 0.3, 0.01)).unwrap()
    };

    let mut prev = price(50.0, 100.0);
    for i in 1..=30 {
        let next = price(50.0 + 5.0 * i as f64, 100.0);
        assert!(next.call_price >= prev.call_price);
        assert!(next.put_price <= prev.put_price);
        prev = next;
    }

    let mut prev = price(100.0, 50.0);
    for i in 1..=30 {
        let next = price(100.0, 50.0 + 5.0 * i as f64);
        assert!(next.call_price <= prev.call_price);
        assert!(next.put_price >= prev.put_price);
        prev = next;
    }
}

#[test]
fn concrete_scenario() {
    let c = OptionContract::from_market_units(OptionType::Call, 100.0, 100.0, 5.0, 182.5, 20.0, 0.0).unwrap();
    let terms = derived_terms(&c);
    let r = price_and_greeks(&c).unwrap();

    assert!((terms.d1 - 0.2475).abs() < 1e-4);
    assert!((terms.d2 - 0.1061).abs() < 1e-4);
    assert!((r.call_price - 6.89).abs() < 0.005);
    assert!((r.put_price - 4.42).abs() < 0.005);
    assert!((r.delta - 0.598).abs() < 0.001);
    assert!((r.vega - 0.273).abs() < 0.001);
    assert!(r.theta < 0.0);
}

#[test]
fn implied_volatility_round_trip() {
    let cases = [
        (OptionType::Call, 100.0, 0.5, 0.0),
        (OptionType::Put, 100.0, 0.5, 0.0),
        (OptionType::Call, 100.0, 1.0, 0.02),
        (OptionType::Put, 100.0, 0.25, 0.01),
    ];

    for (option_type, strike, time, div) in cases {
        for vol_pct in [5.0, 10.0, 20.0, 35.0, 50.0, 65.0, 80.0] {
            let c = contract(option_type, 100.0, strike, 0.05, time, vol_pct / 100.0, div);
            let price = price_and_greeks(&c).unwrap().price(option_type);

            let q = ImpliedVolatilityQuery::new(option_type, 100.0, strike, 0.05, time, div, price).unwrap();
            let iv = solve_implied_volatility(&q).unwrap();
            assert!(
                (iv.value() - vol_pct).abs() < 1e-3,
                "{option_type} K={strike} t={time}: {} vs {vol_pct}",
                iv.value()
            );
        }
    }
}

#[test]
fn implied_volatility_round_trip_away_from_the_money() {
    for (option_type, strike) in [(OptionType::Call, 110.0), (OptionType::Put, 90.0)] {
        for vol_pct in [15.0, 25.0, 40.0, 50.0] {
            let c = contract(option_type, 100.0, strike, 0.05, 0.5, vol_pct / 100.0, 0.0);
            let price = price_and_greeks(&c).unwrap().price(option_type);

            let q = ImpliedVolatilityQuery::new(option_type, 100.0, strike, 0.05, 0.5, 0.0, price).unwrap();
            let iv = solve_implied_volatility(&q).unwrap();
            assert!((iv.value() - vol_pct).abs() < 1e-3);
        }
    }
}

#[test]
fn expired_query_reports_zero_vega() {
    let q = ImpliedVolatilityQuery::from_market_units(OptionType::Call, 100.0, 90.0, 5.0, 0.0, 0.0, 10.0).unwrap();
    assert!(matches!(
        solve_implied_volatility(&q),
        Err(ConvergenceFailure::ZeroVega { .. })
    ));

    let json = serde_json::to_value(ImpliedVolatilitySolver::default().report(&q)).unwrap();
    assert_eq!(json["implied_volatility"]["failure"], "zero_vega");
}

#[test]
fn concurrent_solves_are_independent() {
    let solver = ImpliedVolatilitySolver::default();
    let queries: Vec<_> = [10.0, 20.0, 30.0, 40.0]
        .iter()
        .map(|&vol_pct| {
            let c = contract(OptionType::Call, 100.0, 100.0, 0.05, 0.5, vol_pct / 100.0, 0.0);
            let price = price_and_greeks(&c).unwrap().call_price;
            let q = ImpliedVolatilityQuery::new(OptionType::Call, 100.0, 100.0, 0.05, 0.5, 0.0, price).unwrap();
            (vol_pct, q)
        })
        .collect();

    std::thread::scope(|s| {
        for (vol_pct, q) in &queries {
            let solver = &solver;
            s.spawn(move || {
                let iv = solver.solve(q).unwrap();
                assert!((iv.value() - vol_pct).abs() < 1e-3);
            });
        }
    });
}

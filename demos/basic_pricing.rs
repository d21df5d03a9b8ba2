//! Example: Basic options pricing with Black-Scholes-Merton
//!
//! Run with: cargo run --example basic_pricing

use bsm_options::prelude::*;

fn main() -> BsmResult<()> {
    // Option parameters in market units
    let spot = 500.0;
    let strike = 505.0;
    let days = 91.25; // 3 months
    let rate = 5.0; // 5% risk-free rate
    let div = 1.0; // 1% dividend yield
    let vol = 20.0; // 20% volatility

    println!("=== Black-Scholes-Merton Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.0} days", days);
    println!("Rate:     {:.1}%", rate);
    println!("Div:      {:.1}%", div);
    println!("Vol:      {:.1}%\n", vol);

    let call = OptionContract::from_market_units(OptionType::Call, spot, strike, rate, days, vol, div)?;
    let result = price_and_greeks(&call)?;
    println!("Call Price: ${:.4}", result.call_price);
    println!("Put Price:  ${:.4}", result.put_price);

    // Verify put-call parity: C - P = S*e^(-qT) - K*e^(-rT)
    let time = call.years();
    let parity_lhs = result.call_price - result.put_price;
    let parity_rhs = spot * (-call.dividend_yield_decimal() * time).exp()
        - strike * (-call.rate_decimal() * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S*e^(-qT) - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.2e}", (parity_lhs - parity_rhs).abs());

    println!("\n=== Greeks (Call) ===\n");
    for (name, value) in result.metrics().iter().skip(2) {
        println!("{:<12} {:>10.4}", name, value);
    }

    // Implied volatility calculation
    println!("\n=== Implied Volatility ===\n");
    let market_price = result.call_price + 0.50; // Simulated market price
    let query = ImpliedVolatilityQuery::from_market_units(
        OptionType::Call,
        spot,
        strike,
        rate,
        days,
        div,
        market_price,
    )?;
    match solve_implied_volatility(&query) {
        Ok(iv) => println!("Market price ${:.4} implies vol: {}", market_price, iv),
        Err(e) => println!("Could not solve for IV: {}", e),
    }

    // Expired contracts have no vega, so the solver refuses them
    let expired = ImpliedVolatilityQuery::from_market_units(
        OptionType::Put,
        spot,
        strike,
        rate,
        0.0,
        div,
        5.0,
    )?;
    println!(
        "Expired put: {}",
        serde_json::to_string(&ImpliedVolatilitySolver::default().report(&expired))
            .map_err(|e| BsmError::serialization(e.to_string()))?
    );

    Ok(())
}

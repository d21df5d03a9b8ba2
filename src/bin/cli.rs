//! BSM Options CLI
//!
//! Prices an option or solves for its implied volatility from `key=value`
//! arguments given in market units (rates, yields and vol in percent, time
//! in days), printing the result as JSON.
//!
//! ```text
//! bsm price option_type=put S=100 K=105 r=5 t=90 sigma=25 q=1
//! bsm iv option_type=c S=100 K=100 r=5 t=182.5 q=0 mkt_price=6.89 --bounded
//! ```

use std::collections::HashMap;
use std::fs;
use std::process::ExitCode;

use bsm_options::prelude::*;

const USAGE: &str = "usage: bsm <price|iv> [key=value ...] [--config <file>] [--bounded] [--verbose]
  keys: option_type S K r t sigma q mkt_price (r, q, sigma in percent; t in days)";

enum Command {
    Price,
    ImpliedVol,
}

struct Args {
    command: Command,
    fields: HashMap<String, String>,
    config_path: Option<String>,
    bounded: bool,
    verbose: bool,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> BsmResult<Args> {
    let command = match raw.next().as_deref() {
        Some("price") => Command::Price,
        Some("iv") => Command::ImpliedVol,
        other => {
            return Err(BsmError::invalid_input(
                "command",
                format!("expected `price` or `iv`, got {other:?}"),
            ))
        }
    };

    let mut args = Args {
        command,
        fields: HashMap::new(),
        config_path: None,
        bounded: false,
        verbose: false,
    };

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--bounded" => args.bounded = true,
            "--verbose" | "-v" => args.verbose = true,
            "--config" => {
                let path = raw
                    .next()
                    .ok_or_else(|| BsmError::invalid_input("config", "missing file path"))?;
                args.config_path = Some(path);
            }
            _ => {
                let (key, value) = arg.split_once('=').ok_or_else(|| {
                    BsmError::invalid_input("arguments", format!("expected key=value, got {arg:?}"))
                })?;
                args.fields.insert(key.to_string(), value.to_string());
            }
        }
    }

    Ok(args)
}

/// Numeric field with a form default
fn number(fields: &HashMap<String, String>, key: &'static str, default: f64) -> BsmResult<f64> {
    match fields.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| BsmError::invalid_input(key, format!("{raw:?}: {e}"))),
        None => Ok(default),
    }
}

fn option_type(fields: &HashMap<String, String>, default: OptionType) -> BsmResult<OptionType> {
    match fields.get("option_type") {
        Some(raw) => raw.parse(),
        None => Ok(default),
    }
}

fn solver_config(args: &Args) -> BsmResult<SolverConfig> {
    let mut config = match &args.config_path {
        Some(path) => SolverConfig::from_json(&fs::read_to_string(path)?)?,
        None => SolverConfig::default(),
    };
    if args.bounded {
        config.vol_bounds = SolverConfig::bounded().vol_bounds;
    }
    Ok(config)
}

fn to_json<T: serde::Serialize>(value: &T) -> BsmResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| BsmError::serialization(e.to_string()))
}

fn run(args: &Args) -> BsmResult<String> {
    let f = &args.fields;
    match args.command {
        Command::Price => {
            let contract = OptionContract::from_market_units(
                option_type(f, OptionType::Call)?,
                number(f, "S", 100.0)?,
                number(f, "K", 100.0)?,
                number(f, "r", 5.0)?,
                number(f, "t", 182.5)?,
                number(f, "sigma", 20.0)?,
                number(f, "q", 0.0)?,
            )?;
            tracing::info!(
                option_type = %contract.option_type(),
                spot = contract.spot(),
                strike = contract.strike(),
                days = contract.days(),
                "pricing contract"
            );
            to_json(&price_and_greeks(&contract)?)
        }
        Command::ImpliedVol => {
            let query = ImpliedVolatilityQuery::from_market_units(
                option_type(f, OptionType::Call)?,
                number(f, "S", 100.0)?,
                number(f, "K", 100.0)?,
                number(f, "r", 5.0)?,
                number(f, "t", 182.5)?,
                number(f, "q", 5.0)?,
                number(f, "mkt_price", 5.0)?,
            )?;
            let solver = ImpliedVolatilitySolver::new(solver_config(args)?)?;
            tracing::info!(
                option_type = %query.option_type(),
                market_price = query.market_price(),
                "solving implied volatility"
            );
            to_json(&solver.report(&query))
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

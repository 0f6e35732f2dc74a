// demos/option_report_demo.rs

//! Demonstration of implied and historical volatility estimation
//!
//! This example shows how to:
//! 1. Price a call and a put with Black-Scholes
//! 2. Recover the implied volatility from observed prices
//! 3. Build one report per expiry with intrinsic, time and historical volatility
//!
//! Run with `RUST_LOG=impvol_lib=debug` to see solver diagnostics.

use anyhow::Result;
use impvol_lib::{
    default_configs, evaluate_quote, implied_volatility, price, years_from_days, OptionQuote,
    OptionType,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!("Implied Volatility Demo");
    println!("=======================");

    println!("\nStep 1: Round trip through the pricer...");
    for option_type in [OptionType::Call, OptionType::Put] {
        let theoretical = price(option_type, 100.0, 105.0, 0.5, 0.05, 0.25)?;
        let iv = implied_volatility(100.0, 105.0, 0.5, 0.05, theoretical, option_type)?;
        println!(
            "  {:<4} price {:>8.4} -> implied vol {:.4}",
            option_type, theoretical, iv
        );
    }

    println!("\nStep 2: Reports for a synthetic chain...");
    let history = synthetic_history();
    let spot = *history.last().unwrap_or(&100.0);
    let config = default_configs::reference();

    println!(
        "{:<6} {:<8} {:<10} {:<8} {:<10} {:<10} {:<8}",
        "Days", "Strike", "Price", "IV", "Call Int", "Put Int", "HV"
    );
    println!("{}", "-".repeat(66));

    // (days to expiry, strike, last price); the last quote is below intrinsic value
    let chain = [
        (7.0, 100.0, 1.45),
        (30.0, 100.0, 2.95),
        (90.0, 105.0, 3.10),
        (30.0, 90.0, 4.00),
    ];

    for (days, strike, market_price) in chain {
        let quote = OptionQuote {
            option_type: OptionType::Call,
            underlying_price: spot,
            strike_price: strike,
            years_to_exp: years_from_days(days),
            market_price,
            risk_free_rate: None,
        };
        let report = evaluate_quote(&quote, &history, &config)?;
        println!(
            "{:<6} {:<8.1} {:<10.2} {:<8} {:<10.2} {:<10.2} {:<8}",
            days,
            report.strike_price,
            report.market_price,
            fmt_vol(report.implied_volatility),
            report.call_intrinsic_value,
            report.put_intrinsic_value,
            fmt_vol(report.historical_volatility),
        );
    }

    Ok(())
}

fn fmt_vol(vol: Option<f64>) -> String {
    vol.map(|v| format!("{:.4}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Deterministic zig-zag closes around 100
fn synthetic_history() -> Vec<f64> {
    (0..253)
        .map(|i| 100.0 * (1.0 + 0.01 * ((i as f64) * 0.7).sin()))
        .collect()
}

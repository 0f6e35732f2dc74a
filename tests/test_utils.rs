#![allow(dead_code)]

use impvol_lib::{BlackScholes, OptionType, PricingModel, PricingParameters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// CSV row structure of the closing-price fixture
#[derive(Debug, Deserialize)]
struct CloseRow {
    #[serde(rename = "date")]
    date: String,
    #[serde(rename = "close")]
    close: f64,
}

pub const CLOSES_PATH: &str = "tests/data/closes.csv";

/// Load a chronologically ordered closing-price series from CSV
pub fn load_closes(file_path: &str) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(file_path)?;
    let mut closes = Vec::new();

    for result in reader.deserialize() {
        let row: CloseRow = result?;
        closes.push(row.close);
    }

    Ok(closes)
}

/// Shorthand for validated pricing parameters
pub fn params(option_type: OptionType, s: f64, k: f64, t: f64, r: f64) -> PricingParameters {
    PricingParameters::new(option_type, s, k, t, r).expect("valid test parameters")
}

/// Seeded generator so property-style tests are reproducible
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x1f2e_3d4c)
}

/// Distance from the no-arbitrage bounds below which a quote carries no volatility signal
pub const BOUND_MARGIN: f64 = 0.05;

/// No-arbitrage price bounds: `max(0, S - K*df) .. S` for calls, `max(0, K*df - S) .. K*df`
/// for puts.
pub fn price_bounds(p: &PricingParameters) -> (f64, f64) {
    let k_df = p.strike * p.discount_factor();
    match p.option_type {
        OptionType::Call => ((p.spot - k_df).max(0.0), p.spot),
        OptionType::Put => ((k_df - p.spot).max(0.0), k_df),
    }
}

/// True when `price` sits at least [`BOUND_MARGIN`] inside the no-arbitrage bounds
pub fn well_inside_bounds(p: &PricingParameters, price: f64) -> bool {
    let (lo, hi) = price_bounds(p);
    price - lo >= BOUND_MARGIN && hi - price >= BOUND_MARGIN
}

/// Random well-posed case: K/S in [0.5, 2], T in [0.02, 2] years, sigma in [0.05, 2].
/// Draws are repeated until the model price is well inside the no-arbitrage bounds.
pub fn sample_case(rng: &mut StdRng) -> (PricingParameters, f64) {
    loop {
        let option_type = if rng.gen_bool(0.5) {
            OptionType::Call
        } else {
            OptionType::Put
        };
        let spot = rng.gen_range(90.0..110.0);
        let strike = spot * rng.gen_range(0.5..2.0);
        let years = rng.gen_range(0.02..2.0);
        let rate = rng.gen_range(0.0..0.08);
        let sigma = rng.gen_range(0.05..2.0);
        let p = params(option_type, spot, strike, years, rate);
        if well_inside_bounds(&p, BlackScholes.price(&p, sigma)) {
            return (p, sigma);
        }
    }
}

//! Historical (realized) volatility from a chronologically ordered price series.
//!
//! sigma_hist = stdev(ln(P_i / P_{i-1})) * sqrt(trading_days_per_year)
//!
//! The standard deviation is the sample (n-1) estimator, so at least two log-returns
//! (three prices) are needed for a defined result.

use statrs::statistics::Statistics;

use crate::error::{VolError, VolResult};
use crate::estimation::config::HistoricalConfig;

/// Smallest series with a defined sample standard deviation of log-returns.
pub const MIN_PRICES: usize = 3;

/// Log-returns of consecutive prices; `n` prices give `n - 1` returns.
pub fn log_returns(prices: &[f64]) -> VolResult<Vec<f64>> {
    if let Some((i, p)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(**p > 0.0 && p.is_finite()))
    {
        return Err(VolError::invalid(format!(
            "price at index {} must be > 0 and finite, got {}",
            i, p
        )));
    }

    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Annualized historical volatility with the default 252-day convention.
///
/// Needs at least three prices: two prices give a single log-return, whose sample
/// standard deviation (n - 1 denominator) is undefined, so they fail with
/// `InsufficientData` like shorter series.
pub fn historical_volatility(prices: &[f64]) -> VolResult<f64> {
    historical_volatility_with_config(prices, &HistoricalConfig::default())
}

/// As [`historical_volatility`], annualized with `config.trading_days_per_year`.
///
/// Fewer than [`MIN_PRICES`] prices is `InsufficientData`, including the two-price case.
pub fn historical_volatility_with_config(
    prices: &[f64],
    config: &HistoricalConfig,
) -> VolResult<f64> {
    if prices.len() < MIN_PRICES {
        return Err(VolError::InsufficientData {
            required: MIN_PRICES,
            got: prices.len(),
        });
    }
    if !(config.trading_days_per_year > 0.0 && config.trading_days_per_year.is_finite()) {
        return Err(VolError::invalid(format!(
            "trading_days_per_year must be > 0, got {}",
            config.trading_days_per_year
        )));
    }

    let returns = log_returns(prices)?;
    let daily = returns.iter().std_dev();
    if !daily.is_finite() {
        return Err(VolError::invalid(
            "standard deviation of log-returns is not finite",
        ));
    }

    let annualized = daily * config.trading_days_per_year.sqrt();
    tracing::debug!(
        observations = prices.len(),
        daily_vol = daily,
        annualized,
        "historical volatility"
    );
    Ok(annualized)
}

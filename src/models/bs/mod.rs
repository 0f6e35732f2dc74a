// Black-Scholes pricing for European calls and puts without dividends, plus the analytic
// vega the Newton solver steps on.

use crate::error::VolResult;
use crate::estimation::types::{require_positive, OptionType, PricingParameters};
use crate::models::traits::PricingModel;
use crate::models::utils::{norm_cdf, norm_pdf};

/// The d1 and d2 terms of the Black-Scholes formula.
#[allow(non_snake_case)]
pub fn d1_d2(S: f64, K: f64, T: f64, r: f64, sigma: f64) -> (f64, f64) {
    let sigma_sqrt_t = sigma * T.sqrt();
    let d1 = ((S / K).ln() + (r + 0.5 * sigma.powi(2)) * T) / sigma_sqrt_t;
    (d1, d1 - sigma_sqrt_t)
}

/// Price of a European call option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, T: f64, r: f64, sigma: f64) -> f64 {
    let (d1, d2) = d1_d2(S, K, T, r, sigma);
    S * norm_cdf(d1) - K * (-r * T).exp() * norm_cdf(d2)
}

/// Price of a European put option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_put_price(S: f64, K: f64, T: f64, r: f64, sigma: f64) -> f64 {
    let (d1, d2) = d1_d2(S, K, T, r, sigma);
    K * (-r * T).exp() * norm_cdf(-d2) - S * norm_cdf(-d1)
}

/// Vega, identical for calls and puts: S * sqrt(T) * phi(d1).
#[allow(non_snake_case)]
pub fn bs_vega(S: f64, K: f64, T: f64, r: f64, sigma: f64) -> f64 {
    let (d1, _) = d1_d2(S, K, T, r, sigma);
    S * T.sqrt() * norm_pdf(d1)
}

/// Checked Black-Scholes price for either contract type.
///
/// Rejects non-positive spot, strike, expiry or volatility with `InvalidInput` instead of
/// returning NaN or infinity.
#[allow(non_snake_case)]
pub fn bs_price(
    option_type: OptionType,
    S: f64,
    K: f64,
    T: f64,
    r: f64,
    sigma: f64,
) -> VolResult<f64> {
    let params = PricingParameters::new(option_type, S, K, T, r)?;
    require_positive("volatility", sigma)?;
    Ok(BlackScholes.price(&params, sigma))
}

/// Black-Scholes model as a [`PricingModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl PricingModel for BlackScholes {
    fn name(&self) -> &'static str {
        "black-scholes"
    }

    fn price(&self, p: &PricingParameters, sigma: f64) -> f64 {
        match p.option_type {
            OptionType::Call => bs_call_price(p.spot, p.strike, p.years_to_exp, p.rate, sigma),
            OptionType::Put => bs_put_price(p.spot, p.strike, p.years_to_exp, p.rate, sigma),
        }
    }

    fn vega(&self, p: &PricingParameters, sigma: f64) -> f64 {
        bs_vega(p.spot, p.strike, p.years_to_exp, p.rate, sigma)
    }
}

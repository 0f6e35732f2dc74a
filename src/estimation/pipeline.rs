use crate::error::{VolError, VolResult};
use crate::estimation::config::EstimationConfig;
use crate::estimation::types::{
    OptionQuote, OptionReport, OptionType, OptionValuation, PricingParameters,
};
use crate::models::bs::BlackScholes;
use crate::models::historical::historical_volatility_with_config;
use crate::models::iv::implied_volatility_with_model;
use crate::models::valuation::intrinsic_value;

/// Evaluates a single option quote against an underlying price history.
///
/// Invalid quote fields are an error. A solver that finds no implied volatility and a
/// history too short for a standard deviation are recorded as `None` in the report and
/// logged, so one bad quote does not hide the valuation metrics.
pub fn evaluate_quote(
    quote: &OptionQuote,
    history: &[f64],
    config: &EstimationConfig,
) -> VolResult<OptionReport> {
    let rate = quote.risk_free_rate.unwrap_or(config.fixed_params.r);
    let params = PricingParameters::new(
        quote.option_type,
        quote.underlying_price,
        quote.strike_price,
        quote.years_to_exp,
        rate,
    )?;

    let solved =
        implied_volatility_with_model(&BlackScholes, &params, quote.market_price, &config.solver);
    let implied_volatility = match solved {
        Ok(sigma) => Some(sigma),
        Err(e @ VolError::NonConvergence(_)) => {
            tracing::warn!(
                strike = quote.strike_price,
                years_to_exp = quote.years_to_exp,
                error = %e,
                "skipping implied volatility for quote"
            );
            None
        }
        Err(e) => return Err(e),
    };

    let estimated = historical_volatility_with_config(history, &config.historical);
    let historical_volatility = match estimated {
        Ok(vol) => Some(vol),
        Err(e @ VolError::InsufficientData { .. }) => {
            tracing::warn!(error = %e, "historical volatility unavailable");
            None
        }
        Err(e) => return Err(e),
    };

    let valuation = OptionValuation::from_market(
        quote.market_price,
        quote.underlying_price,
        quote.strike_price,
        quote.option_type,
    );

    Ok(OptionReport {
        option_type: quote.option_type,
        underlying_price: quote.underlying_price,
        strike_price: quote.strike_price,
        years_to_exp: quote.years_to_exp,
        risk_free_rate: rate,
        market_price: quote.market_price,
        implied_volatility,
        call_intrinsic_value: intrinsic_value(
            quote.underlying_price,
            quote.strike_price,
            OptionType::Call,
        ),
        put_intrinsic_value: intrinsic_value(
            quote.underlying_price,
            quote.strike_price,
            OptionType::Put,
        ),
        time_value: valuation.time_value,
        historical_volatility,
    })
}

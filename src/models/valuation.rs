use crate::estimation::types::{OptionType, OptionValuation};

/// Value of immediate exercise: max(0, S-K) for calls, max(0, K-S) for puts.
pub fn intrinsic_value(spot: f64, strike: f64, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

/// Portion of the observed price above intrinsic value, floored at zero.
pub fn time_value(market_price: f64, intrinsic: f64) -> f64 {
    (market_price - intrinsic).max(0.0)
}

impl OptionValuation {
    pub fn from_market(market_price: f64, spot: f64, strike: f64, option_type: OptionType) -> Self {
        let intrinsic_value = intrinsic_value(spot, strike, option_type);
        Self {
            intrinsic_value,
            time_value: time_value(market_price, intrinsic_value),
        }
    }
}

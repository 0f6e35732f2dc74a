use std::fmt;
use std::str::FromStr;

use crate::error::{VolError, VolResult};

/// Contract type of a European option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    Call,
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("call"),
            OptionType::Put => f.write_str("put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = VolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(VolError::invalid(format!("unknown option type: {}", other))),
        }
    }
}

/// Validated inputs to the Black-Scholes pricer, everything except volatility.
///
/// Spot, strike and time to expiry are strictly positive and finite; the rate is finite.
/// Construct through [`PricingParameters::new`] so that the pricer never sees a log of a
/// non-positive number or a zero divisor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingParameters {
    /// Contract type
    pub option_type: OptionType,
    /// Underlying price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub years_to_exp: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
}

impl PricingParameters {
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        years_to_exp: f64,
        rate: f64,
    ) -> VolResult<Self> {
        let params = Self {
            option_type,
            spot,
            strike,
            years_to_exp,
            rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-checks the invariants, for values built with struct literal syntax.
    pub fn validate(&self) -> VolResult<()> {
        require_positive("underlying price", self.spot)?;
        require_positive("strike price", self.strike)?;
        require_positive("time to expiry", self.years_to_exp)?;
        if !self.rate.is_finite() {
            return Err(VolError::invalid(format!(
                "risk-free rate must be finite, got {}",
                self.rate
            )));
        }
        Ok(())
    }

    /// Discount factor e^(-rT).
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.years_to_exp).exp()
    }

    /// Same contract with the other option type, e.g. for parity checks.
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> VolResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(VolError::invalid(format!(
            "{} must be > 0 and finite, got {}",
            name, value
        )))
    }
}

/// Intrinsic and time value of an option at its observed market price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionValuation {
    pub intrinsic_value: f64,
    pub time_value: f64,
}

/// A single observed option quote, as handed over by a market-data layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    /// Option type: call or put
    pub option_type: OptionType,
    /// Underlying asset price
    pub underlying_price: f64,
    /// Strike price
    pub strike_price: f64,
    /// Time to expiration in years
    pub years_to_exp: f64,
    /// Last traded option price
    pub market_price: f64,
    /// Quote-specific risk-free rate; falls back to the configured rate when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub risk_free_rate: Option<f64>,
}

/// Everything computed for one quote by [`crate::estimation::pipeline::evaluate_quote`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionReport {
    pub option_type: OptionType,
    pub underlying_price: f64,
    pub strike_price: f64,
    pub years_to_exp: f64,
    pub risk_free_rate: f64,
    pub market_price: f64,
    /// None when the solver reported non-convergence
    pub implied_volatility: Option<f64>,
    pub call_intrinsic_value: f64,
    pub put_intrinsic_value: f64,
    /// Time value of the quoted contract
    pub time_value: f64,
    /// None when the supplied history was too short
    pub historical_volatility: Option<f64>,
}

/// Converts calendar days to years with the ACT/365 convention.
pub fn years_from_days(days: f64) -> f64 {
    days / 365.0
}

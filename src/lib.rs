//! # Impvol-Lib: Implied Volatility Estimation and Option Valuation
//!
//! `impvol-lib` estimates the implied volatility of a European option from its observed
//! market price by inverting the Black-Scholes closed form, and derives the auxiliary
//! metrics a volatility report needs: intrinsic value, time value and annualized
//! historical volatility.
//!
//! ## Core Features
//!
//! - **Black-Scholes Pricer**: Closed-form call/put prices and analytic vega
//! - **Volatility Solver**: Bounded Newton-Raphson (or Brent) inversion with a typed outcome
//! - **Historical Volatility**: Annualized sample deviation of daily log-returns
//! - **Valuation Metrics**: Intrinsic and time value from observed prices
//!
//! ## Quick Start
//!
//! ```rust
//! use impvol_lib::{implied_volatility, price, OptionType};
//!
//! let observed = price(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
//! let sigma = implied_volatility(100.0, 100.0, 1.0, 0.05, observed, OptionType::Call)?;
//! assert!((sigma - 0.2).abs() < 1e-4);
//! # Ok::<(), impvol_lib::VolError>(())
//! ```
//!
//! ## Failure Semantics
//!
//! Every operation returns [`VolResult`]. Non-convergence, degenerate vega and short
//! price histories are distinct [`VolError`] variants, never a sentinel number.
//!
//! ## Configuration Presets
//!
//! - `reference()`: sigma0 = 0.5, tolerance 1e-4, 100 Newton iterations, Brent retry on
//!   failure
//! - `precise()`: tolerance 1e-8, 200 iterations
//! - `robust()`: Brent bracketing on [1e-6, 5]

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod estimation;
pub mod models;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{NonConvergence, VolError, VolResult};

// Configuration and value types
pub use estimation::{
    config::{
        EstimationConfig, FixedParameters, HistoricalConfig, NonPositiveSigmaPolicy,
        SolverConfig, SolverMethod,
    },
    pipeline::evaluate_quote,
    types::{
        years_from_days, OptionQuote, OptionReport, OptionType, OptionValuation,
        PricingParameters,
    },
};

// Models
pub use models::{
    bs::{bs_call_price, bs_price, bs_put_price, bs_vega, d1_d2, BlackScholes},
    historical::{historical_volatility, historical_volatility_with_config, log_returns},
    iv::{brent_solve, implied_volatility_with_model, newton_solve, solve, SolveOutcome},
    traits::PricingModel,
    valuation::{intrinsic_value, time_value},
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured solver settings.
///
/// # Available Configurations
///
/// - [`reference()`]: The documented reference behaviour
/// - [`precise()`]: Tight tolerance for research and validation
/// - [`robust()`]: Bracketing solver for awkward quotes
pub mod default_configs {
    use crate::estimation::config::EstimationConfig;

    /// Reference configuration.
    ///
    /// **Characteristics:**
    /// - Initial guess: 0.5 (50% annualized)
    /// - Price tolerance: 1e-4
    /// - Maximum iterations: 100
    /// - Aborts when a step proposes a non-positive volatility
    ///
    /// # Example
    ///
    /// ```rust
    /// use impvol_lib::default_configs;
    ///
    /// let config = default_configs::reference();
    /// assert_eq!(config.solver.max_iterations, 100);
    /// ```
    pub fn reference() -> EstimationConfig {
        EstimationConfig::reference()
    }

    /// High-precision configuration (tolerance 1e-8, 200 iterations).
    pub fn precise() -> EstimationConfig {
        EstimationConfig::precise()
    }

    /// Brent bracketing on sigma in [1e-6, 5] with 200 iterations.
    ///
    /// Useful for far-from-the-money quotes where Newton steps overshoot.
    pub fn robust() -> EstimationConfig {
        EstimationConfig::robust()
    }
}

/// Black-Scholes price of a European option.
///
/// # Arguments
///
/// * `option_type` - Call or put
/// * `s` - Underlying price (> 0)
/// * `k` - Strike price (> 0)
/// * `t` - Time to expiry in years (> 0)
/// * `r` - Risk-free rate
/// * `sigma` - Annualized volatility (> 0)
///
/// # Errors
///
/// `VolError::InvalidInput` if any of `s`, `k`, `t`, `sigma` is non-positive or non-finite.
pub fn price(
    option_type: OptionType,
    s: f64,
    k: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> VolResult<f64> {
    bs_price(option_type, s, k, t, r, sigma)
}

/// Implied volatility with the reference solver settings.
///
/// # Errors
///
/// * `VolError::InvalidInput` for non-positive `s`, `k`, `t` or a negative observed price
/// * `VolError::NonConvergence` if neither Newton-Raphson nor the Brent retry reaches the
///   observed price. An observed price outside the attainable range (e.g. below intrinsic
///   value) ends up here as `NoBracket`.
///
/// # Example
///
/// ```rust
/// use impvol_lib::{implied_volatility, OptionType};
///
/// // Call struck at 90 on a 100 spot is worth at least ~14.4; 5.0 is unattainable
/// let result = implied_volatility(100.0, 90.0, 1.0, 0.05, 5.0, OptionType::Call);
/// assert!(result.unwrap_err().is_non_convergence());
/// ```
pub fn implied_volatility(
    s: f64,
    k: f64,
    t: f64,
    r: f64,
    observed_price: f64,
    option_type: OptionType,
) -> VolResult<f64> {
    let config = SolverConfig::reference();
    implied_volatility_with_config(s, k, t, r, observed_price, option_type, &config)
}

/// Implied volatility with explicit solver settings.
pub fn implied_volatility_with_config(
    s: f64,
    k: f64,
    t: f64,
    r: f64,
    observed_price: f64,
    option_type: OptionType,
    config: &SolverConfig,
) -> VolResult<f64> {
    let params = PricingParameters::new(option_type, s, k, t, r)?;
    implied_volatility_with_model(&BlackScholes, &params, observed_price, config)
}

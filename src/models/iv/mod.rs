//! Implied volatility solvers
//!
//! Inverts a [`PricingModel`] for the volatility that reproduces an observed price. Two
//! bounded, deterministic methods are available:
//!
//! - **Newton-Raphson** (default): starts from a fixed guess and steps on analytic vega.
//!   Converges in a handful of iterations for near-the-money options.
//! - **Brent**: brackets the root on a fixed volatility interval; used when the caller
//!   prefers guaranteed bracketing over speed.
//!
//! Both return a [`SolveOutcome`] so that non-convergence is a tagged value rather than
//! a last iterate that merely looks like an answer. With `bracket_fallback` set, a failed
//! Newton run is retried with Brent, so only prices unreachable on the bracket fail.

pub mod brent;
pub mod newton;

pub use brent::brent_solve;
pub use newton::newton_solve;

use crate::error::{NonConvergence, VolError, VolResult};
use crate::estimation::config::{SolverConfig, SolverMethod};
use crate::estimation::types::PricingParameters;
use crate::models::traits::PricingModel;

/// Outcome of a single bounded solver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveOutcome {
    /// |price(sigma) - observed| fell below the tolerance at this sigma
    Converged { sigma: f64, iterations: usize },
    /// Iteration budget spent; `last_sigma` is the last evaluated iterate
    Exhausted {
        iterations: usize,
        last_sigma: f64,
        last_diff: f64,
    },
    /// Vega vanished (or the step was non-finite) before convergence
    DegenerateVega {
        iteration: usize,
        sigma: f64,
        vega: f64,
    },
    /// A step proposed sigma <= 0 under the abort policy
    NonPositiveSigma { iteration: usize, sigma: f64 },
    /// A step proposed sigma above `max_sigma`
    SigmaAboveBound {
        iteration: usize,
        sigma: f64,
        bound: f64,
    },
    /// The observed price lies outside the prices attainable on the bracket
    NoBracket { lower: f64, upper: f64 },
}

impl SolveOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveOutcome::Converged { .. })
    }

    /// Accepted volatility, if any
    pub fn sigma(&self) -> Option<f64> {
        match self {
            SolveOutcome::Converged { sigma, .. } => Some(*sigma),
            _ => None,
        }
    }

    pub fn into_result(self) -> VolResult<f64> {
        let reason = match self {
            SolveOutcome::Converged { sigma, .. } => return Ok(sigma),
            SolveOutcome::Exhausted {
                iterations,
                last_sigma,
                last_diff,
            } => NonConvergence::Exhausted {
                iterations,
                last_sigma,
                last_diff,
            },
            SolveOutcome::DegenerateVega {
                iteration,
                sigma,
                vega,
            } => NonConvergence::DegenerateVega {
                iteration,
                sigma,
                vega,
            },
            SolveOutcome::NonPositiveSigma { iteration, sigma } => {
                NonConvergence::NonPositiveSigma { iteration, sigma }
            }
            SolveOutcome::SigmaAboveBound {
                iteration,
                sigma,
                bound,
            } => NonConvergence::SigmaAboveBound {
                iteration,
                sigma,
                bound,
            },
            SolveOutcome::NoBracket { lower, upper } => NonConvergence::NoBracket { lower, upper },
        };
        Err(VolError::NonConvergence(reason))
    }
}

/// Runs the configured method without validating inputs.
///
/// A failed Newton run falls back to [`brent_solve`] when `config.bracket_fallback` is set;
/// the Brent outcome is returned in that case.
pub fn solve<M: PricingModel>(
    model: &M,
    params: &PricingParameters,
    observed_price: f64,
    config: &SolverConfig,
) -> SolveOutcome {
    match config.method {
        SolverMethod::NewtonRaphson => {
            let outcome = newton_solve(model, params, observed_price, config);
            if outcome.is_converged() || !config.bracket_fallback {
                return outcome;
            }
            tracing::debug!(newton = ?outcome, "newton failed, retrying on the brent bracket");
            brent_solve(model, params, observed_price, config)
        }
        SolverMethod::Brent => brent_solve(model, params, observed_price, config),
    }
}

/// Validates inputs, solves, and converts the outcome into a result.
pub fn implied_volatility_with_model<M: PricingModel>(
    model: &M,
    params: &PricingParameters,
    observed_price: f64,
    config: &SolverConfig,
) -> VolResult<f64> {
    params.validate()?;
    config.validate()?;
    if !(observed_price >= 0.0 && observed_price.is_finite()) {
        return Err(VolError::invalid(format!(
            "observed price must be >= 0 and finite, got {}",
            observed_price
        )));
    }

    let outcome = solve(model, params, observed_price, config);
    match outcome {
        SolveOutcome::Converged { sigma, iterations } => {
            tracing::debug!(
                model = model.name(),
                option_type = %params.option_type,
                sigma,
                iterations,
                "implied volatility converged"
            );
        }
        failed => {
            tracing::warn!(
                model = model.name(),
                option_type = %params.option_type,
                spot = params.spot,
                strike = params.strike,
                years_to_exp = params.years_to_exp,
                observed_price,
                outcome = ?failed,
                "no implied volatility found"
            );
        }
    }
    outcome.into_result()
}

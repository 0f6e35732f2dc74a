//! Error taxonomy shared by the pricer, the volatility solvers and the historical estimator.
//!
//! Every failure is surfaced as a distinct variant rather than a sentinel number, so a
//! caller can tell "no implied volatility found" apart from a legitimately small estimate.

use std::fmt;

/// Result alias used by every core operation.
pub type VolResult<T> = Result<T, VolError>;

/// Errors produced by the volatility engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VolError {
    /// Non-positive or non-finite spot, strike, expiry, volatility or price.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver could not produce an implied volatility for the observed price.
    #[error("no implied volatility found: {0}")]
    NonConvergence(NonConvergence),

    /// Not enough observations to estimate a standard deviation.
    #[error("insufficient data: need at least {required} prices, got {got}")]
    InsufficientData { required: usize, got: usize },
}

impl VolError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        VolError::InvalidInput(msg.into())
    }

    pub fn is_non_convergence(&self) -> bool {
        matches!(self, VolError::NonConvergence(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, VolError::InvalidInput(_))
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, VolError::InsufficientData { .. })
    }
}

/// Why a solver run ended without an accepted volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NonConvergence {
    /// Iteration budget spent without meeting the price tolerance.
    Exhausted {
        iterations: usize,
        last_sigma: f64,
        last_diff: f64,
    },
    /// Vega at the current iterate is zero (or numerically so), or the update blew up.
    DegenerateVega {
        iteration: usize,
        sigma: f64,
        vega: f64,
    },
    /// A Newton step proposed sigma <= 0 and the policy is to abort.
    NonPositiveSigma { iteration: usize, sigma: f64 },
    /// A Newton step ran past the volatility ceiling.
    SigmaAboveBound {
        iteration: usize,
        sigma: f64,
        bound: f64,
    },
    /// Observed price is not attainable anywhere on the volatility bracket.
    NoBracket { lower: f64, upper: f64 },
}

impl fmt::Display for NonConvergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonConvergence::Exhausted {
                iterations,
                last_sigma,
                last_diff,
            } => write!(
                f,
                "iteration budget exhausted after {} iterations (sigma={:.6}, price error={:.6e})",
                iterations, last_sigma, last_diff
            ),
            NonConvergence::DegenerateVega {
                iteration,
                sigma,
                vega,
            } => write!(
                f,
                "degenerate vega {:.3e} at iteration {} (sigma={:.6})",
                vega, iteration, sigma
            ),
            NonConvergence::NonPositiveSigma { iteration, sigma } => write!(
                f,
                "update produced non-positive sigma {:.6} at iteration {}",
                sigma, iteration
            ),
            NonConvergence::SigmaAboveBound {
                iteration,
                sigma,
                bound,
            } => write!(
                f,
                "update produced sigma {:.6} above the ceiling {} at iteration {}",
                sigma, bound, iteration
            ),
            NonConvergence::NoBracket { lower, upper } => write!(
                f,
                "observed price not attainable for sigma in [{}, {}]",
                lower, upper
            ),
        }
    }
}

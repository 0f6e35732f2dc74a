use super::SolveOutcome;
use crate::estimation::config::{NonPositiveSigmaPolicy, SolverConfig};
use crate::estimation::types::PricingParameters;
use crate::models::traits::PricingModel;

/// Newton-Raphson inversion of `model` for `observed_price`.
///
/// Each iteration prices at the current sigma and checks the tolerance *before* stepping,
/// so a converged result is the sigma that produced the accepted price. The step is
/// `sigma -= (price - observed) / vega`. Runs at most `config.max_iterations` iterations.
///
/// A step above `config.max_sigma` ends the run: near expiry an at-the-money vega stays
/// small but non-zero and the iterates otherwise run off to volatilities in the thousands.
///
/// Inputs are assumed validated; see [`super::implied_volatility_with_model`].
pub fn newton_solve<M: PricingModel>(
    model: &M,
    params: &PricingParameters,
    observed_price: f64,
    config: &SolverConfig,
) -> SolveOutcome {
    let mut sigma = config.initial_sigma;
    let mut last_diff = f64::NAN;
    let mut last_sigma = sigma;

    for iteration in 0..config.max_iterations {
        let diff = model.price(params, sigma) - observed_price;
        last_diff = diff;
        last_sigma = sigma;

        if diff.abs() < config.tolerance {
            return SolveOutcome::Converged {
                sigma,
                iterations: iteration,
            };
        }

        let vega = model.vega(params, sigma);
        // also catches NaN vega
        if !(vega > config.min_vega) {
            return SolveOutcome::DegenerateVega {
                iteration,
                sigma,
                vega,
            };
        }

        let next = sigma - diff / vega;
        tracing::trace!(iteration, sigma, diff, vega, next, "newton step");

        if !next.is_finite() {
            return SolveOutcome::DegenerateVega {
                iteration,
                sigma,
                vega,
            };
        }

        if next > config.max_sigma {
            return SolveOutcome::SigmaAboveBound {
                iteration,
                sigma: next,
                bound: config.max_sigma,
            };
        }

        sigma = if next > 0.0 {
            next
        } else {
            match config.non_positive_sigma {
                NonPositiveSigmaPolicy::Abort => {
                    return SolveOutcome::NonPositiveSigma {
                        iteration,
                        sigma: next,
                    };
                }
                NonPositiveSigmaPolicy::Clamp { floor } => floor,
            }
        };
    }

    SolveOutcome::Exhausted {
        iterations: config.max_iterations,
        last_sigma,
        last_diff,
    }
}

use std::cell::Cell;

use roots::{find_root_brent, Convergency, SearchError};

use super::SolveOutcome;
use crate::estimation::config::SolverConfig;
use crate::estimation::types::PricingParameters;
use crate::models::traits::PricingModel;

/// Stops on price error, not on bracket width.
struct PriceTolerance {
    tolerance: f64,
    max_iterations: usize,
}

impl Convergency<f64> for PriceTolerance {
    fn is_root_found(&mut self, y: f64) -> bool {
        y.abs() < self.tolerance
    }

    fn is_converged(&mut self, x1: f64, x2: f64) -> bool {
        (x1 - x2).abs() <= f64::EPSILON * x1.abs().max(x2.abs())
    }

    fn is_iteration_limit_reached(&mut self, iter: usize) -> bool {
        iter >= self.max_iterations
    }
}

/// Brent's method on `[config.brent_lower, config.brent_upper]`.
///
/// Prices are monotone in volatility, so an observed price outside
/// `[price(lower), price(upper)]` has no root on the bracket and yields `NoBracket`.
pub fn brent_solve<M: PricingModel>(
    model: &M,
    params: &PricingParameters,
    observed_price: f64,
    config: &SolverConfig,
) -> SolveOutcome {
    // (evaluations, sigma, diff) of the most recent evaluation
    let last = Cell::new((0usize, f64::NAN, f64::NAN));
    let objective = |sigma: f64| -> f64 {
        let diff = model.price(params, sigma) - observed_price;
        let (count, _, _) = last.get();
        last.set((count + 1, sigma, diff));
        diff
    };

    let mut convergency = PriceTolerance {
        tolerance: config.tolerance,
        max_iterations: config.max_iterations,
    };

    match find_root_brent(config.brent_lower, config.brent_upper, &objective, &mut convergency) {
        Ok(sigma) => {
            let diff = model.price(params, sigma) - observed_price;
            let (evaluations, _, _) = last.get();
            if diff.abs() < config.tolerance {
                SolveOutcome::Converged {
                    sigma,
                    iterations: evaluations,
                }
            } else {
                SolveOutcome::Exhausted {
                    iterations: evaluations,
                    last_sigma: sigma,
                    last_diff: diff,
                }
            }
        }
        Err(SearchError::NoBracketing) => SolveOutcome::NoBracket {
            lower: config.brent_lower,
            upper: config.brent_upper,
        },
        Err(_) => {
            let (evaluations, last_sigma, last_diff) = last.get();
            SolveOutcome::Exhausted {
                iterations: evaluations,
                last_sigma,
                last_diff,
            }
        }
    }
}

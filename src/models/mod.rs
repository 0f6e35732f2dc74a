pub mod bs;
pub mod historical;
pub mod iv;
pub mod valuation;

/// Common traits used by the pricing models and the solvers that invert them
pub mod traits {
    use crate::estimation::types::PricingParameters;

    /// Closed-form pricing model that can be inverted for volatility.
    ///
    /// Implementations may assume `params` has been validated and `sigma > 0`.
    pub trait PricingModel {
        fn name(&self) -> &'static str;

        /// Theoretical option price at volatility `sigma`
        fn price(&self, params: &PricingParameters, sigma: f64) -> f64;

        /// Sensitivity of the price to `sigma`
        fn vega(&self, params: &PricingParameters, sigma: f64) -> f64;
    }
}

/// Numerical helpers shared by the models
pub mod utils {
    use std::f64::consts::{PI, SQRT_2};

    /// Standard normal cumulative distribution function
    pub fn norm_cdf(x: f64) -> f64 {
        // 0.5 * [1 + erf(x / sqrt(2))]
        0.5 * (1.0 + libm::erf(x / SQRT_2))
    }

    /// Standard normal probability density function
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }
}

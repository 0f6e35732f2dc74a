use crate::error::{VolError, VolResult};

/// What the Newton solver does when an update step proposes sigma <= 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "policy", rename_all = "snake_case"))]
pub enum NonPositiveSigmaPolicy {
    /// Stop and report non-convergence
    #[default]
    Abort,
    /// Replace the proposal with `floor` and keep iterating
    Clamp { floor: f64 },
}

/// Root-finding method used to invert the pricer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolverMethod {
    /// Newton-Raphson on vega from a fixed initial guess
    #[default]
    NewtonRaphson,
    /// Brent's method on a fixed volatility bracket
    Brent,
}

/// Implied volatility solver configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SolverConfig {
    /// Starting volatility for Newton-Raphson (annualized)
    #[cfg_attr(feature = "serde", serde(default = "default_initial_sigma"))]
    pub initial_sigma: f64,

    /// Absolute price tolerance, in the same currency units as the option price
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance"))]
    pub tolerance: f64,

    #[cfg_attr(feature = "serde", serde(default = "default_max_iterations"))]
    pub max_iterations: usize,

    /// Vega at or below this value is treated as zero
    #[cfg_attr(feature = "serde", serde(default = "default_min_vega"))]
    pub min_vega: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub non_positive_sigma: NonPositiveSigmaPolicy,

    /// Newton steps above this volatility are rejected as runaway
    #[cfg_attr(feature = "serde", serde(default = "default_max_sigma"))]
    pub max_sigma: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub method: SolverMethod,

    /// Retry on the Brent bracket when a Newton run fails
    #[cfg_attr(feature = "serde", serde(default = "default_bracket_fallback"))]
    pub bracket_fallback: bool,

    /// Lower end of the Brent bracket
    #[cfg_attr(feature = "serde", serde(default = "default_brent_lower"))]
    pub brent_lower: f64,

    /// Upper end of the Brent bracket
    #[cfg_attr(feature = "serde", serde(default = "default_brent_upper"))]
    pub brent_upper: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_sigma: default_initial_sigma(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            min_vega: default_min_vega(),
            non_positive_sigma: NonPositiveSigmaPolicy::default(),
            max_sigma: default_max_sigma(),
            method: SolverMethod::default(),
            bracket_fallback: default_bracket_fallback(),
            brent_lower: default_brent_lower(),
            brent_upper: default_brent_upper(),
        }
    }
}

impl SolverConfig {
    /// Reference settings: sigma0 = 0.5, tolerance 1e-4, 100 iterations, Newton-Raphson
    /// with a Brent retry on failure
    pub fn reference() -> Self {
        Self::default()
    }

    /// Tight price tolerance for research use
    pub fn precise() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 200,
            ..Self::default()
        }
    }

    /// Bracketing solver; slower but cannot step outside the bracket
    pub fn robust() -> Self {
        Self {
            method: SolverMethod::Brent,
            max_iterations: 200,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> VolResult<()> {
        if !(self.initial_sigma > 0.0 && self.initial_sigma.is_finite()) {
            return Err(VolError::invalid(format!(
                "initial_sigma must be > 0 and finite, got {}",
                self.initial_sigma
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(VolError::invalid(format!(
                "tolerance must be > 0 and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(VolError::invalid("max_iterations must be at least 1"));
        }
        if !(self.min_vega >= 0.0) {
            return Err(VolError::invalid(format!(
                "min_vega must be >= 0, got {}",
                self.min_vega
            )));
        }
        if !(self.max_sigma > self.initial_sigma && self.max_sigma.is_finite()) {
            return Err(VolError::invalid(format!(
                "max_sigma must be finite and above initial_sigma, got {}",
                self.max_sigma
            )));
        }
        if let NonPositiveSigmaPolicy::Clamp { floor } = self.non_positive_sigma {
            if !(floor > 0.0 && floor.is_finite()) {
                return Err(VolError::invalid(format!(
                    "clamp floor must be > 0 and finite, got {}",
                    floor
                )));
            }
        }
        if !(self.brent_lower > 0.0 && self.brent_lower < self.brent_upper)
            || !self.brent_upper.is_finite()
        {
            return Err(VolError::invalid(format!(
                "brent bracket must satisfy 0 < lower < upper, got [{}, {}]",
                self.brent_lower, self.brent_upper
            )));
        }
        Ok(())
    }
}

/// Historical volatility configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct HistoricalConfig {
    /// Annualization factor; a fixed convention, independent of the window length
    #[cfg_attr(feature = "serde", serde(default = "default_trading_days"))]
    pub trading_days_per_year: f64,
}

impl Default for HistoricalConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: default_trading_days(),
        }
    }
}

/// Market parameters not carried by individual quotes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FixedParameters {
    #[cfg_attr(feature = "serde", serde(default = "default_rate"))]
    pub r: f64,
}

impl Default for FixedParameters {
    fn default() -> Self {
        Self { r: default_rate() }
    }
}

/// Top-level configuration for the estimation pipeline
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct EstimationConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub solver: SolverConfig,

    #[cfg_attr(feature = "serde", serde(default))]
    pub historical: HistoricalConfig,

    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_params: FixedParameters,
}

impl EstimationConfig {
    pub fn reference() -> Self {
        Self::default()
    }

    pub fn precise() -> Self {
        Self {
            solver: SolverConfig::precise(),
            ..Self::default()
        }
    }

    pub fn robust() -> Self {
        Self {
            solver: SolverConfig::robust(),
            ..Self::default()
        }
    }

    /// Parses a TOML document; missing sections and fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(src)?;
        config.solver.validate()?;
        if !(config.historical.trading_days_per_year > 0.0) {
            anyhow::bail!(
                "trading_days_per_year must be > 0, got {}",
                config.historical.trading_days_per_year
            );
        }
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("parsing config file {}", path.display()))
    }
}

fn default_initial_sigma() -> f64 {
    0.5
}

fn default_tolerance() -> f64 {
    1e-4
}

fn default_max_iterations() -> usize {
    100
}

fn default_min_vega() -> f64 {
    1e-10
}

fn default_max_sigma() -> f64 {
    5.0
}

fn default_bracket_fallback() -> bool {
    true
}

fn default_brent_lower() -> f64 {
    1e-6
}

fn default_brent_upper() -> f64 {
    5.0
}

fn default_trading_days() -> f64 {
    252.0
}

fn default_rate() -> f64 {
    0.05
}

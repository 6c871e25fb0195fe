//! Engine configuration and its builder.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALPHA_LIKE, DEFAULT_ALPHA_LIKE_MAX, DEFAULT_GAMMA_RATE, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TOLERANCE,
};
use crate::error::ConfigError;

/// Validated engine parameters.
///
/// Construct via [`EngineConfig::default`] or [`EngineConfigBuilder`]; the
/// engine re-validates on every (re)configuration and rejects the whole
/// change on any violation, keeping its previous configuration.
///
/// # Examples
///
/// ```
/// use picsy_core::config::EngineConfig;
/// let config = EngineConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.alpha_like_default, 0.05);
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Evaluation weight moved per like when the liker has no override.
    pub alpha_like_default: f64,
    /// Ceiling on any per-like transfer; overrides are clamped to it.
    pub alpha_like_max: f64,
    /// Fraction of off-diagonal weight returned to self-budget per
    /// natural-recovery pass.
    pub gamma_rate: f64,
    /// Iteration cap for the contribution solve.
    pub max_iterations: u32,
    /// L1 convergence tolerance for the contribution solve.
    pub tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha_like_default: DEFAULT_ALPHA_LIKE,
            alpha_like_max: DEFAULT_ALPHA_LIKE_MAX,
            gamma_rate: DEFAULT_GAMMA_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Check all parameter bounds.
    ///
    /// `alpha_like_default ∈ (0, alpha_like_max]`, `alpha_like_max ∈ (0, 1)`,
    /// `gamma_rate ∈ [0, 1)`, `max_iterations ≥ 1`, `tolerance > 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0 < self.alpha_like_max && self.alpha_like_max < 1.0) {
            return Err(ConfigError::AlphaMaxOutOfRange(self.alpha_like_max));
        }
        if !(0.0 < self.alpha_like_default && self.alpha_like_default <= self.alpha_like_max) {
            return Err(ConfigError::AlphaDefaultOutOfRange {
                value: self.alpha_like_default,
                max: self.alpha_like_max,
            });
        }
        if !(0.0..1.0).contains(&self.gamma_rate) {
            return Err(ConfigError::GammaOutOfRange(self.gamma_rate));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }
        if self.tolerance <= 0.0 {
            return Err(ConfigError::NonPositiveTolerance(self.tolerance));
        }
        Ok(())
    }

    /// Start a builder seeded with this configuration's values.
    ///
    /// Fields not overridden carry over, which is how partial
    /// reconfiguration is expressed:
    ///
    /// ```
    /// use picsy_core::config::EngineConfig;
    /// let prior = EngineConfig::default();
    /// let next = prior.to_builder().gamma_rate(0.2).build().unwrap();
    /// assert_eq!(next.gamma_rate, 0.2);
    /// assert_eq!(next.alpha_like_default, prior.alpha_like_default);
    /// ```
    pub fn to_builder(self) -> EngineConfigBuilder {
        EngineConfigBuilder { config: self }
    }
}

/// Field-by-field builder over an [`EngineConfig`].
///
/// `build` validates, so an invalid combination can never escape.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alpha_like_default(mut self, value: f64) -> Self {
        self.config.alpha_like_default = value;
        self
    }

    pub fn alpha_like_max(mut self, value: f64) -> Self {
        self.config.alpha_like_max = value;
        self
    }

    pub fn gamma_rate(mut self, value: f64) -> Self {
        self.config.gamma_rate = value;
        self
    }

    pub fn max_iterations(mut self, value: u32) -> Self {
        self.config.max_iterations = value;
        self
    }

    pub fn tolerance(mut self, value: f64) -> Self {
        self.config.tolerance = value;
        self
    }

    /// Validate and return the finished configuration.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

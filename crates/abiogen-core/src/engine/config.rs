use super::environment::{CONCENTRATION_RANGE, EnvironmentSample, PH_RANGE, TEMPERATURE_RANGE};
use serde::Deserialize;
use std::ops::Range;
use thiserror::Error;

pub const DEFAULT_TRIALS: u64 = 20_000;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MIN_CHAIN_LENGTH: usize = 4;
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 20;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Trial count must be positive")]
    ZeroTrials,

    #[error("Invalid chain length range [{min}, {max}]: bounds must satisfy 1 <= min <= max")]
    InvalidChainLength { min: usize, max: usize },

    #[error("Interval '{name}' must satisfy lower < upper, got ({lower}, {upper})")]
    InvalidInterval {
        name: &'static str,
        lower: f64,
        upper: f64,
    },

    #[error("Viability bound '{name}' = {value} lies outside the sampling range [{min}, {max})")]
    WindowOutsideSampling {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// An open interval `(lower, upper)`; both bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenInterval {
    pub lower: f64,
    pub upper: f64,
}

impl OpenInterval {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower < value && value < self.upper
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        // Written so that NaN bounds are rejected too.
        if self.lower < self.upper {
            Ok(())
        } else {
            Err(ConfigError::InvalidInterval {
                name,
                lower: self.lower,
                upper: self.upper,
            })
        }
    }

    fn validate_within(&self, name: &'static str, range: Range<f64>) -> Result<(), ConfigError> {
        self.validate(name)?;
        for value in [self.lower, self.upper] {
            if value < range.start || value > range.end {
                return Err(ConfigError::WindowOutsideSampling {
                    name,
                    value,
                    min: range.start,
                    max: range.end,
                });
            }
        }
        Ok(())
    }
}

/// The narrow environmental regime in which a trial proceeds to synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ViabilityWindow {
    pub temperature: OpenInterval,
    pub ph: OpenInterval,
    /// Exclusive lower bound on concentration.
    pub min_concentration: f64,
}

impl Default for ViabilityWindow {
    fn default() -> Self {
        Self {
            temperature: OpenInterval::new(35.0, 45.0),
            ph: OpenInterval::new(6.5, 7.5),
            min_concentration: 0.8,
        }
    }
}

impl ViabilityWindow {
    pub fn admits(&self, sample: &EnvironmentSample) -> bool {
        self.temperature.contains(sample.temperature)
            && self.ph.contains(sample.ph)
            && sample.concentration > self.min_concentration
    }

    /// Checks that the window is well formed and nested inside the sampling ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.temperature
            .validate_within("viability.temperature", TEMPERATURE_RANGE)?;
        self.ph.validate_within("viability.ph", PH_RANGE)?;
        let concentration = self.min_concentration;
        if !CONCENTRATION_RANGE.contains(&concentration) {
            return Err(ConfigError::WindowOutsideSampling {
                name: "viability.min-concentration",
                value: concentration,
                min: CONCENTRATION_RANGE.start,
                max: CONCENTRATION_RANGE.end,
            });
        }
        Ok(())
    }
}

/// Descriptor bounds a parsed candidate must fall strictly within to count as stable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct StabilityThresholds {
    pub molecular_weight: OpenInterval,
    pub log_p: OpenInterval,
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            molecular_weight: OpenInterval::new(200.0, 2000.0),
            log_p: OpenInterval::new(-3.0, 1.0),
        }
    }
}

impl StabilityThresholds {
    pub fn admits(&self, molecular_weight: f64, log_p: f64) -> bool {
        self.molecular_weight.contains(molecular_weight) && self.log_p.contains(log_p)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.molecular_weight
            .validate("stability.molecular-weight")?;
        self.log_p.validate("stability.log-p")
    }
}

/// Inclusive bounds on the number of residues in a candidate chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainLength {
    pub min: usize,
    pub max: usize,
}

impl Default for ChainLength {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_CHAIN_LENGTH,
            max: DEFAULT_MAX_CHAIN_LENGTH,
        }
    }
}

impl ChainLength {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min >= 1 && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidChainLength {
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub trials: u64,
    pub seed: u64,
    pub chain_length: ChainLength,
    pub viability: ViabilityWindow,
    pub stability: StabilityThresholds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            chain_length: ChainLength::default(),
            viability: ViabilityWindow::default(),
            stability: StabilityThresholds::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        self.chain_length.validate()?;
        self.viability.validate()?;
        self.stability.validate()
    }
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    trials: Option<u64>,
    seed: Option<u64>,
    chain_length: Option<ChainLength>,
    viability: Option<ViabilityWindow>,
    stability: Option<StabilityThresholds>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trials(mut self, trials: u64) -> Self {
        self.trials = Some(trials);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn chain_length(mut self, min: usize, max: usize) -> Self {
        self.chain_length = Some(ChainLength { min, max });
        self
    }
    pub fn viability(mut self, window: ViabilityWindow) -> Self {
        self.viability = Some(window);
        self
    }
    pub fn stability(mut self, thresholds: StabilityThresholds) -> Self {
        self.stability = Some(thresholds);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            trials: self.trials.unwrap_or(DEFAULT_TRIALS),
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            chain_length: self.chain_length.unwrap_or_default(),
            viability: self.viability.unwrap_or_default(),
            stability: self.stability.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

use crate::cli::Cli;
use crate::error::{CliError, Result};
use abiogen::engine::config::{
    ChainLength, OpenInterval, SimulationConfig, SimulationConfigBuilder, StabilityThresholds,
    ViabilityWindow,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialChainLength {
    min: Option<usize>,
    max: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialViabilityWindow {
    temperature: Option<OpenInterval>,
    ph: Option<OpenInterval>,
    min_concentration: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialStabilityThresholds {
    molecular_weight: Option<OpenInterval>,
    log_p: Option<OpenInterval>,
}

/// Mirror of the simulation configuration in which every key is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialSimulationConfig {
    trials: Option<u64>,
    seed: Option<u64>,
    chain_length: Option<PartialChainLength>,
    viability: Option<PartialViabilityWindow>,
    stability: Option<PartialStabilityThresholds>,
}

impl PartialSimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Fills unset keys from defaults, lets command-line flags win, and validates the result.
    pub fn merge_with_cli(self, cli: &Cli) -> Result<SimulationConfig> {
        let chain_defaults = ChainLength::default();
        let chain = self.chain_length.unwrap_or_default();

        let window_defaults = ViabilityWindow::default();
        let window = self.viability.unwrap_or_default();

        let threshold_defaults = StabilityThresholds::default();
        let thresholds = self.stability.unwrap_or_default();

        let mut builder = SimulationConfigBuilder::new()
            .chain_length(
                chain.min.unwrap_or(chain_defaults.min),
                chain.max.unwrap_or(chain_defaults.max),
            )
            .viability(ViabilityWindow {
                temperature: window.temperature.unwrap_or(window_defaults.temperature),
                ph: window.ph.unwrap_or(window_defaults.ph),
                min_concentration: window
                    .min_concentration
                    .unwrap_or(window_defaults.min_concentration),
            })
            .stability(StabilityThresholds {
                molecular_weight: thresholds
                    .molecular_weight
                    .unwrap_or(threshold_defaults.molecular_weight),
                log_p: thresholds.log_p.unwrap_or(threshold_defaults.log_p),
            });

        if let Some(trials) = cli.trials.or(self.trials) {
            builder = builder.trials(trials);
        }
        if let Some(seed) = cli.seed.or(self.seed) {
            builder = builder.seed(seed);
        }

        let config = builder.build()?;
        debug!("Resolved simulation configuration: {:?}", config);
        Ok(config)
    }
}

pub fn build_config(cli: &Cli) -> Result<SimulationConfig> {
    let file_config = match &cli.config {
        Some(path) => PartialSimulationConfig::from_file(path)?,
        None => PartialSimulationConfig::default(),
    };
    file_config.merge_with_cli(cli)
}

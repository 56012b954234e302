use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid trial count {requested}: a simulation needs at least one trial")]
    InvalidTrialCount { requested: u64 },
}

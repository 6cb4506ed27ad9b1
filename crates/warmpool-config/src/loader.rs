//! Configuration loader (defaults + file + env merge).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::WarmpoolConfig;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (WARMPOOL_ prefix, `__` separates sections,
///    e.g. `WARMPOOL_REGISTRY__RNG_SEED=7`)
pub fn load_config(config_path: Option<&str>) -> Result<WarmpoolConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(WarmpoolConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("WARMPOOL_").split("__"));

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

//! Configuration schema types.

use serde::{Deserialize, Serialize};

/// Top-level warmpool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarmpoolConfig {
    /// Registry settings.
    #[serde(default)]
    pub registry: RegistrySettings,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Registry-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySettings {
    /// Seed for template selection. `None` seeds from OS entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Growth ceiling applied to pools built without an explicit one.
    #[serde(default = "default_max_size")]
    pub default_max_size: usize,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            rng_seed: None,
            default_max_size: default_max_size(),
        }
    }
}

fn default_max_size() -> usize {
    1000
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "warmpool_runtime=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

//! Integration tests for warmpool-config schema types.

use warmpool_config::schema::{LoggingConfig, RegistrySettings, WarmpoolConfig};

#[test]
fn warmpool_config_default_values() {
    let config = WarmpoolConfig::default();
    assert_eq!(config.registry.rng_seed, None);
    assert_eq!(config.registry.default_max_size, 1000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn warmpool_config_serde_roundtrip() {
    let mut config = WarmpoolConfig::default();
    config.registry.rng_seed = Some(7);
    let json = serde_json::to_string(&config).expect("serialize");
    let back: WarmpoolConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.registry.rng_seed, Some(7));
    assert_eq!(back.logging.level, config.logging.level);
}

#[test]
fn unknown_top_level_field_rejected() {
    let json = r#"{ "registry": {}, "pools": [] }"#;
    assert!(serde_json::from_str::<WarmpoolConfig>(json).is_err());
}

#[test]
fn partial_sections_fill_defaults() {
    let json = r#"{ "registry": { "rng_seed": 42 } }"#;
    let config: WarmpoolConfig = serde_json::from_str(json).expect("deserialize");
    assert_eq!(config.registry.rng_seed, Some(42));
    assert_eq!(config.registry.default_max_size, 1000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn registry_settings_default() {
    let settings = RegistrySettings::default();
    assert_eq!(settings.default_max_size, 1000);
}

#[test]
fn logging_default_level() {
    let log = LoggingConfig::default();
    assert_eq!(log.level, "info");
}

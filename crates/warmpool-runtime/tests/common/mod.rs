//! Shared fixtures for warmpool-runtime integration tests.

#![allow(dead_code)]

use warmpool_runtime::{PoolRegistry, RegistryConfig, SimFactory};
use warmpool_types::{PoolDefinition, PoolKey};

/// Builds a definition over the given template names.
pub fn definition(key: &str, templates: &[&str]) -> PoolDefinition<String> {
    PoolDefinition::new(
        PoolKey::new(key).expect("key"),
        templates.iter().map(|t| t.to_string()).collect(),
    )
}

/// A seeded registry over a fresh simulator, initialized with `defs`.
pub fn registry_with(defs: Vec<PoolDefinition<String>>) -> PoolRegistry<SimFactory> {
    let mut registry = PoolRegistry::new(SimFactory::new(), RegistryConfig { rng_seed: Some(42) });
    let report = registry.initialize(defs);
    assert!(report.is_clean(), "init failed: {:?}", report.failed);
    registry
}

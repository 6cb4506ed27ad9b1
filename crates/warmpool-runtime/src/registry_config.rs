//! Configuration for a pool registry.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Configuration for a [`PoolRegistry`](crate::PoolRegistry).
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Seed for template selection. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl RegistryConfig {
    /// Builds the RNG used to pick templates.
    pub(crate) fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_config_is_unseeded() {
        assert!(RegistryConfig::default().rng_seed.is_none());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = RegistryConfig { rng_seed: Some(11) };
        let a: u64 = cfg.rng().gen();
        let b: u64 = cfg.rng().gen();
        assert_eq!(a, b);
    }
}

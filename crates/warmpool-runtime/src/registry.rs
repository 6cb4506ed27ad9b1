//! Registry of keyed pools.
//!
//! The registry owns the engine factory and every pool, routes checkouts
//! by key and routes returns by the tag each instance carries. It is an
//! ordinary value: construct one, initialize it once, and pass it to
//! whoever needs pooled instances.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{error, info, warn};
use warmpool_types::{PoolDefinition, PoolKey};

use crate::error::RuntimeError;
use crate::factory::InstanceFactory;
use crate::instance::PooledInstance;
use crate::metrics::RegistryMetrics;
use crate::pool::{Pool, PoolStats};
use crate::registry_config::RegistryConfig;

/// Outcome of [`PoolRegistry::initialize`].
#[derive(Debug, Default)]
pub struct InitReport {
    /// Pools built successfully, in definition order.
    pub ready: Vec<PoolKey>,
    /// Pools that could not be built, with the reason.
    pub failed: Vec<(PoolKey, RuntimeError)>,
    /// True when the registry was already initialized and nothing was done.
    pub already_initialized: bool,
}

impl InitReport {
    /// True when every definition produced a pool.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.already_initialized
    }

    /// Converts the report into the first failure, if any.
    ///
    /// # Errors
    /// Returns `RuntimeError::AlreadyInitialized` when the call was ignored,
    /// otherwise the error of the first pool that failed to build.
    pub fn into_result(self) -> Result<Vec<PoolKey>, RuntimeError> {
        if self.already_initialized {
            return Err(RuntimeError::AlreadyInitialized);
        }
        match self.failed.into_iter().next() {
            Some((_, e)) => Err(e),
            None => Ok(self.ready),
        }
    }
}

/// What happened to an instance handed to [`PoolRegistry::give_back`].
#[derive(Debug)]
pub enum ReturnOutcome {
    /// Re-queued in its owning pool.
    Recycled {
        /// Owning pool.
        key: PoolKey,
    },
    /// Destroyed through the factory because its provenance was invalid.
    Disposed {
        /// `UntaggedReturn` or `UnknownPoolKey`.
        reason: RuntimeError,
    },
}

impl ReturnOutcome {
    /// True if the instance went back into a pool.
    pub fn is_recycled(&self) -> bool {
        matches!(self, Self::Recycled { .. })
    }
}

/// Owns the engine factory and every pool, keyed by [`PoolKey`].
pub struct PoolRegistry<F: InstanceFactory> {
    factory: F,
    rng: StdRng,
    pools: HashMap<PoolKey, Pool<F>>,
    initialized: bool,
    metrics: Arc<RegistryMetrics>,
}

impl<F: InstanceFactory> PoolRegistry<F> {
    /// Creates an empty, uninitialized registry.
    pub fn new(factory: F, config: RegistryConfig) -> Self {
        Self {
            factory,
            rng: config.rng(),
            pools: HashMap::new(),
            initialized: false,
            metrics: RegistryMetrics::new_shared(),
        }
    }

    /// Builds one pool per definition.
    ///
    /// A definition that fails validation or prewarm is reported in the
    /// returned [`InitReport`] and skipped; the remaining pools are still
    /// built. When two definitions share a key the first one wins.
    ///
    /// Only the first call has any effect. Later calls log a warning and
    /// return a report with `already_initialized` set.
    pub fn initialize<I>(&mut self, definitions: I) -> InitReport
    where
        I: IntoIterator<Item = PoolDefinition<F::Template>>,
    {
        if self.initialized {
            warn!(pools = self.pools.len(), "registry already initialized; ignoring");
            return InitReport {
                already_initialized: true,
                ..InitReport::default()
            };
        }
        self.initialized = true;

        let mut report = InitReport::default();
        for definition in definitions {
            let key = definition.id.clone();
            if self.pools.contains_key(&key) {
                error!(pool = %key, "duplicate pool key; keeping the first definition");
                report.failed.push((
                    key.clone(),
                    RuntimeError::InvalidDefinition {
                        key,
                        reason: "duplicate pool key".into(),
                    },
                ));
                continue;
            }

            match Pool::build(definition, &mut self.factory, &mut self.rng) {
                Ok(pool) => {
                    self.metrics.record_created(pool.total_created() as u64);
                    self.pools.insert(key.clone(), pool);
                    report.ready.push(key);
                }
                Err(e) => {
                    error!(pool = %key, error = %e, "failed to build pool");
                    report.failed.push((key, e));
                }
            }
        }

        info!(
            ready = report.ready.len(),
            failed = report.failed.len(),
            "pool registry initialized"
        );
        report
    }

    /// Checks out an instance from the pool registered under `key`.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownPoolKey` if no such pool exists,
    /// `RuntimeError::PoolExhausted` if it has nothing to give, or
    /// `RuntimeError::Instantiation` if growing the pool failed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn checkout(&mut self, key: &str) -> Result<PooledInstance<F::Handle>, RuntimeError> {
        let Some(pool) = self.pools.get_mut(key) else {
            self.metrics.record_unknown_key();
            warn!(pool = key, "checkout from unknown pool");
            return Err(RuntimeError::UnknownPoolKey {
                key: key.to_string(),
            });
        };

        let created_before = pool.total_created();
        let result = pool.checkout(&mut self.factory, &mut self.rng);
        let grown = pool.total_created() - created_before;
        if grown > 0 {
            self.metrics.record_created(grown as u64);
        }

        match &result {
            Ok(_) => self.metrics.record_checkout(),
            Err(RuntimeError::PoolExhausted { .. }) => self.metrics.record_exhausted(),
            Err(_) => {}
        }
        result
    }

    /// Returns an instance to the pool that created it.
    ///
    /// The tag must name a pool of this registry and carry that pool's id.
    /// Anything else is destroyed through the factory: untagged instances,
    /// members of another registry's pool, members of a pool that has since
    /// been shut down, and members the pool does not count as checked out.
    #[tracing::instrument(level = "debug", skip_all, fields(member = %instance.name()))]
    pub fn give_back(&mut self, instance: PooledInstance<F::Handle>) -> ReturnOutcome {
        let Some(tag) = instance.tag().cloned() else {
            warn!(
                member = %instance.name(),
                "returned instance has no pool tag; destroying it"
            );
            let reason = RuntimeError::UntaggedReturn {
                name: instance.name().to_string(),
            };
            self.dispose(instance);
            return ReturnOutcome::Disposed { reason };
        };

        let owner = tag.owner().clone();
        match self.pools.get_mut(&owner) {
            Some(pool) if pool.owns(&tag) && pool.outstanding() > 0 => {
                pool.release(instance, &mut self.factory);
                self.metrics.record_recycled();
                ReturnOutcome::Recycled { key: owner }
            }
            _ => {
                self.metrics.record_unknown_key();
                warn!(
                    member = %instance.name(),
                    pool = %owner,
                    "returned instance was not handed out by a live pool; destroying it"
                );
                self.dispose(instance);
                ReturnOutcome::Disposed {
                    reason: RuntimeError::UnknownPoolKey {
                        key: owner.to_string(),
                    },
                }
            }
        }
    }

    fn dispose(&mut self, instance: PooledInstance<F::Handle>) {
        self.factory.destroy(instance.detach());
        self.metrics.record_disposed();
    }

    /// Destroys every idle member and pool group, then drops all pools.
    ///
    /// Checked-out instances stay with their holders; giving them back
    /// afterwards disposes of them. The registry may be initialized again.
    /// Returns the number of destroyed members.
    pub fn shutdown(&mut self) -> usize {
        let mut destroyed = 0;
        for (_, pool) in self.pools.drain() {
            destroyed += pool.teardown(&mut self.factory);
        }
        self.initialized = false;
        info!(destroyed, "pool registry shut down");
        destroyed
    }

    /// Whether `initialize` has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The pool registered under `key`.
    pub fn pool(&self, key: &str) -> Option<&Pool<F>> {
        self.pools.get(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&PoolKey> {
        let mut keys: Vec<_> = self.pools.keys().collect();
        keys.sort();
        keys
    }

    /// Number of pools.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// True if no pools are registered.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Counters of every pool, sorted by key.
    pub fn stats(&self) -> Vec<PoolStats> {
        let mut stats: Vec<_> = self.pools.values().map(Pool::stats).collect();
        stats.sort_by(|a, b| a.key.cmp(&b.key));
        stats
    }

    /// Returns a shared handle to the registry metrics.
    pub fn metrics(&self) -> Arc<RegistryMetrics> {
        self.metrics.clone()
    }

    /// The engine factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Mutable access to the engine factory.
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }
}

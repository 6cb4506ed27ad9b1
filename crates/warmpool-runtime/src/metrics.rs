//! Registry-wide pooling metrics.
//!
//! Counters are atomics behind an `Arc` so a diagnostics overlay or stats
//! thread can read them while the registry's owner keeps using it. Use
//! [`MetricsSnapshot`] for a copyable view.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared pooling counters collected by [`PoolRegistry`](crate::PoolRegistry).
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    /// Successful checkouts.
    pub checkouts: AtomicU64,
    /// Checkouts refused because the pool was exhausted.
    pub exhausted: AtomicU64,
    /// Checkouts or returns that named an unknown pool.
    pub unknown_keys: AtomicU64,
    /// Members created by the factory (prewarm and growth).
    pub created: AtomicU64,
    /// Instances given back and re-queued.
    pub recycled: AtomicU64,
    /// Instances destroyed on return (untagged or unknown owner).
    pub disposed: AtomicU64,
}

/// A point-in-time snapshot of [`RegistryMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Successful checkouts.
    pub checkouts: u64,
    /// Refused checkouts.
    pub exhausted: u64,
    /// Unknown-key lookups.
    pub unknown_keys: u64,
    /// Members created.
    pub created: u64,
    /// Instances recycled.
    pub recycled: u64,
    /// Instances disposed.
    pub disposed: u64,
}

impl RegistryMetrics {
    /// Creates a new zeroed metrics instance wrapped in an [`Arc`].
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Records a successful checkout.
    pub fn record_checkout(&self) {
        self.checkouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a checkout refused by an exhausted pool.
    pub fn record_exhausted(&self) {
        self.exhausted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup against a key with no pool.
    pub fn record_unknown_key(&self) {
        self.unknown_keys.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `count` newly created members.
    pub fn record_created(&self, count: u64) {
        self.created.fetch_add(count, Ordering::Relaxed);
    }

    /// Records an instance re-queued into its pool.
    pub fn record_recycled(&self) {
        self.recycled.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an instance destroyed on return.
    pub fn record_disposed(&self) {
        self.disposed.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            checkouts: self.checkouts.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
            unknown_keys: self.unknown_keys.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            recycled: self.recycled.load(Ordering::Relaxed),
            disposed: self.disposed.load(Ordering::Relaxed),
        }
    }
}

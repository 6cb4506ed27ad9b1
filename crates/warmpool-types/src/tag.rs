//! Provenance metadata stamped onto every pool member.

use serde::{Deserialize, Serialize};

use crate::key::PoolKey;

/// Records which pool produced an instance.
///
/// Stamped once when the member is created and never mutated afterwards,
/// so a returned instance can be routed back to its owner without the
/// caller remembering where it came from. `pool_id` identifies the pool
/// build, not just its key: a pool rebuilt under the same key, or a
/// same-named pool in another registry, has a different id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolTag {
    owner: PoolKey,
    pool_id: u64,
}

impl PoolTag {
    /// Creates a tag owned by pool `pool_id`, registered under `owner`.
    pub fn new(owner: PoolKey, pool_id: u64) -> Self {
        Self { owner, pool_id }
    }

    /// Key of the pool that owns the tagged instance.
    pub fn owner(&self) -> &PoolKey {
        &self.owner
    }

    /// Unique id of the pool build that created the instance.
    pub fn pool_id(&self) -> u64 {
        self.pool_id
    }
}

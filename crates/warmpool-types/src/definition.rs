//! Static description of one pool.

use serde::{Deserialize, Serialize};

use crate::error::WarmpoolError;
use crate::key::PoolKey;

/// Default growth ceiling for expandable pools.
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Configuration of a single pool: key, prewarm size, candidate templates
/// and growth policy.
///
/// `T` is whatever the host engine instantiates from (a prefab, an asset
/// id, a blueprint struct). Each new member is built from one template
/// chosen uniformly at random.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDefinition<T> {
    /// Unique pool key.
    pub id: PoolKey,
    /// Number of members created eagerly when the pool is built.
    #[serde(default)]
    pub initial_size: usize,
    /// Candidate templates. Must not be empty.
    pub templates: Vec<T>,
    /// Whether the pool may create members past `initial_size`.
    #[serde(default)]
    pub expandable: bool,
    /// Upper bound on members ever created by this pool.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

impl<T> PoolDefinition<T> {
    /// Creates a non-expandable definition with no prewarmed members.
    pub fn new(id: PoolKey, templates: Vec<T>) -> Self {
        Self {
            id,
            initial_size: 0,
            templates,
            expandable: false,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Sets the number of members created at construction.
    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Allows growth up to `max_size` members in total.
    pub fn expandable_to(mut self, max_size: usize) -> Self {
        self.expandable = true;
        self.max_size = max_size;
        self
    }

    /// Makes the pool exactly `size` members, never growing.
    pub fn fixed(mut self, size: usize) -> Self {
        self.initial_size = size;
        self.expandable = false;
        self.max_size = size;
        self
    }

    /// Checks the definition can back a pool.
    ///
    /// # Errors
    /// Returns an invalid-input error if there are no templates or
    /// `initial_size` exceeds `max_size`.
    pub fn validate(&self) -> Result<(), WarmpoolError> {
        if self.templates.is_empty() {
            return Err(WarmpoolError::invalid_input("template list is empty")
                .with_context(format!("pool: {}", self.id)));
        }
        if self.initial_size > self.max_size {
            return Err(WarmpoolError::invalid_input(format!(
                "initial_size {} exceeds max_size {}",
                self.initial_size, self.max_size
            ))
            .with_context(format!("pool: {}", self.id)));
        }
        Ok(())
    }

    /// Most members this pool can ever hold.
    pub fn capacity(&self) -> usize {
        if self.expandable {
            self.max_size
        } else {
            self.initial_size
        }
    }
}

//! Pool identity.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::WarmpoolError;

/// Unique key of a pool inside a registry.
/// Example: `Bullets`, `Enemies/Grunt`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PoolKey(String);

impl PoolKey {
    /// Creates a new `PoolKey`, rejecting empty or blank keys.
    pub fn new(key: impl Into<String>) -> Result<Self, WarmpoolError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(WarmpoolError::invalid_input("pool key cannot be empty"));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PoolKey {
    type Err = WarmpoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PoolKey {
    type Error = WarmpoolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PoolKey> for String {
    fn from(key: PoolKey) -> Self {
        key.0
    }
}

// Lets `HashMap<PoolKey, _>` be queried with a plain `&str`.
impl Borrow<str> for PoolKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PoolKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

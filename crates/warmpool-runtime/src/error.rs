//! Runtime-specific error types.

use thiserror::Error;
use warmpool_types::{DiagnosticError, ErrorKind, PoolKey, WarmpoolError};

use crate::factory::FactoryError;

/// Errors from pools and the registry.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Definition cannot back a pool.
    #[error("invalid definition for pool '{key}': {reason}")]
    InvalidDefinition { key: PoolKey, reason: String },
    /// No free member and growth is not permitted.
    #[error("pool '{key}' exhausted: all {capacity} members are checked out")]
    PoolExhausted { key: PoolKey, capacity: usize },
    /// No pool is registered under this key.
    #[error("unknown pool key: {key}")]
    UnknownPoolKey { key: String },
    /// Instance came back without pool provenance.
    #[error("instance '{name}' returned without a pool tag")]
    UntaggedReturn { name: String },
    /// `initialize` ran on a registry that already holds pools.
    #[error("registry already initialized; definitions ignored")]
    AlreadyInitialized,
    /// The factory could not create a member.
    #[error("failed to instantiate member of pool '{key}': {source}")]
    Instantiation {
        key: PoolKey,
        #[source]
        source: FactoryError,
    },
}

impl From<RuntimeError> for WarmpoolError {
    fn from(e: RuntimeError) -> Self {
        let kind = match &e {
            RuntimeError::InvalidDefinition { .. } => ErrorKind::InvalidInput,
            RuntimeError::PoolExhausted { .. } => ErrorKind::ResourceExhausted,
            RuntimeError::UnknownPoolKey { .. } => ErrorKind::NotFound,
            RuntimeError::UntaggedReturn { .. } => ErrorKind::InvalidInput,
            RuntimeError::AlreadyInitialized => ErrorKind::InvalidInput,
            RuntimeError::Instantiation { .. } => ErrorKind::Internal,
        };
        WarmpoolError::new(kind, e.to_string())
    }
}

impl DiagnosticError for RuntimeError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidDefinition { reason, .. } => {
                Some(format!("The pool definition was rejected: {reason}."))
            }
            Self::PoolExhausted { key, .. } => Some(format!(
                "Every member of '{key}' is checked out and the pool cannot grow."
            )),
            Self::UnknownPoolKey { key } => Some(format!(
                "No live pool '{key}' in this registry created the instance."
            )),
            Self::UntaggedReturn { .. } => Some(
                "The instance was never created by a pool, or it was detached from one."
                    .into(),
            ),
            Self::AlreadyInitialized => {
                Some("Pools are only built by the first initialize call.".into())
            }
            Self::Instantiation { source, .. } => {
                Some(format!("The engine refused to create an instance: {source}."))
            }
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::InvalidDefinition { .. } => Some(
                "Give the pool at least one template and keep initial_size <= max_size.".into(),
            ),
            Self::PoolExhausted { .. } => Some(
                "Return instances sooner, raise initial_size, or mark the pool expandable with a higher max_size."
                    .into(),
            ),
            Self::UnknownPoolKey { .. } => {
                Some("Add a definition with this key before initializing the registry.".into())
            }
            Self::UntaggedReturn { .. } => Some(
                "Only give back instances obtained from checkout, and do not detach them first."
                    .into(),
            ),
            Self::AlreadyInitialized => {
                Some("Call shutdown before initializing the registry again.".into())
            }
            Self::Instantiation { .. } => None,
        }
    }
}

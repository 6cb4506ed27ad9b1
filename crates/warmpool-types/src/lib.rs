//! # warmpool-types
//!
//! Domain types for warmpool object pools.
//! This crate contains pure data types with no dependencies beyond serde.

pub mod definition;
pub mod error;
pub mod key;
pub mod tag;

// Re-exports for convenience.
pub use definition::{PoolDefinition, DEFAULT_MAX_SIZE};
pub use error::{DiagnosticError, ErrorKind, WarmpoolError};
pub use key::PoolKey;
pub use tag::PoolTag;

//! # warmpool-runtime
//!
//! Key-partitioned object pools for engine instances that are expensive
//! to create and destroy.
//!
//! Build a [`PoolRegistry`] around an [`InstanceFactory`], initialize it
//! with [`PoolDefinition`](warmpool_types::PoolDefinition)s, then
//! `checkout` by key and `give_back` whatever you checked out. Returned
//! instances find their pool through the [`PoolTag`](warmpool_types::PoolTag)
//! they carry.

pub mod error;
pub mod factory;
pub mod instance;
pub mod metrics;
pub mod pool;
pub mod registry;
pub mod registry_config;
pub mod sampling;
pub mod sim;

pub use error::RuntimeError;
pub use factory::{FactoryError, InstanceFactory};
pub use instance::PooledInstance;
pub use metrics::{MetricsSnapshot, RegistryMetrics};
pub use pool::{Pool, PoolStats};
pub use registry::{InitReport, PoolRegistry, ReturnOutcome};
pub use registry_config::RegistryConfig;
pub use sim::{SimFactory, SimGroup, SimHandle, SimObject};

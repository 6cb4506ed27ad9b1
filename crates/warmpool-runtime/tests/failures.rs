//! Construction and growth failures.

mod common;

use common::definition;
use warmpool_runtime::{PoolRegistry, RegistryConfig, RuntimeError, SimFactory};

fn registry(factory: SimFactory) -> PoolRegistry<SimFactory> {
    PoolRegistry::new(factory, RegistryConfig { rng_seed: Some(3) })
}

#[test]
fn invalid_definition_does_not_abort_siblings() {
    let mut reg = registry(SimFactory::new());
    let report = reg.initialize([
        definition("Empty", &[]),
        definition("Good", &["T"]).fixed(2),
    ]);

    assert_eq!(report.ready.len(), 1);
    assert_eq!(report.ready[0].as_str(), "Good");
    assert!(matches!(
        report.failed[0].1,
        RuntimeError::InvalidDefinition { .. }
    ));
    assert!(reg.pool("Empty").is_none());
    assert!(reg.checkout("Good").is_ok());
}

#[test]
fn oversized_prewarm_is_invalid() {
    let mut reg = registry(SimFactory::new());
    let mut def = definition("Big", &["T"]).with_initial_size(5);
    def.max_size = 2;
    let report = reg.initialize([def]);
    assert!(matches!(
        report.into_result(),
        Err(RuntimeError::InvalidDefinition { .. })
    ));
    assert_eq!(reg.factory().created(), 0);
}

#[test]
fn prewarm_failure_aborts_only_that_pool() {
    let mut reg = registry(SimFactory::failing_after(3));
    let report = reg.initialize([
        definition("Small", &["T"]).fixed(2),
        definition("Large", &["T"]).fixed(4),
    ]);

    assert_eq!(report.ready.len(), 1);
    assert!(matches!(
        report.failed[0].1,
        RuntimeError::Instantiation { .. }
    ));
    assert!(reg.pool("Large").is_none());
    // The one member Large managed to create was cleaned up.
    assert_eq!(reg.factory().live_count(), 2);
    assert_eq!(reg.factory().groups(), ["Small".to_string()]);
}

#[test]
fn growth_failure_propagates_and_keeps_pool_usable() {
    let mut reg = registry(SimFactory::failing_after(1));
    reg.initialize([definition("Grow", &["T"])
        .with_initial_size(1)
        .expandable_to(5)]);

    let held = reg.checkout("Grow").expect("prewarmed member");
    let err = reg.checkout("Grow").expect_err("factory refuses");
    assert!(matches!(err, RuntimeError::Instantiation { .. }));

    let pool = reg.pool("Grow").expect("pool");
    assert_eq!(pool.total_created(), 1);
    assert_eq!(pool.free_count(), 0);

    assert!(reg.give_back(held).is_recycled());
    assert!(reg.checkout("Grow").is_ok());
}

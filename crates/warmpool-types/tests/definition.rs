//! Integration tests for pool definitions and their serialized form.

use proptest::prelude::*;
use warmpool_types::{PoolDefinition, PoolKey, PoolTag, DEFAULT_MAX_SIZE};

#[test]
fn deserialize_applies_asset_defaults() {
    let json = r#"{ "id": "Pool1", "initial_size": 2, "templates": ["grunt", "brute"] }"#;
    let def: PoolDefinition<String> = serde_json::from_str(json).expect("deserialize");
    assert_eq!(def.id.as_str(), "Pool1");
    assert!(!def.expandable);
    assert_eq!(def.max_size, DEFAULT_MAX_SIZE);
    assert_eq!(def.templates.len(), 2);
}

#[test]
fn deserialize_rejects_blank_id() {
    let json = r#"{ "id": " ", "templates": ["grunt"] }"#;
    assert!(serde_json::from_str::<PoolDefinition<String>>(json).is_err());
}

#[test]
fn tag_reports_owner() {
    let key = PoolKey::new("Bullets").expect("key");
    let tag = PoolTag::new(key.clone(), 4);
    assert_eq!(tag.owner(), &key);
    assert_eq!(tag.pool_id(), 4);
}

proptest! {
    /// Any non-empty definition whose prewarm fits under the ceiling validates.
    #[test]
    fn within_bounds_always_validates(
        initial in 0usize..64,
        extra in 0usize..64,
        templates in 1usize..8,
    ) {
        let def = PoolDefinition::new(PoolKey::new("P").expect("key"), vec![0u8; templates])
            .with_initial_size(initial)
            .expandable_to(initial + extra);
        prop_assert!(def.validate().is_ok());
    }

    /// Prewarming past the ceiling is always rejected.
    #[test]
    fn above_bounds_always_rejected(max in 0usize..64, over in 1usize..64) {
        let mut def = PoolDefinition::new(PoolKey::new("P").expect("key"), vec![()])
            .with_initial_size(max + over);
        def.max_size = max;
        prop_assert!(def.validate().is_err());
    }
}

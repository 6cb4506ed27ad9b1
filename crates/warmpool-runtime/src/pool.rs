//! A single keyed pool of reusable engine instances.
//!
//! Idle members wait in a FIFO queue, so the member returned longest ago is
//! handed out first. A pool creates `initial_size` members up front and,
//! when expandable, grows one member at a time up to `max_size`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use tracing::{debug, warn};
use warmpool_types::{PoolDefinition, PoolKey, PoolTag};

use crate::error::RuntimeError;
use crate::factory::InstanceFactory;
use crate::instance::PooledInstance;
use crate::sampling::pick_template_index;

// Process-wide so ids stay unique across registries and rebuilds.
static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Point-in-time counters for one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Pool key.
    pub key: PoolKey,
    /// Members ever created by this pool.
    pub total_created: usize,
    /// Members currently idle.
    pub free: usize,
    /// Members currently checked out.
    pub outstanding: usize,
    /// Most members the pool may hold.
    pub capacity: usize,
    /// Successful checkouts.
    pub checkouts: u64,
    /// Members put back.
    pub releases: u64,
    /// Refused checkouts.
    pub exhaustions: u64,
}

/// One pool: its definition, idle members and bookkeeping.
pub struct Pool<F: InstanceFactory> {
    id: u64,
    definition: PoolDefinition<F::Template>,
    group: F::Group,
    free: VecDeque<PooledInstance<F::Handle>>,
    total_created: usize,
    name_counter: u64,
    outstanding: usize,
    checkouts: u64,
    releases: u64,
    exhaustions: u64,
}

impl<F: InstanceFactory> Pool<F> {
    /// Validates `definition`, creates the pool's group and prewarms
    /// `initial_size` members.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidDefinition` for an unusable definition
    /// and `RuntimeError::Instantiation` if the factory fails while
    /// prewarming. Members created before the failure are destroyed along
    /// with the pool's group.
    pub fn build<R: Rng + ?Sized>(
        definition: PoolDefinition<F::Template>,
        factory: &mut F,
        rng: &mut R,
    ) -> Result<Self, RuntimeError> {
        definition
            .validate()
            .map_err(|e| RuntimeError::InvalidDefinition {
                key: definition.id.clone(),
                reason: e.message,
            })?;

        let group = factory.create_group(definition.id.as_str());
        let mut pool = Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            free: VecDeque::with_capacity(definition.initial_size),
            definition,
            group,
            total_created: 0,
            name_counter: 0,
            outstanding: 0,
            checkouts: 0,
            releases: 0,
            exhaustions: 0,
        };

        if let Err(e) = pool.prewarm(factory, rng) {
            pool.teardown(factory);
            return Err(e);
        }
        debug!(pool = %pool.key(), members = pool.total_created, "pool prewarmed");
        Ok(pool)
    }

    fn prewarm<R: Rng + ?Sized>(&mut self, factory: &mut F, rng: &mut R) -> Result<(), RuntimeError> {
        for _ in 0..self.definition.initial_size {
            self.create_member(factory, rng)?;
        }
        Ok(())
    }

    /// Instantiates one member from a random template and queues it.
    fn create_member<R: Rng + ?Sized>(
        &mut self,
        factory: &mut F,
        rng: &mut R,
    ) -> Result<(), RuntimeError> {
        let index = pick_template_index(rng, self.definition.templates.len());
        let handle = factory
            .create(&self.definition.templates[index])
            .map_err(|source| RuntimeError::Instantiation {
                key: self.definition.id.clone(),
                source,
            })?;

        factory.set_active(&handle, false);
        let name = format!("{} {}", self.definition.id, self.name_counter);
        self.name_counter += 1;
        factory.rename(&handle, &name);
        factory.reparent(&handle, &self.group);
        self.total_created += 1;

        debug!(pool = %self.key(), member = %name, template = index, "created pool member");
        let tag = PoolTag::new(self.definition.id.clone(), self.id);
        self.free.push_back(PooledInstance::tagged(handle, name, tag));
        Ok(())
    }

    /// Hands out the oldest idle member, growing by one first if the pool
    /// is empty and allowed to grow.
    ///
    /// # Errors
    /// Returns `RuntimeError::PoolExhausted` when nothing is free and growth
    /// is not permitted, or `RuntimeError::Instantiation` if growing fails.
    pub fn checkout<R: Rng + ?Sized>(
        &mut self,
        factory: &mut F,
        rng: &mut R,
    ) -> Result<PooledInstance<F::Handle>, RuntimeError> {
        loop {
            if let Some(instance) = self.free.pop_front() {
                self.outstanding += 1;
                self.checkouts += 1;
                return Ok(instance);
            }
            if !self.can_grow() {
                self.exhaustions += 1;
                warn!(
                    pool = %self.key(),
                    created = self.total_created,
                    "trying to check out too many members"
                );
                return Err(RuntimeError::PoolExhausted {
                    key: self.definition.id.clone(),
                    capacity: self.total_created,
                });
            }
            self.create_member(factory, rng)?;
        }
    }

    /// Resets `instance` to its idle state and queues it behind the other
    /// idle members.
    ///
    /// Callers must only pass members this pool handed out; the registry
    /// checks the tag's pool id before routing here.
    pub fn release(&mut self, instance: PooledInstance<F::Handle>, factory: &mut F) {
        let handle = instance.handle();
        factory.set_active(handle, false);
        factory.reset_transform(handle);
        factory.reparent(handle, &self.group);

        debug_assert!(self.outstanding > 0, "release without a matching checkout");
        self.outstanding = self.outstanding.saturating_sub(1);
        self.releases += 1;
        debug!(pool = %self.key(), member = %instance.name(), "member returned");
        self.free.push_back(instance);
    }

    /// Destroys every idle member and the pool's group, returning how many
    /// members were destroyed. Checked-out members are left alone.
    pub fn teardown(mut self, factory: &mut F) -> usize {
        let count = self.free.len();
        for instance in self.free.drain(..) {
            factory.destroy(instance.detach());
        }
        factory.destroy_group(self.group);
        count
    }

    /// Unique id of this pool build, stamped into every member's tag.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether `tag` was stamped by this pool.
    pub fn owns(&self, tag: &PoolTag) -> bool {
        tag.pool_id() == self.id && tag.owner() == &self.definition.id
    }

    /// Pool key.
    pub fn key(&self) -> &PoolKey {
        &self.definition.id
    }

    /// The definition this pool was built from.
    pub fn definition(&self) -> &PoolDefinition<F::Template> {
        &self.definition
    }

    /// Container group of the idle members.
    pub fn group(&self) -> &F::Group {
        &self.group
    }

    /// Number of idle members.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Members ever created by this pool.
    pub fn total_created(&self) -> usize {
        self.total_created
    }

    /// Members currently checked out.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Whether an empty pool may create another member.
    pub fn can_grow(&self) -> bool {
        self.definition.expandable && self.total_created < self.definition.max_size
    }

    /// Snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            key: self.definition.id.clone(),
            total_created: self.total_created,
            free: self.free.len(),
            outstanding: self.outstanding,
            capacity: self.definition.capacity(),
            checkouts: self.checkouts,
            releases: self.releases,
            exhaustions: self.exhaustions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimFactory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn def(initial: usize) -> PoolDefinition<String> {
        PoolDefinition::new(PoolKey::new("Pool1").expect("key"), vec!["T".to_string()])
            .with_initial_size(initial)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    #[test]
    fn prewarm_creates_initial_members() {
        let mut sim = SimFactory::new();
        let pool = Pool::build(def(3).fixed(3), &mut sim, &mut rng()).expect("build");
        assert_eq!(pool.total_created(), 3);
        assert_eq!(pool.free_count(), 3);
        assert_eq!(sim.groups(), ["Pool1".to_string()]);
    }

    #[test]
    fn members_are_named_and_idle() {
        let mut sim = SimFactory::new();
        let mut rng = rng();
        let mut pool = Pool::build(def(2).fixed(2), &mut sim, &mut rng).expect("build");
        let first = pool.checkout(&mut sim, &mut rng).expect("checkout");
        assert_eq!(first.name(), "Pool1 0");
        let obj = sim.object(*first.handle()).expect("alive");
        assert!(!obj.active);
        assert_eq!(obj.name, "Pool1 0");
        assert_eq!(obj.group.as_deref(), Some("Pool1"));
    }

    #[test]
    fn growth_is_iterative_and_bounded() {
        let mut sim = SimFactory::new();
        let mut rng = rng();
        let mut pool = Pool::build(def(0).expandable_to(3), &mut sim, &mut rng).expect("build");
        for _ in 0..3 {
            pool.checkout(&mut sim, &mut rng).expect("checkout");
        }
        assert_eq!(pool.total_created(), 3);
        assert_eq!(pool.outstanding(), 3);
        assert!(!pool.can_grow());
        assert!(matches!(
            pool.checkout(&mut sim, &mut rng),
            Err(RuntimeError::PoolExhausted { capacity: 3, .. })
        ));
        assert_eq!(pool.stats().exhaustions, 1);
    }

    #[test]
    fn release_resets_member() {
        let mut sim = SimFactory::new();
        let mut rng = rng();
        let mut pool = Pool::build(def(1).fixed(1), &mut sim, &mut rng).expect("build");
        let inst = pool.checkout(&mut sim, &mut rng).expect("checkout");
        let handle = *inst.handle();
        sim.set_active(&handle, true);
        pool.release(inst, &mut sim);

        let obj = sim.object(handle).expect("alive");
        assert!(!obj.active);
        assert_eq!(obj.transform_resets, 1);
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.free_count(), 1);
    }

    #[test]
    fn members_are_tagged_with_this_build() {
        let mut sim = SimFactory::new();
        let mut rng = rng();
        let mut first = Pool::build(def(1).fixed(1), &mut sim, &mut rng).expect("build");
        let second = Pool::build(def(1).fixed(1), &mut sim, &mut rng).expect("build");
        assert_ne!(first.id(), second.id());

        let inst = first.checkout(&mut sim, &mut rng).expect("checkout");
        let tag = inst.tag().expect("tagged");
        assert!(first.owns(tag));
        assert!(!second.owns(tag));
    }

    #[test]
    fn teardown_destroys_idle_members_and_group() {
        let mut sim = SimFactory::new();
        let mut rng = rng();
        let mut pool = Pool::build(def(3).fixed(3), &mut sim, &mut rng).expect("build");
        let held = pool.checkout(&mut sim, &mut rng).expect("checkout");
        assert_eq!(pool.teardown(&mut sim), 2);
        assert!(sim.groups().is_empty());
        assert!(sim.is_alive(*held.handle()));
        assert_eq!(sim.live_count(), 1);
    }

    #[test]
    fn failed_prewarm_destroys_partial_members() {
        let mut sim = SimFactory::failing_after(2);
        let result = Pool::build(def(4).fixed(4), &mut sim, &mut rng());
        assert!(matches!(result, Err(RuntimeError::Instantiation { .. })));
        assert_eq!(sim.live_count(), 0);
        assert_eq!(sim.destroyed(), 2);
        assert!(sim.groups().is_empty());
        assert_eq!(sim.groups_created(), 1);
    }

    #[test]
    fn empty_templates_rejected_before_group_creation() {
        let mut sim = SimFactory::new();
        let empty = PoolDefinition::new(PoolKey::new("Empty").expect("key"), Vec::<String>::new());
        let result = Pool::build(empty, &mut sim, &mut rng());
        assert!(matches!(result, Err(RuntimeError::InvalidDefinition { .. })));
        assert!(sim.groups().is_empty());
    }
}

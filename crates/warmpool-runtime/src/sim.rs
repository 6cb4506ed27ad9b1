//! In-memory engine simulator.
//!
//! [`SimFactory`] stands in for a real engine: it hands out sequential
//! handles and records every scene operation applied to them, so pool
//! behavior can be observed without a renderer attached.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::factory::{FactoryError, InstanceFactory};

// Handles are unique across simulators, so a handle from one never names
// an object of another.
static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

/// Handle to a simulated engine object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimHandle(u64);

impl SimHandle {
    /// Numeric id of the object.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A simulated container group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimGroup(String);

impl SimGroup {
    /// Name of the group.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Recorded state of one simulated object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimObject {
    /// Template the object was instantiated from.
    pub template: String,
    /// Current display name.
    pub name: String,
    /// Whether the object is active in the scene.
    pub active: bool,
    /// Group the object is parented under.
    pub group: Option<String>,
    /// How many times the transform was reset.
    pub transform_resets: u32,
}

/// Engine simulator implementing [`InstanceFactory`].
#[derive(Debug, Default)]
pub struct SimFactory {
    objects: HashMap<SimHandle, SimObject>,
    groups: Vec<String>,
    groups_created: u64,
    created: u64,
    destroyed: u64,
    fail_after: Option<u64>,
}

impl SimFactory {
    /// Creates an empty simulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator whose `create` fails once `successes` objects exist.
    pub fn failing_after(successes: u64) -> Self {
        Self {
            fail_after: Some(successes),
            ..Self::default()
        }
    }

    /// Spawns an object outside any pool, active and unparented.
    pub fn spawn_loose(&mut self, template: &str) -> SimHandle {
        let handle = self.allocate(template);
        if let Some(obj) = self.objects.get_mut(&handle) {
            obj.active = true;
        }
        handle
    }

    /// Recorded state of a live object.
    pub fn object(&self, handle: SimHandle) -> Option<&SimObject> {
        self.objects.get(&handle)
    }

    /// Whether `handle` refers to a live object.
    pub fn is_alive(&self, handle: SimHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    /// Number of live objects.
    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    /// Total successful `create` calls.
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Total `destroy` calls on live objects.
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    /// Names of the live groups, in creation order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Total `create_group` calls.
    pub fn groups_created(&self) -> u64 {
        self.groups_created
    }

    fn allocate(&mut self, template: &str) -> SimHandle {
        let handle = SimHandle(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed));
        self.created += 1;
        self.objects.insert(
            handle,
            SimObject {
                template: template.to_string(),
                name: format!("{template} (clone)"),
                active: true,
                group: None,
                transform_resets: 0,
            },
        );
        handle
    }
}

impl InstanceFactory for SimFactory {
    type Template = String;
    type Handle = SimHandle;
    type Group = SimGroup;

    fn create_group(&mut self, name: &str) -> SimGroup {
        self.groups.push(name.to_string());
        self.groups_created += 1;
        SimGroup(name.to_string())
    }

    fn destroy_group(&mut self, group: SimGroup) {
        if let Some(pos) = self.groups.iter().position(|g| *g == group.0) {
            self.groups.remove(pos);
        }
    }

    fn create(&mut self, template: &String) -> Result<SimHandle, FactoryError> {
        if self.fail_after.is_some_and(|limit| self.created >= limit) {
            return Err(FactoryError::new(format!(
                "simulated failure instantiating '{template}'"
            )));
        }
        Ok(self.allocate(template))
    }

    fn destroy(&mut self, handle: SimHandle) {
        if self.objects.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }

    fn set_active(&mut self, handle: &SimHandle, active: bool) {
        if let Some(obj) = self.objects.get_mut(handle) {
            obj.active = active;
        }
    }

    fn reset_transform(&mut self, handle: &SimHandle) {
        if let Some(obj) = self.objects.get_mut(handle) {
            obj.transform_resets += 1;
        }
    }

    fn reparent(&mut self, handle: &SimHandle, group: &SimGroup) {
        if let Some(obj) = self.objects.get_mut(handle) {
            obj.group = Some(group.0.clone());
        }
    }

    fn rename(&mut self, handle: &SimHandle, name: &str) {
        if let Some(obj) = self.objects.get_mut(handle) {
            obj.name = name.to_string();
        }
    }
}

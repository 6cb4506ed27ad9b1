//! Host engine collaborator.
//!
//! The pool never builds or tears down engine objects itself; it asks an
//! [`InstanceFactory`] to do so and only keeps the opaque handles.

use thiserror::Error;

/// Failure reported by the engine when it cannot create an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("instantiation failed: {reason}")]
pub struct FactoryError {
    /// Engine-provided reason.
    pub reason: String,
}

impl FactoryError {
    /// Creates a new `FactoryError`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Engine primitives a pool needs to manage its members.
///
/// Only `create` may fail. Every other call is assumed infallible, the way
/// engine scene operations on a live object are.
pub trait InstanceFactory {
    /// What new instances are built from (prefab, asset id, ...).
    type Template;
    /// Opaque handle to a live engine object.
    type Handle;
    /// Container grouping the members of one pool.
    type Group;

    /// Creates the container that holds a pool's idle members.
    fn create_group(&mut self, name: &str) -> Self::Group;

    /// Removes a group created by `create_group`. Its members have already
    /// been destroyed or handed out.
    fn destroy_group(&mut self, group: Self::Group);

    /// Instantiates a new object from `template`.
    ///
    /// # Errors
    /// Returns `FactoryError` if the engine cannot create the object.
    fn create(&mut self, template: &Self::Template) -> Result<Self::Handle, FactoryError>;

    /// Permanently destroys an object.
    fn destroy(&mut self, handle: Self::Handle);

    /// Activates or deactivates an object.
    fn set_active(&mut self, handle: &Self::Handle, active: bool);

    /// Moves an object back to the origin with identity rotation.
    fn reset_transform(&mut self, handle: &Self::Handle);

    /// Parents an object under `group`.
    fn reparent(&mut self, handle: &Self::Handle, group: &Self::Group);

    /// Sets the display name of an object.
    fn rename(&mut self, handle: &Self::Handle, name: &str);
}

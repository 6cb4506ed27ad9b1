//! Instances as seen by callers of the registry.

use warmpool_types::{PoolKey, PoolTag};

/// An engine handle together with its pool provenance.
///
/// Returned by checkout and handed back to `give_back`. The tag is stamped
/// once by the owning pool; callers cannot replace it, only drop it with
/// [`detach`](Self::detach).
#[derive(Debug)]
pub struct PooledInstance<H> {
    handle: H,
    name: String,
    tag: Option<PoolTag>,
}

impl<H> PooledInstance<H> {
    pub(crate) fn tagged(handle: H, name: String, tag: PoolTag) -> Self {
        Self {
            handle,
            name,
            tag: Some(tag),
        }
    }

    /// Wraps an engine object that no pool created.
    ///
    /// Giving it back to a registry disposes of it.
    pub fn unmanaged(handle: H, name: impl Into<String>) -> Self {
        Self {
            handle,
            name: name.into(),
            tag: None,
        }
    }

    /// The engine handle.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Mutable access to the engine handle.
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    /// Display name given at creation (`"{key} {n}"` for pool members).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provenance tag, if any.
    pub fn tag(&self) -> Option<&PoolTag> {
        self.tag.as_ref()
    }

    /// Key of the owning pool, if any.
    pub fn owner(&self) -> Option<&PoolKey> {
        self.tag.as_ref().map(PoolTag::owner)
    }

    /// Whether the instance carries a pool tag.
    pub fn is_managed(&self) -> bool {
        self.tag.is_some()
    }

    /// Takes the instance out of pool management, discarding its tag.
    pub fn detach(self) -> H {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmanaged_has_no_owner() {
        let inst = PooledInstance::unmanaged(7u32, "stray");
        assert!(!inst.is_managed());
        assert!(inst.owner().is_none());
        assert_eq!(inst.name(), "stray");
    }

    #[test]
    fn tagged_reports_owner() {
        let key = PoolKey::new("Pool1").expect("key");
        let inst = PooledInstance::tagged(1u32, "Pool1 0".into(), PoolTag::new(key.clone(), 7));
        assert_eq!(inst.owner(), Some(&key));
        assert_eq!(inst.detach(), 1);
    }
}

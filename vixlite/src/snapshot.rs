//! Snapshot facade.
//!
//! Snapshots form a tree that is navigated on demand: children and parents
//! are fetched with fresh foreign calls and every fetch produces a new
//! handle-owning object. Nothing is cached.

use crate::error::{Result, check};
use crate::ffi::{Api, RawHandle, consts};
use crate::handle::OwnedHandle;
use crate::property::{PropertyValue, expect_string, get_property};

/// One snapshot of a VM.
pub struct Snapshot {
    api: Api,
    handle: OwnedHandle,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot").field("handle", &self.handle).finish()
    }
}

impl Snapshot {
    pub(crate) fn new(api: Api, handle: OwnedHandle) -> Self {
        Self { api, handle }
    }

    pub(crate) fn raw_handle(&self) -> RawHandle {
        self.handle.raw()
    }

    pub fn num_children(&self) -> Result<i32> {
        let (err, count) = self.api.snapshot_num_children(self.raw_handle());
        check(self.api.as_ref(), err)?;
        Ok(count)
    }

    pub fn child(&self, index: i32) -> Result<Snapshot> {
        let (err, child) = self.api.snapshot_child(self.raw_handle(), index);
        check(self.api.as_ref(), err)?;
        Ok(self.wrap(child))
    }

    pub fn parent(&self) -> Result<Snapshot> {
        let (err, parent) = self.api.snapshot_parent(self.raw_handle());
        check(self.api.as_ref(), err)?;
        Ok(self.wrap(parent))
    }

    pub fn display_name(&self) -> Result<String> {
        let property = consts::VIX_PROPERTY_SNAPSHOT_DISPLAYNAME;
        expect_string(self.property(property)?, property)
    }

    pub fn description(&self) -> Result<String> {
        let property = consts::VIX_PROPERTY_SNAPSHOT_DESCRIPTION;
        expect_string(self.property(property)?, property)
    }

    /// Fetch an arbitrary property of this snapshot by numeric ID.
    pub fn property(&self, property: i32) -> Result<PropertyValue> {
        get_property(self.api.as_ref(), self.raw_handle(), property)
    }

    fn wrap(&self, snapshot: RawHandle) -> Snapshot {
        Snapshot::new(
            self.api.clone(),
            OwnedHandle::new(self.api.clone(), snapshot),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::ffi::fake::FakeVix;
    use crate::handle::OwnedHandle;
    use crate::vm::Vm;
    use std::sync::Arc;

    fn vm(fake: &Arc<FakeVix>) -> Vm {
        let handle = fake.alloc_handle();
        Vm::new(fake.clone(), OwnedHandle::new(fake.clone(), handle))
    }

    #[test]
    fn missing_named_snapshot_raises_and_builds_no_object() {
        let fake = Arc::new(FakeVix::new());
        let vm = vm(&fake);

        let before = fake.handles_allocated();
        let err = vm.named_snapshot("no-such-snapshot").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::SnapshotNotFound));
        assert_eq!(fake.handles_allocated(), before);
    }

    #[test]
    fn named_snapshot_wraps_a_new_owning_object() {
        let fake = Arc::new(FakeVix::new());
        let vm = vm(&fake);
        fake.add_named_snapshot(vm.raw_handle(), "clean");

        let snapshot = vm.named_snapshot("clean").unwrap();
        let raw = snapshot.raw_handle();
        drop(snapshot);
        assert_eq!(fake.release_count(raw), 1);
    }

    #[test]
    fn tree_navigation_allocates_fresh_handles_per_fetch() {
        let fake = Arc::new(FakeVix::new());
        let vm = vm(&fake);
        let root = fake.add_root_snapshot(vm.raw_handle());
        let child_a = fake.add_child_snapshot(root);
        let _child_b = fake.add_child_snapshot(root);

        assert_eq!(vm.num_root_snapshots().unwrap(), 1);
        let root_snap = vm.root_snapshot(0).unwrap();
        assert_eq!(root_snap.num_children().unwrap(), 2);

        let first = root_snap.child(0).unwrap();
        assert_eq!(first.raw_handle(), child_a);
        let parent = first.parent().unwrap();
        assert_eq!(parent.raw_handle(), root);

        // Each navigation fetch owns its handle independently.
        drop(first);
        assert_eq!(fake.release_count(child_a), 1);
        drop(parent);
        assert_eq!(fake.release_count(root), 1);
        drop(root_snap);
        assert_eq!(fake.release_count(root), 2);
    }

    #[test]
    fn out_of_range_child_index_propagates_the_code() {
        let fake = Arc::new(FakeVix::new());
        let vm = vm(&fake);
        let root = fake.add_root_snapshot(vm.raw_handle());
        let snapshot = vm.root_snapshot(0).unwrap();
        let _ = root;

        let err = snapshot.child(5).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidArg));
    }

    #[test]
    fn display_name_reads_the_snapshot_property() {
        let fake = Arc::new(FakeVix::new());
        let vm = vm(&fake);
        let root = fake.add_root_snapshot(vm.raw_handle());
        fake.set_property(
            root,
            consts::VIX_PROPERTY_SNAPSHOT_DISPLAYNAME,
            PropertyValue::Str("clean".into()),
        );

        let snapshot = vm.root_snapshot(0).unwrap();
        assert_eq!(snapshot.display_name().unwrap(), "clean");
    }
}

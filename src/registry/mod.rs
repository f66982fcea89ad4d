//! Dynamic Resource Registry
//!
//! Owns the slot index space for content this crate adds to the host.
//! Registration allocates the lowest free slot, makes the backing assets
//! resident, resolves category references against the handling store, and
//! publishes the descriptor to the host resource table. Every slot the
//! registry publishes carries an ownership marker so shutdown can reclaim
//! exactly what this crate added and nothing the host built in.
//!
//! The registry is built single-threaded during startup and is effectively
//! read-only afterwards; runtime re-registration would have to synchronize
//! with the audio worker's lock.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{ContentDescriptor, DescriptorAttrs};
use crate::host::{AssetLoader, HandlingStore, ResourceTable, SlotIndex};

mod groups;

pub use groups::{build_group, Group};

/// Slot capacity of the host resource table.
pub const DEFAULT_SLOT_CAPACITY: usize = 4000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Every index in the slot space is in use. The affected registration is
    /// skipped; startup continues.
    #[error("slot space exhausted ({capacity} slots)")]
    SlotSpaceExhausted { capacity: usize },
}

/// One registered slot. Presence in the registry's table is the ownership
/// marker: only slots recorded here are ever unregistered.
#[derive(Debug, Clone)]
struct RegistrySlot {
    descriptor: ContentDescriptor,
    asset_loaded: bool,
}

pub struct ResourceRegistry {
    capacity: usize,
    slots: HashMap<SlotIndex, RegistrySlot>,
    by_name: HashMap<String, SlotIndex>,
    resources: Arc<dyn ResourceTable>,
    assets: Arc<dyn AssetLoader>,
    handling: Arc<dyn HandlingStore>,
}

impl ResourceRegistry {
    pub fn new(
        capacity: usize,
        resources: Arc<dyn ResourceTable>,
        assets: Arc<dyn AssetLoader>,
        handling: Arc<dyn HandlingStore>,
    ) -> Self {
        ResourceRegistry {
            capacity,
            slots: HashMap::new(),
            by_name: HashMap::new(),
            resources,
            assets,
            handling,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots this registry owns.
    pub fn owned_count(&self) -> usize {
        self.slots.len()
    }

    /// Find the lowest index unused by the host table. The index space is
    /// host-owned; allocation scans from zero and is single-threaded at
    /// startup by design.
    pub fn allocate_slot(&self) -> Option<SlotIndex> {
        (0..self.capacity).find(|&i| self.resources.find_descriptor(i).is_none())
    }

    /// Make the assets for `name` resident. Idempotent: succeeds immediately
    /// if the host already resolves the name. Loader failure is tolerated so
    /// the simulation can proceed with missing visuals/audio.
    pub fn ensure_asset_loaded(&self, name: &str) -> bool {
        if self.resources.find_index_by_name(name).is_some() {
            return true;
        }
        self.assets.load_asset(name)
    }

    /// Register a descriptor, returning its slot index.
    ///
    /// A second call with an already-registered name is a no-op returning
    /// the existing index (first-writer-wins). Names the host already knows
    /// resolve to the host's index without taking ownership.
    pub fn register(&mut self, descriptor: ContentDescriptor) -> Result<SlotIndex, RegistryError> {
        let key = descriptor.name.to_ascii_lowercase();
        if let Some(&index) = self.by_name.get(&key) {
            return Ok(index);
        }
        if let Some(index) = self.resources.find_index_by_name(&descriptor.name) {
            log::debug!("'{}' already present in host table at {}", descriptor.name, index);
            return Ok(index);
        }

        let index = self
            .allocate_slot()
            .ok_or(RegistryError::SlotSpaceExhausted {
                capacity: self.capacity,
            })?;

        let asset_loaded = self.ensure_asset_loaded(&descriptor.name);
        if !asset_loaded {
            log::warn!(
                "assets for '{}' failed to load; registering without them",
                descriptor.name
            );
        }

        if let DescriptorAttrs::Vehicle { handling, .. } = &descriptor.attrs {
            if !handling.is_empty() && self.handling.find(handling).is_none() {
                let id = self.handling.add(handling);
                log::info!("created handling entry '{}' as {}", handling, id);
            }
        }

        self.resources.add_descriptor(index, &descriptor);
        self.slots.insert(
            index,
            RegistrySlot {
                descriptor,
                asset_loaded,
            },
        );
        self.by_name.insert(key, index);

        Ok(index)
    }

    /// Case-insensitive name search over currently registered slots.
    pub fn lookup(&self, name: &str) -> Option<SlotIndex> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn descriptor(&self, index: SlotIndex) -> Option<&ContentDescriptor> {
        self.slots.get(&index).map(|s| &s.descriptor)
    }

    pub fn asset_loaded(&self, index: SlotIndex) -> bool {
        self.slots.get(&index).is_some_and(|s| s.asset_loaded)
    }

    /// Remove every owned slot whose descriptor matches `predicate`. Freed
    /// indices become eligible for reuse. Host built-ins are never touched.
    pub fn unregister_matching<F>(&mut self, predicate: F)
    where
        F: Fn(&ContentDescriptor) -> bool,
    {
        let doomed: Vec<SlotIndex> = self
            .slots
            .iter()
            .filter(|(_, slot)| predicate(&slot.descriptor))
            .map(|(&i, _)| i)
            .collect();

        for index in doomed {
            if let Some(slot) = self.slots.remove(&index) {
                self.by_name.remove(&slot.descriptor.name.to_ascii_lowercase());
                self.resources.remove_descriptor(index);
                log::debug!("unregistered '{}' from slot {}", slot.descriptor.name, index);
            }
        }
    }

    pub(crate) fn resources(&self) -> &Arc<dyn ResourceTable> {
        &self.resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{parse_records, ContentKind};
    use crate::host::mock::RecordingHost;

    fn vehicle(name: &str, handling: &str) -> ContentDescriptor {
        ContentDescriptor {
            name: name.to_string(),
            attrs: DescriptorAttrs::Vehicle {
                handling: handling.to_string(),
                spawn_group: String::new(),
            },
            flags: 0,
        }
    }

    fn registry(capacity: usize, host: &std::sync::Arc<RecordingHost>) -> ResourceRegistry {
        ResourceRegistry::new(capacity, host.clone(), host.clone(), host.clone())
    }

    #[test]
    fn test_register_allocates_lowest_free_index() {
        let host = RecordingHost::new();
        let mut reg = registry(8, &host);

        let a = reg.register(vehicle("alpha", "")).unwrap();
        let b = reg.register(vehicle("beta", "")).unwrap();

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert!(host.table.lock().contains_key(&0));
        assert!(host.table.lock().contains_key(&1));
    }

    #[test]
    fn test_register_same_name_is_noop_first_writer_wins() {
        let host = RecordingHost::new();
        let mut reg = registry(8, &host);

        let first = reg.register(vehicle("alpha", "H_ONE")).unwrap();
        let second = reg.register(vehicle("ALPHA", "H_TWO")).unwrap();

        assert_eq!(first, second);
        let kept = reg.descriptor(first).unwrap();
        assert_eq!(
            kept.attrs,
            DescriptorAttrs::Vehicle {
                handling: "H_ONE".to_string(),
                spawn_group: String::new(),
            }
        );
        // The host table still holds the first descriptor too.
        assert_eq!(host.table.lock().get(&first).unwrap().name, "alpha");
    }

    #[test]
    fn test_exhausted_slot_space_reports_without_corruption() {
        let host = RecordingHost::new();
        let mut reg = registry(2, &host);

        let a = reg.register(vehicle("one", "")).unwrap();
        let b = reg.register(vehicle("two", "")).unwrap();
        let c = reg.register(vehicle("three", ""));

        assert_eq!(
            c,
            Err(RegistryError::SlotSpaceExhausted { capacity: 2 })
        );
        assert_eq!(reg.descriptor(a).unwrap().name, "one");
        assert_eq!(reg.descriptor(b).unwrap().name, "two");
        assert_eq!(host.table.lock().len(), 2);
    }

    #[test]
    fn test_freed_slots_become_reusable() {
        let host = RecordingHost::new();
        let mut reg = registry(2, &host);

        reg.register(vehicle("one", "")).unwrap();
        reg.register(vehicle("two", "")).unwrap();

        reg.unregister_matching(|d| d.name == "one");
        assert_eq!(reg.owned_count(), 1);

        let again = reg.register(vehicle("replacement", "")).unwrap();
        assert_eq!(again, 0);
    }

    #[test]
    fn test_allocate_skips_host_occupied_indices() {
        let host = RecordingHost::new();
        // Host built-in occupies slot 0 before we start.
        host.add_descriptor(0, &vehicle("builtin", ""));
        let mut reg = registry(4, &host);

        let idx = reg.register(vehicle("mine", "")).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_register_known_host_name_does_not_take_ownership() {
        let host = RecordingHost::new();
        host.add_descriptor(3, &vehicle("builtin", ""));
        let mut reg = registry(8, &host);

        let idx = reg.register(vehicle("builtin", "")).unwrap();

        assert_eq!(idx, 3);
        assert_eq!(reg.owned_count(), 0);
        reg.unregister_matching(|_| true);
        assert!(host.table.lock().contains_key(&3));
    }

    #[test]
    fn test_asset_load_failure_still_registers() {
        let host = RecordingHost::new();
        host.fail_asset("ghost");
        let mut reg = registry(8, &host);

        let idx = reg.register(vehicle("ghost", "")).unwrap();

        assert!(!reg.asset_loaded(idx));
        assert!(host.table.lock().contains_key(&idx));
    }

    #[test]
    fn test_missing_handling_reference_is_auto_created() {
        let host = RecordingHost::new();
        let mut reg = registry(8, &host);

        reg.register(vehicle("alpha", "HANDLING_NEW")).unwrap();

        assert!(host.handling.lock().contains_key("HANDLING_NEW"));
        assert_eq!(host.handling_added.lock().as_slice(), ["HANDLING_NEW"]);

        // A second vehicle with the same reference reuses the entry.
        reg.register(vehicle("beta", "HANDLING_NEW")).unwrap();
        assert_eq!(host.handling_added.lock().len(), 1);
    }

    #[test]
    fn test_unregister_matching_only_removes_matching() {
        let host = RecordingHost::new();
        let mut reg = registry(8, &host);

        let records = parse_records("keep, H, g\ndrop, H, g", ContentKind::Vehicle);
        for d in records {
            reg.register(d).unwrap();
        }

        reg.unregister_matching(|d| d.name == "drop");

        assert!(reg.lookup("keep").is_some());
        assert!(reg.lookup("drop").is_none());
        assert_eq!(host.removed.lock().len(), 1);
    }

    #[test]
    fn test_ensure_asset_loaded_idempotent_for_known_names() {
        let host = RecordingHost::new();
        host.add_descriptor(0, &vehicle("builtin", ""));
        let reg = registry(8, &host);

        assert!(reg.ensure_asset_loaded("builtin"));
        // No loader call was made for a name the host already resolves.
        assert!(host.assets_loaded.lock().is_empty());
    }
}

// Recording host used by the unit tests
// One struct implements every collaborator trait so a single Arc can be
// handed out for each interface.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{
    AssetLoader, AudioOutput, EntityId, EntitySample, EntityStateSource, HandlingId,
    HandlingStore, HostInterfaces, ResourceTable, SampleHandle, SlotIndex,
};
use crate::catalog::{ContentDescriptor, ContentKind};

#[derive(Default)]
pub struct RecordingHost {
    pub table: Mutex<HashMap<SlotIndex, ContentDescriptor>>,
    pub groups: Mutex<HashMap<(ContentKind, String), Vec<SlotIndex>>>,
    pub removed: Mutex<Vec<SlotIndex>>,

    pub assets_loaded: Mutex<Vec<String>>,
    pub failing_assets: Mutex<HashSet<String>>,

    pub handling: Mutex<HashMap<String, HandlingId>>,
    pub handling_added: Mutex<Vec<String>>,

    pub samples: Mutex<HashMap<String, SampleHandle>>,
    pub sample_loads: Mutex<Vec<String>>,
    pub sample_plays: Mutex<Vec<SampleHandle>>,
    pub missing_samples: Mutex<HashSet<String>>,
    next_sample: Mutex<SampleHandle>,

    pub live: Mutex<Vec<EntityId>>,
    pub entity_state: Mutex<HashMap<EntityId, EntitySample>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn interfaces(self: &Arc<Self>) -> HostInterfaces {
        HostInterfaces {
            resources: self.clone(),
            assets: self.clone(),
            handling: self.clone(),
            audio: self.clone(),
            entities: self.clone(),
        }
    }

    pub fn set_entity(&self, id: EntityId, sample: EntitySample) {
        let mut live = self.live.lock();
        if !live.contains(&id) {
            live.push(id);
        }
        self.entity_state.lock().insert(id, sample);
    }

    pub fn fail_asset(&self, name: &str) {
        self.failing_assets.lock().insert(name.to_string());
    }

    pub fn fail_sample(&self, path: &str) {
        self.missing_samples.lock().insert(path.to_string());
    }

    pub fn group(&self, kind: ContentKind, name: &str) -> Option<Vec<SlotIndex>> {
        self.groups.lock().get(&(kind, name.to_string())).cloned()
    }
}

impl ResourceTable for RecordingHost {
    fn add_descriptor(&self, index: SlotIndex, descriptor: &ContentDescriptor) {
        self.table.lock().insert(index, descriptor.clone());
    }

    fn remove_descriptor(&self, index: SlotIndex) {
        self.table.lock().remove(&index);
        self.removed.lock().push(index);
    }

    fn find_index_by_name(&self, name: &str) -> Option<SlotIndex> {
        self.table
            .lock()
            .iter()
            .find(|(_, d)| d.name.eq_ignore_ascii_case(name))
            .map(|(&i, _)| i)
    }

    fn find_descriptor(&self, index: SlotIndex) -> Option<ContentDescriptor> {
        self.table.lock().get(&index).cloned()
    }

    fn install_group(&self, kind: ContentKind, name: &str, members: &[SlotIndex]) {
        self.groups
            .lock()
            .insert((kind, name.to_string()), members.to_vec());
    }
}

impl AssetLoader for RecordingHost {
    fn load_asset(&self, name: &str) -> bool {
        self.assets_loaded.lock().push(name.to_string());
        !self.failing_assets.lock().contains(name)
    }
}

impl HandlingStore for RecordingHost {
    fn find(&self, reference: &str) -> Option<HandlingId> {
        self.handling.lock().get(reference).copied()
    }

    fn add(&self, reference: &str) -> HandlingId {
        let mut handling = self.handling.lock();
        let id = handling.len() as HandlingId;
        handling.insert(reference.to_string(), id);
        self.handling_added.lock().push(reference.to_string());
        id
    }
}

impl AudioOutput for RecordingHost {
    fn load_sample(&self, path: &str) -> Option<SampleHandle> {
        self.sample_loads.lock().push(path.to_string());
        if self.missing_samples.lock().contains(path) {
            return None;
        }
        let mut samples = self.samples.lock();
        if let Some(&handle) = samples.get(path) {
            return Some(handle);
        }
        let mut next = self.next_sample.lock();
        *next += 1;
        let handle = *next;
        samples.insert(path.to_string(), handle);
        Some(handle)
    }

    fn play_sample(&self, handle: SampleHandle) {
        self.sample_plays.lock().push(handle);
    }
}

impl EntityStateSource for RecordingHost {
    fn active_entities(&self) -> Vec<EntityId> {
        self.live.lock().clone()
    }

    fn sample(&self, id: EntityId) -> Option<EntitySample> {
        self.entity_state.lock().get(&id).cloned()
    }
}

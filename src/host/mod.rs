//! Host collaborator interfaces
//!
//! Everything the crate needs from the embedding simulation is consumed
//! through the traits in this module: asset streaming, the host resource
//! table, the handling store, audio output, and live entity state. The
//! traits are object-safe and `Send + Sync` because the entity audio
//! worker calls into the host from its own thread.
//!
//! Entity identity is an opaque handle with a generation counter. A host
//! that recycles entity indices must bump the generation so per-entity
//! audio state can never leak onto an unrelated, newly spawned entity.

use std::sync::Arc;

use crate::catalog::{ContentDescriptor, ContentKind};

#[cfg(test)]
pub(crate) mod mock;

/// Bounded-range integer identifier the host uses to address a registered
/// resource.
pub type SlotIndex = usize;

/// Identifier into the host's handling table.
pub type HandlingId = u32;

/// Handle to a loaded audio sample.
pub type SampleHandle = u32;

/// Opaque, host-issued stable entity handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

impl EntityId {
    pub fn new(index: u32, generation: u32) -> Self {
        EntityId { index, generation }
    }
}

/// Raw per-entity state sampled from the host once per tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitySample {
    /// Model name, used to resolve the entity's sound bank.
    pub model: String,
    pub engine_on: bool,
    pub brake_pedal: f32,
    pub gas_pedal: f32,
    pub doors_open: bool,
}

/// Makes the renderable/audible assets for a content name resident.
/// Idempotent; failure is non-fatal.
pub trait AssetLoader: Send + Sync {
    fn load_asset(&self, name: &str) -> bool;
}

/// The host's resource table, including its grouping facility.
pub trait ResourceTable: Send + Sync {
    fn add_descriptor(&self, index: SlotIndex, descriptor: &ContentDescriptor);
    fn remove_descriptor(&self, index: SlotIndex);
    fn find_index_by_name(&self, name: &str) -> Option<SlotIndex>;
    fn find_descriptor(&self, index: SlotIndex) -> Option<ContentDescriptor>;
    /// Install a named group of slot indices. Reinstalling a name replaces
    /// the previous mapping (last-writer-wins).
    fn install_group(&self, kind: ContentKind, name: &str, members: &[SlotIndex]);
}

/// Secondary registry for named handling references.
pub trait HandlingStore: Send + Sync {
    fn find(&self, reference: &str) -> Option<HandlingId>;
    /// Create a new entry for `reference` and return its id.
    fn add(&self, reference: &str) -> HandlingId;
}

/// The host's audio output. Both calls are fire-and-forget and must be safe
/// to invoke from the worker thread.
pub trait AudioOutput: Send + Sync {
    fn load_sample(&self, path: &str) -> Option<SampleHandle>;
    fn play_sample(&self, handle: SampleHandle);
}

/// Live entity state, polled by the worker. The host guarantees these are
/// safe to call without additional synchronization.
pub trait EntityStateSource: Send + Sync {
    fn active_entities(&self) -> Vec<EntityId>;
    fn sample(&self, id: EntityId) -> Option<EntitySample>;
}

/// Bundle of every host interface the plugin consumes.
#[derive(Clone)]
pub struct HostInterfaces {
    pub resources: Arc<dyn ResourceTable>,
    pub assets: Arc<dyn AssetLoader>,
    pub handling: Arc<dyn HandlingStore>,
    pub audio: Arc<dyn AudioOutput>,
    pub entities: Arc<dyn EntityStateSource>,
}

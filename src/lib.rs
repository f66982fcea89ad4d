// Dynamic Override library
// Externally-described simulation content with live audio synchronization

pub mod catalog;
pub mod config;
pub mod host;
pub mod plugin;
pub mod registry;
pub mod sound;

pub use catalog::{Catalog, ContentDescriptor, ContentKind, DescriptorAttrs};
pub use config::{ConfigError, ConfigStore};
pub use host::{EntityId, EntitySample, HostInterfaces, SampleHandle, SlotIndex};
pub use plugin::OverridePlugin;
pub use registry::{Group, RegistryError, ResourceRegistry};
pub use sound::{BankSet, DoorMotion, EntityAudioEngine, SoundBank};

// Plugin lifecycle
// initialize(): Catalog -> Registry -> Groups -> Banks -> worker start,
// synchronously on the host's init call. shutdown(): stop the worker, then
// unregister exactly the descriptors this crate added.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::catalog::{parse_records, Catalog, ContentKind};
use crate::config::{
    self, defaults, ConfigStore, ACTORS_FILE, ACTOR_GROUPS_FILE, SOUNDS_FILE,
    VEHICLES_FILE, VEHICLE_GROUPS_FILE,
};
use crate::host::HostInterfaces;
use crate::registry::{build_group, ResourceRegistry, DEFAULT_SLOT_CAPACITY};
use crate::sound::{BankSet, EntityAudioEngine};

pub struct OverridePlugin {
    catalog: Catalog,
    registry: ResourceRegistry,
    banks: Arc<BankSet>,
    engine: EntityAudioEngine,
}

impl OverridePlugin {
    /// Build all content from the config directory and start the audio
    /// worker. Everything before the worker start runs single-threaded on
    /// the caller's thread.
    ///
    /// Individual bad records, unresolvable references, exhausted slots and
    /// failed asset loads degrade to partial content; only an unreadable or
    /// unwritable config location is fatal.
    pub fn initialize<P: AsRef<Path>>(host: HostInterfaces, config_dir: P) -> anyhow::Result<Self> {
        Self::initialize_with_capacity(host, config_dir, DEFAULT_SLOT_CAPACITY)
    }

    pub fn initialize_with_capacity<P: AsRef<Path>>(
        host: HostInterfaces,
        config_dir: P,
        slot_capacity: usize,
    ) -> anyhow::Result<Self> {
        let store = ConfigStore::new(config_dir);

        let vehicles_src = store
            .read_or_default(VEHICLES_FILE, defaults::VEHICLES)
            .context("reading vehicle definitions")?;
        let actors_src = store
            .read_or_default(ACTORS_FILE, defaults::ACTORS)
            .context("reading actor definitions")?;
        let vehicle_groups_src = store
            .read_or_default(VEHICLE_GROUPS_FILE, defaults::VEHICLE_GROUPS)
            .context("reading vehicle groups")?;
        let actor_groups_src = store
            .read_or_default(ACTOR_GROUPS_FILE, defaults::ACTOR_GROUPS)
            .context("reading actor groups")?;
        let sounds_src = store
            .read_or_default(SOUNDS_FILE, defaults::SOUNDS)
            .context("reading sound bank mapping")?;

        let mut records = parse_records(&vehicles_src, ContentKind::Vehicle);
        records.extend(parse_records(&actors_src, ContentKind::Actor));
        let catalog = Catalog::new(records);
        log::info!("catalog holds {} descriptors", catalog.len());

        let mut registry = ResourceRegistry::new(
            slot_capacity,
            host.resources.clone(),
            host.assets.clone(),
            host.handling.clone(),
        );
        for descriptor in catalog.iter() {
            if let Err(e) = registry.register(descriptor.clone()) {
                log::warn!("skipping '{}': {}", descriptor.name, e);
            }
        }

        for (name, members) in config::parse_listing(&vehicle_groups_src) {
            build_group(&mut registry, &catalog, ContentKind::Vehicle, &name, &members);
        }
        for (name, members) in config::parse_listing(&actor_groups_src) {
            build_group(&mut registry, &catalog, ContentKind::Actor, &name, &members);
        }

        let banks = Arc::new(BankSet::load(&config::parse_keyed_paths(&sounds_src)));

        let engine = EntityAudioEngine::start(
            Arc::clone(&banks),
            host.audio.clone(),
            host.entities.clone(),
        )
        .context("starting entity audio worker")?;

        Ok(OverridePlugin {
            catalog,
            registry,
            banks,
            engine,
        })
    }

    /// Stop the audio worker and reclaim every slot this plugin registered.
    /// Host built-ins are untouched: cleanup matches the registry's
    /// ownership marker, never descriptor names.
    pub fn shutdown(&mut self) {
        self.engine.stop();
        self.registry.unregister_matching(|_| true);
        log::info!("plugin shut down");
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn banks(&self) -> &BankSet {
        &self.banks
    }

    pub fn engine(&self) -> &EntityAudioEngine {
        &self.engine
    }
}

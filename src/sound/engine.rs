//! Entity Audio Engine
//!
//! A single dedicated worker thread polls live entity state on a fixed
//! 50 ms tick. Per entity it advances smoothed door state and diffs four
//! boolean channels (engine, brake, accelerate, doors) against the previous
//! tick, firing the matching sound event exactly once per transition.
//!
//! # Concurrency
//!
//! The tracked-entity table sits behind one coarse `parking_lot::Mutex`
//! that the worker takes once per tick and holds for the whole iteration;
//! tick work is O(entities × doors) and bounded, so the coarse lock is the
//! simple and sufficient choice. Door-motion and despawn commands arrive
//! over a crossbeam channel and are applied under the same lock at tick
//! start. The bank set is read-only and shared via `Arc`; the sample cache
//! is worker-owned and needs no lock. Shutdown is a single atomic flag
//! polled once per tick: stop is fire-and-forget and the worker may
//! overshoot by up to one tick.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use super::bank::BankSet;
use super::cache::SampleCache;
use crate::host::{AudioOutput, EntityId, EntitySample, EntityStateSource};

/// Fixed tick period of the worker.
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// Door progress increment per tick.
pub const DOOR_STEP: f32 = 0.1;

/// Pedal pressure above which brake/accelerate read as engaged.
pub const PEDAL_THRESHOLD: f32 = 0.1;

/// Doors tracked per entity.
pub const DOOR_COUNT: usize = 2;

/// Direction a door is moving in, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorMotion {
    #[default]
    Idle,
    Opening,
    Closing,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct DoorState {
    progress: f32,
    motion: DoorMotion,
}

impl DoorState {
    fn advance(&mut self) {
        match self.motion {
            DoorMotion::Opening => self.progress = (self.progress + DOOR_STEP).min(1.0),
            DoorMotion::Closing => self.progress = (self.progress - DOOR_STEP).max(0.0),
            DoorMotion::Idle => {}
        }
    }
}

/// The four edge-triggered audio channels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct AudioChannels {
    engine_on: bool,
    braking: bool,
    accelerating: bool,
    doors_open: bool,
}

impl AudioChannels {
    fn from_sample(sample: &EntitySample) -> Self {
        AudioChannels {
            engine_on: sample.engine_on,
            braking: sample.brake_pedal > PEDAL_THRESHOLD,
            accelerating: sample.gas_pedal > PEDAL_THRESHOLD,
            doors_open: sample.doors_open,
        }
    }
}

#[derive(Debug)]
struct EntityTrack {
    channels: AudioChannels,
    doors: Vec<DoorState>,
}

impl EntityTrack {
    fn new() -> Self {
        EntityTrack {
            channels: AudioChannels::default(),
            doors: vec![DoorState::default(); DOOR_COUNT],
        }
    }
}

#[derive(Default)]
struct EntityTable {
    entities: HashMap<EntityId, EntityTrack>,
}

/// Commands applied by the worker under the shared lock at tick start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineCommand {
    SetDoor {
        entity: EntityId,
        door: usize,
        motion: DoorMotion,
    },
    SetAllDoors {
        entity: EntityId,
        motion: DoorMotion,
    },
    /// Host reported entity destruction: erase its state.
    Despawn(EntityId),
}

struct Worker {
    table: Arc<Mutex<EntityTable>>,
    commands: Receiver<EngineCommand>,
    banks: Arc<BankSet>,
    cache: SampleCache,
    audio: Arc<dyn AudioOutput>,
    source: Arc<dyn EntityStateSource>,
}

impl Worker {
    /// One tick: apply pending commands, then update every live entity.
    /// The lock is held for the entire iteration.
    fn tick(&mut self) {
        let table = Arc::clone(&self.table);
        let mut table = table.lock();

        while let Ok(cmd) = self.commands.try_recv() {
            Self::apply(&mut table, cmd);
        }

        for id in self.source.active_entities() {
            let track = table.entities.entry(id).or_insert_with(EntityTrack::new);

            for door in &mut track.doors {
                door.advance();
            }

            let Some(sample) = self.source.sample(id) else {
                continue;
            };

            let current = AudioChannels::from_sample(&sample);
            let previous = std::mem::replace(&mut track.channels, current.clone());

            if current.engine_on != previous.engine_on {
                self.play(
                    &sample.model,
                    if current.engine_on { "engine_start" } else { "engine_stop" },
                );
            }
            if current.braking != previous.braking {
                self.play(
                    &sample.model,
                    if current.braking { "brake_start" } else { "brake_release" },
                );
            }
            if current.accelerating != previous.accelerating {
                self.play(
                    &sample.model,
                    if current.accelerating { "accelerate" } else { "engine_idle" },
                );
            }
            if current.doors_open != previous.doors_open {
                self.play(
                    &sample.model,
                    if current.doors_open { "door_open" } else { "door_close" },
                );
            }
        }
    }

    fn apply(table: &mut EntityTable, cmd: EngineCommand) {
        match cmd {
            EngineCommand::SetDoor { entity, door, motion } => {
                let track = table.entities.entry(entity).or_insert_with(EntityTrack::new);
                if let Some(door) = track.doors.get_mut(door) {
                    door.motion = motion;
                }
            }
            EngineCommand::SetAllDoors { entity, motion } => {
                let track = table.entities.entry(entity).or_insert_with(EntityTrack::new);
                for door in &mut track.doors {
                    door.motion = motion;
                }
            }
            EngineCommand::Despawn(entity) => {
                table.entities.remove(&entity);
            }
        }
    }

    /// Resolve the entity's bank and fire a non-blocking play request.
    /// Unknown bank or event is a silent no-op.
    fn play(&mut self, model: &str, event: &str) {
        let Some(bank) = self.banks.resolve(model) else {
            return;
        };
        let Some(path) = bank.sound_path(event) else {
            return;
        };
        if let Some(handle) = self.cache.get_or_load(event, path, &*self.audio) {
            self.audio.play_sample(handle);
        }
    }
}

/// Handle to the running engine. Commands may be sent from any thread; the
/// worker applies them at the start of its next tick.
pub struct EntityAudioEngine {
    table: Arc<Mutex<EntityTable>>,
    running: Arc<AtomicBool>,
    commands: Sender<EngineCommand>,
    worker: Option<JoinHandle<()>>,
}

impl EntityAudioEngine {
    /// Spawn the worker thread and start ticking.
    pub fn start(
        banks: Arc<BankSet>,
        audio: Arc<dyn AudioOutput>,
        source: Arc<dyn EntityStateSource>,
    ) -> std::io::Result<Self> {
        let table = Arc::new(Mutex::new(EntityTable::default()));
        let running = Arc::new(AtomicBool::new(true));
        let (tx, rx) = unbounded();

        let mut worker = Worker {
            table: Arc::clone(&table),
            commands: rx,
            banks,
            cache: SampleCache::new(),
            audio,
            source,
        };
        let flag = Arc::clone(&running);
        let handle = thread::Builder::new()
            .name("entity-audio".to_string())
            .spawn(move || {
                log::info!("entity audio worker started");
                while flag.load(Ordering::Relaxed) {
                    thread::sleep(TICK_PERIOD);
                    worker.tick();
                }
                log::info!("entity audio worker stopped");
            })?;

        Ok(EntityAudioEngine {
            table,
            running,
            commands: tx,
            worker: Some(handle),
        })
    }

    /// Request the worker to stop. Fire-and-forget: the worker exits after
    /// finishing its current tick and is not joined.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        drop(self.worker.take());
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn open_doors(&self, entity: EntityId) {
        self.send(EngineCommand::SetAllDoors {
            entity,
            motion: DoorMotion::Opening,
        });
    }

    pub fn close_doors(&self, entity: EntityId) {
        self.send(EngineCommand::SetAllDoors {
            entity,
            motion: DoorMotion::Closing,
        });
    }

    pub fn set_door(&self, entity: EntityId, door: usize, motion: DoorMotion) {
        self.send(EngineCommand::SetDoor { entity, door, motion });
    }

    /// Erase all per-entity state for a destroyed entity.
    pub fn despawn(&self, entity: EntityId) {
        self.send(EngineCommand::Despawn(entity));
    }

    fn send(&self, cmd: EngineCommand) {
        if self.commands.send(cmd).is_err() {
            log::warn!("entity audio worker is gone; command dropped");
        }
    }

    /// Current door progress values for a tracked entity.
    pub fn door_progress(&self, entity: EntityId) -> Option<Vec<f32>> {
        self.table
            .lock()
            .entities
            .get(&entity)
            .map(|t| t.doors.iter().map(|d| d.progress).collect())
    }

    pub fn tracked_count(&self) -> usize {
        self.table.lock().entities.len()
    }
}

impl Drop for EntityAudioEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

//! Entity sound banks and the concurrent audio engine
//!
//! - `bank` maps entity model names to sound banks (event name → asset path)
//! - `cache` loads each distinct sound event at most once per process
//! - `engine` runs the per-entity edge-triggered state machine on a
//!   dedicated 50 ms worker thread

pub mod bank;
pub mod cache;
pub mod engine;

pub use bank::{BankSet, SoundBank};
pub use cache::SampleCache;
pub use engine::{DoorMotion, EntityAudioEngine, DOOR_STEP, PEDAL_THRESHOLD, TICK_PERIOD};

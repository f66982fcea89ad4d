// Sample cache
// Each distinct sound event is loaded through the host audio output at most
// once and the handle kept for the process lifetime; the cache never evicts.
//
// Granularity is per event name, not per bank: two banks that define the
// same event share one cache slot and whichever loads first wins. A failed
// load leaves the entry absent so every later occurrence retries, which lets
// an asset dropped in by the user become playable without a restart.

use std::collections::HashMap;

use crate::host::{AudioOutput, SampleHandle};

#[derive(Debug, Default)]
pub struct SampleCache {
    entries: HashMap<String, SampleHandle>,
}

impl SampleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle for `event`, loading it from `path` on first use.
    pub fn get_or_load(
        &mut self,
        event: &str,
        path: &str,
        audio: &dyn AudioOutput,
    ) -> Option<SampleHandle> {
        if let Some(&handle) = self.entries.get(event) {
            return Some(handle);
        }
        match audio.load_sample(path) {
            Some(handle) => {
                self.entries.insert(event.to_string(), handle);
                Some(handle)
            }
            None => {
                log::debug!("sample load failed for '{}' ({}); will retry", event, path);
                None
            }
        }
    }

    pub fn contains(&self, event: &str) -> bool {
        self.entries.contains_key(event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

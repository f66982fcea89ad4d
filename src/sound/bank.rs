// Sound banks
// A bank maps sound event names to asset paths. Banks are keyed by entity
// model name, with a "default" bank as the fallback for unknown models.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the fallback bank.
pub const DEFAULT_BANK_KEY: &str = "default";

/// File listing the event-to-file mapping inside a bank's base path.
const BANK_MANIFEST: &str = "sound.cfg";

/// A named collection of sound-event-to-asset mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundBank {
    pub key: String,
    pub base_path: PathBuf,
    named_sounds: HashMap<String, String>,
}

impl SoundBank {
    /// Load a bank from `base_path` by reading its manifest, `event = file`
    /// per line with `#` comments. A missing or unreadable manifest yields
    /// an empty bank (no sound, not an error).
    pub fn load<P: AsRef<Path>>(key: &str, base_path: P) -> Self {
        let base_path = base_path.as_ref().to_path_buf();
        let mut named_sounds = HashMap::new();

        let manifest = base_path.join(BANK_MANIFEST);
        match fs::read_to_string(&manifest) {
            Ok(content) => {
                for line in content.lines() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    let Some((event, file)) = line.split_once('=') else {
                        continue;
                    };
                    let event = event.trim();
                    let file = file.trim();
                    if event.is_empty() || file.is_empty() {
                        continue;
                    }
                    let full = base_path.join(file).to_string_lossy().into_owned();
                    named_sounds.insert(event.to_string(), full);
                }
            }
            Err(e) => {
                log::warn!("bank '{}': cannot read {}: {}", key, manifest.display(), e);
            }
        }

        SoundBank {
            key: key.to_string(),
            base_path,
            named_sounds,
        }
    }

    /// Full asset path for a sound event, if the bank defines it.
    pub fn sound_path(&self, event: &str) -> Option<&str> {
        self.named_sounds.get(event).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.named_sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named_sounds.is_empty()
    }
}

/// All banks loaded at startup; read-only afterwards.
#[derive(Debug, Default)]
pub struct BankSet {
    banks: HashMap<String, SoundBank>,
}

impl BankSet {
    /// Load every bank from `key: base_path` config entries.
    pub fn load(entries: &[(String, String)]) -> Self {
        let mut banks = HashMap::new();
        for (key, base) in entries {
            let bank = SoundBank::load(key, base);
            log::info!("loaded sound bank '{}' ({} events)", key, bank.len());
            banks.insert(key.clone(), bank);
        }
        BankSet { banks }
    }

    pub fn insert(&mut self, bank: SoundBank) {
        self.banks.insert(bank.key.clone(), bank);
    }

    pub fn get(&self, key: &str) -> Option<&SoundBank> {
        self.banks.get(key)
    }

    /// Bank for an entity model: the model's own bank if present, else the
    /// default bank, else none (silent).
    pub fn resolve(&self, model: &str) -> Option<&SoundBank> {
        self.banks
            .get(model)
            .or_else(|| self.banks.get(DEFAULT_BANK_KEY))
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}

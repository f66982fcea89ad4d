// Configuration sources
// File-backed text sources with built-in default templates: a missing file
// is populated with its default and then read back.

use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

/// Failing to read or write the config location is the only fatal condition
/// in this crate; everything else degrades to partial functionality.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Well-known configuration file names.
pub const VEHICLES_FILE: &str = "MyVehicles.ini";
pub const ACTORS_FILE: &str = "MyPeds.ini";
pub const VEHICLE_GROUPS_FILE: &str = "MyCarGroups.ini";
pub const ACTOR_GROUPS_FILE: &str = "MyPedGroups.ini";
pub const SOUNDS_FILE: &str = "MySounds.ini";

/// Directory-rooted provider of configuration text sources.
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        ConfigStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_of(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Read a config file, writing `default` first if the file is missing.
    pub fn read_or_default(&self, file: &str, default: &str) -> Result<String, ConfigError> {
        let path = self.path_of(file);
        if !path.exists() {
            log::info!("{} missing; writing default template", path.display());
            fs::write(&path, default).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
        }
        fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })
    }
}

/// Parse `name: member, member, ...` listing lines. Comment (`;`/`#`) and
/// blank lines are skipped, as are lines without a colon.
pub fn parse_listing(source: &str) -> Vec<(String, Vec<String>)> {
    let mut out = Vec::new();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        let members = rest
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        out.push((name.trim().to_string(), members));
    }
    out
}

/// Parse `key: value` lines where the value is a single path.
pub fn parse_keyed_paths(source: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        out.push((key.to_string(), value.to_string()));
    }
    out
}

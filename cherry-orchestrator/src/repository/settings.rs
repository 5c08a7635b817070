//! Settings Store
//!
//! Loads and saves the process-wide [`Settings`] as a JSON file.
//! Loading never fails: a missing or unreadable file yields defaults.

use cherry_core::domain::settings::Settings;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::repository::cherry::write_creating_parents;
use crate::repository::error::PersistenceError;

/// File-backed settings persistence
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/filecherry/settings.json`
    pub fn at_default_location() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("filecherry").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings file
    ///
    /// A missing file returns defaults. A file that cannot be parsed is
    /// removed and defaults are returned; the next save recreates it. Content
    /// that is not UTF-8 counts as unparsable.
    pub fn load(&self) -> Settings {
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(e) => {
                warn!(
                    "Failed to read settings at {}: {}; using defaults",
                    self.path.display(),
                    e
                );
                return Settings::default();
            }
        };

        match serde_json::from_slice::<Settings>(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {}", self.path.display());
                settings
            }
            Err(e) => {
                warn!(
                    "Discarding unparsable settings at {}: {}",
                    self.path.display(),
                    e
                );
                if let Err(e) = std::fs::remove_file(&self.path) {
                    warn!("Failed to remove {}: {}", self.path.display(), e);
                }
                Settings::default()
            }
        }
    }

    /// Writes every field, creating parent directories as needed
    pub fn save(&self, settings: &Settings) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(settings)?;
        write_creating_parents(&self.path, &json)?;

        info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

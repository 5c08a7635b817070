//! Settings domain type

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Process-wide configuration persisted between sessions
///
/// One value per process, owned by whoever loaded it and passed explicitly to
/// the components that need it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub auto_update: bool,
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// AI service credential
    #[serde(default)]
    pub ai_api_key: String,
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        !self.ai_api_key.trim().is_empty()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_update: false,
            storage_path: default_storage_path(),
            ai_api_key: String::new(),
        }
    }
}

// The credential must never end up in logs.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.has_api_key() { "<redacted>" } else { "<unset>" };
        f.debug_struct("Settings")
            .field("auto_update", &self.auto_update)
            .field("storage_path", &self.storage_path)
            .field("ai_api_key", &key)
            .finish()
    }
}

/// `~/.filecherry/cherries`, or a relative fallback when no home directory exists
pub fn default_storage_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".filecherry")
        .join("cherries")
}

//! Cherry Registry
//!
//! In-memory, insertion-ordered store of cherries. Cloning a registry hands
//! out another handle to the same records, so the lifecycle tracker and the
//! pipeline see each other's mutations immediately.

use cherry_core::domain::cherry::{Cherry, StatusFilter};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::repository::error::PersistenceError;

/// Record counts derived from the registry
///
/// `active + inactive == total`; a cherry is active while it is marked running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub favorites: usize,
}

#[derive(Debug, Default)]
struct Bowl {
    cherries: Vec<Cherry>,
    /// Last numeric ID handed out
    last_id: u64,
}

impl Bowl {
    fn contains(&self, id: &str) -> bool {
        self.cherries.iter().any(|c| c.id == id)
    }

    /// Next decimal ID that no record uses yet
    fn allocate_id(&mut self) -> String {
        loop {
            self.last_id += 1;
            let id = self.last_id.to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Cherry> {
        self.cherries.iter_mut().find(|c| c.id == id)
    }
}

/// Shared handle to the cherry store
#[derive(Debug, Clone, Default)]
pub struct CherryRegistry {
    inner: Arc<Mutex<Bowl>>,
}

impl CherryRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the two starter cherries
    pub fn seeded() -> Self {
        let registry = Self::new();
        registry.add(
            "Task Cherry",
            "Simple task management app",
            "productivity",
            "go-gin",
        );
        registry.add(
            "Note Taker",
            "Quick note-taking utility",
            "productivity",
            "static",
        );
        registry
    }

    /// Rebuilds a registry from externally supplied records
    ///
    /// Records keep their IDs; later duplicates of an ID are dropped. New IDs
    /// are allocated above the largest numeric ID imported.
    pub fn import(cherries: Vec<Cherry>) -> Self {
        let mut seen = HashSet::new();
        let mut bowl = Bowl::default();

        for cherry in cherries {
            if !seen.insert(cherry.id.clone()) {
                warn!("Skipping duplicate cherry id {} on import", cherry.id);
                continue;
            }
            if let Ok(numeric) = cherry.id.parse::<u64>() {
                bowl.last_id = bowl.last_id.max(numeric);
            }
            bowl.cherries.push(cherry);
        }

        info!("Imported {} cherries", bowl.cherries.len());
        Self {
            inner: Arc::new(Mutex::new(bowl)),
        }
    }

    /// Imports a registry from a JSON array file
    pub fn load_file(path: &Path) -> Result<Self, PersistenceError> {
        let content = std::fs::read_to_string(path).map_err(|source| PersistenceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cherries: Vec<Cherry> =
            serde_json::from_str(&content).map_err(|source| PersistenceError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::import(cherries))
    }

    /// Exports every record to a JSON array file
    pub fn save_file(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(&self.list())?;
        write_creating_parents(path, &json)
    }

    fn lock(&self) -> MutexGuard<'_, Bowl> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates and appends a new cherry
    ///
    /// The estimated size is derived from `stack`; unknown stacks get `Unknown`.
    pub fn add(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        stack: impl Into<String>,
    ) -> Cherry {
        let mut bowl = self.lock();
        let id = bowl.allocate_id();
        let cherry = Cherry::new(id, name, description, category, stack);
        bowl.cherries.push(cherry.clone());

        debug!("Added cherry {} ({})", cherry.id, cherry.name);
        cherry
    }

    /// Deletes the record with `id`
    ///
    /// Absent IDs are not an error; the removed record is returned when there was one.
    pub fn remove(&self, id: &str) -> Option<Cherry> {
        let mut bowl = self.lock();
        let index = bowl.cherries.iter().position(|c| c.id == id)?;
        let removed = bowl.cherries.remove(index);

        debug!("Removed cherry {} ({})", removed.id, removed.name);
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<Cherry> {
        self.lock().cherries.iter().find(|c| c.id == id).cloned()
    }

    /// First cherry whose name matches, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<Cherry> {
        self.lock()
            .cherries
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Snapshot of every record in insertion order
    pub fn list(&self) -> Vec<Cherry> {
        self.lock().cherries.clone()
    }

    pub fn filter(&self, filter: StatusFilter) -> Vec<Cherry> {
        self.lock()
            .cherries
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect()
    }

    pub fn favorites(&self) -> Vec<Cherry> {
        self.lock()
            .cherries
            .iter()
            .filter(|c| c.favorite)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().cherries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> RegistryStats {
        let bowl = self.lock();
        let total = bowl.cherries.len();
        let active = bowl.cherries.iter().filter(|c| c.is_running).count();
        let favorites = bowl.cherries.iter().filter(|c| c.favorite).count();

        RegistryStats {
            total,
            active,
            inactive: total - active,
            favorites,
        }
    }

    /// Applies `f` to the record with `id`, returning `None` when absent
    ///
    /// The ID itself must not be changed by `f`.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut Cherry) -> R) -> Option<R> {
        let mut bowl = self.lock();
        let cherry = bowl.find_mut(id)?;
        let original_id = cherry.id.clone();
        let result = f(cherry);
        cherry.id = original_id;
        Some(result)
    }

    /// Records the scaffolded project directory
    pub fn set_path(&self, id: &str, path: PathBuf) -> bool {
        self.update(id, |c| c.path = Some(path)).is_some()
    }

    /// Flips the favorite flag, returning the new value
    pub fn toggle_favorite(&self, id: &str) -> Option<bool> {
        self.update(id, |c| {
            c.favorite = !c.favorite;
            c.favorite
        })
    }
}

pub(crate) fn write_creating_parents(path: &Path, content: &str) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, content).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

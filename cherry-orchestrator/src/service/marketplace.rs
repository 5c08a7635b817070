//! Marketplace
//!
//! Static catalog of ready-made cherries. Installing an entry is an explicit
//! user action that adds a regular cherry to the registry.

use cherry_core::domain::cherry::Cherry;
use cherry_core::domain::marketplace::CatalogEntry;
use tracing::info;

use crate::repository::CherryRegistry;

#[derive(Debug, Clone)]
pub struct Marketplace {
    entries: Vec<CatalogEntry>,
}

impl Marketplace {
    /// Marketplace over an arbitrary catalog
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Marketplace over the built-in catalog
    pub fn builtin() -> Self {
        Self::new(vec![
            entry(
                "task-manager",
                "Task Manager",
                "Simple task management with categories and due dates",
                "Productivity",
                "go-gin",
                1247,
                &["Offline-first", "Categories", "Due dates"],
                "✅",
                "FileCherry Team",
                "1.2.0",
            ),
            entry(
                "expense-tracker",
                "Expense Tracker",
                "Track spending with charts and budgets",
                "Personal",
                "bun-hono",
                892,
                &["Charts", "Budgets", "CSV export"],
                "💰",
                "FinanceTools",
                "2.0.1",
            ),
            entry(
                "pixel-art",
                "Pixel Art Studio",
                "Create pixel art with layers and animation",
                "Creative",
                "tauri-react",
                2156,
                &["Layers", "Animation", "Export"],
                "🎨",
                "ArtTools",
                "1.5.0",
            ),
            entry(
                "breathing-app",
                "Breathe Easy",
                "Guided breathing exercises with ambient sounds",
                "Health",
                "bun-hono",
                3421,
                &["Guided exercises", "Ambient sounds", "Progress tracking"],
                "🫁",
                "WellnessApps",
                "1.0.0",
            ),
        ])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries matching `query` on name or description, within `category`
    pub fn search(&self, query: &str, category: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.in_category(category) && e.matches_query(query))
            .collect()
    }

    /// Distinct categories in catalog order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }
        categories
    }

    /// Adds the catalog entry `id` to `registry` as a new cherry
    pub fn install(&self, registry: &CherryRegistry, id: &str) -> Option<Cherry> {
        let entry = self.get(id)?;
        let cherry = registry.add(
            entry.name.clone(),
            entry.description.clone(),
            entry.category.clone(),
            entry.stack.clone(),
        );

        info!(
            "Installed {} v{} from marketplace as cherry {}",
            entry.name, entry.version, cherry.id
        );
        Some(cherry)
    }
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    stack: &str,
    downloads: u32,
    features: &[&str],
    icon: &str,
    author: &str,
    version: &str,
) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        stack: stack.to_string(),
        downloads,
        features: features.iter().map(|f| f.to_string()).collect(),
        icon: icon.to_string(),
        author: author.to_string(),
        version: version.to_string(),
    }
}

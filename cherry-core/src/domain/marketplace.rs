//! Marketplace catalog types

use serde::{Deserialize, Serialize};

/// A ready-made cherry offered for installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub stack: String,
    pub downloads: u32,
    pub features: Vec<String>,
    pub icon: String,
    pub author: String,
    pub version: String,
}

impl CatalogEntry {
    /// Case-insensitive match on name or description
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Exact category match, `All` matches anything
    pub fn in_category(&self, category: &str) -> bool {
        category.eq_ignore_ascii_case("all") || self.category.eq_ignore_ascii_case(category)
    }
}

//! Cherry resolver module
//!
//! Lets commands accept either a cherry ID or its name.

use anyhow::{Result, anyhow};
use cherry_core::domain::cherry::Cherry;
use cherry_orchestrator::CherryRegistry;

/// Resolve an ID or case-insensitive name to a cherry
///
/// IDs win over names, so a cherry literally named "2" is only reachable
/// through its own ID.
pub fn resolve_cherry(registry: &CherryRegistry, key: &str) -> Result<Cherry> {
    registry
        .get(key)
        .or_else(|| registry.find_by_name(key))
        .ok_or_else(|| anyhow!("No cherry found with ID or name '{}'", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_id_or_name() {
        let registry = CherryRegistry::seeded();
        assert_eq!(resolve_cherry(&registry, "2").unwrap().name, "Note Taker");
        assert_eq!(resolve_cherry(&registry, "task cherry").unwrap().id, "1");
        assert!(resolve_cherry(&registry, "ghost").is_err());
    }
}

//! Build specification domain types

use serde::{Deserialize, Serialize};

use crate::domain::cherry::Stack;

/// Structured application specification returned by the Spec Generator
///
/// Extra fields the service may add (icon, commands, technical details) are
/// ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpecification {
    pub name: String,
    pub description: String,
    /// Ordered feature tags
    #[serde(default)]
    pub features: Vec<String>,
    pub stack: String,
}

impl BuildSpecification {
    /// Parses the stack tag into one of the recognized stacks
    pub fn recognized_stack(&self) -> Result<Stack, String> {
        self.stack.parse()
    }
}

/// Optional features a project can be created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Database,
    Sync,
    Auth,
}

impl FeatureKind {
    /// Name passed to the tool's `add` subcommand
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Database => "database",
            FeatureKind::Sync => "sync",
            FeatureKind::Auth => "auth",
        }
    }

    /// Provider used when the caller does not pick one
    pub fn default_provider(&self) -> &'static str {
        match self {
            FeatureKind::Database => "fireproof",
            FeatureKind::Sync => "fireproof-cloud",
            FeatureKind::Auth => "device",
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature toggles sent to the Spec Generator and used for project creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub database: bool,
    pub sync: bool,
    pub auth: bool,
}

impl FeatureFlags {
    /// Defaults used by the build pipeline: database and sync on, auth off
    pub fn pipeline_defaults() -> Self {
        Self {
            database: true,
            sync: true,
            auth: false,
        }
    }

    /// Requested features in the order the tool should add them
    pub fn requested(&self) -> Vec<FeatureKind> {
        [
            (self.database, FeatureKind::Database),
            (self.sync, FeatureKind::Sync),
            (self.auth, FeatureKind::Auth),
        ]
        .into_iter()
        .filter_map(|(on, kind)| on.then_some(kind))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_extra_fields() {
        let json = r#"{
            "name": "Habit Tracker",
            "description": "Track habits",
            "features": ["Fireproof Database", "Cloud Sync"],
            "stack": "go-gin",
            "icon": "x",
            "commands": ["tinyapp build"]
        }"#;
        let spec: BuildSpecification = serde_json::from_str(json).unwrap();
        assert_eq!(spec.name, "Habit Tracker");
        assert_eq!(spec.features, vec!["Fireproof Database", "Cloud Sync"]);
        assert_eq!(spec.recognized_stack(), Ok(Stack::GoGin));
    }

    #[test]
    fn test_unrecognized_stack() {
        let spec = BuildSpecification {
            name: "x".into(),
            description: "y".into(),
            features: vec![],
            stack: "php-laravel".into(),
        };
        assert!(spec.recognized_stack().is_err());
    }

    #[test]
    fn test_pipeline_default_flags() {
        let flags = FeatureFlags::pipeline_defaults();
        assert_eq!(
            flags.requested(),
            vec![FeatureKind::Database, FeatureKind::Sync]
        );
    }

    #[test]
    fn test_feature_providers() {
        assert_eq!(FeatureKind::Database.default_provider(), "fireproof");
        assert_eq!(FeatureKind::Sync.default_provider(), "fireproof-cloud");
        assert_eq!(FeatureKind::Auth.default_provider(), "device");
    }
}

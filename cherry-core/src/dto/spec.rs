//! Spec Generator request DTO

use serde::{Deserialize, Serialize};

use crate::domain::spec::FeatureFlags;

/// Body of the POST sent to the Spec Generator endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSpecRequest {
    pub description: String,
    pub category: String,
    pub stack: String,
    pub include_database: bool,
    pub include_sync: bool,
    pub include_auth: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bug_free_mode: Option<bool>,
}

impl GenerateSpecRequest {
    pub fn new(
        description: impl Into<String>,
        category: impl Into<String>,
        stack: impl Into<String>,
        flags: FeatureFlags,
    ) -> Self {
        Self {
            description: description.into(),
            category: category.into(),
            stack: stack.into(),
            include_database: flags.database,
            include_sync: flags.sync,
            include_auth: flags.auth,
            enhanced_mode: None,
            bug_free_mode: None,
        }
    }

    pub fn flags(&self) -> FeatureFlags {
        FeatureFlags {
            database: self.include_database,
            sync: self.include_sync,
            auth: self.include_auth,
        }
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhanced_mode.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_request_omits_mode_flags() {
        let req = GenerateSpecRequest::new("notes", "productivity", "static", FeatureFlags::default());
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["includeDatabase"], false);
        assert!(value.get("enhancedMode").is_none());
        assert!(value.get("bugFreeMode").is_none());
    }

    #[test]
    fn test_flags_round_trip_through_request() {
        let flags = FeatureFlags::pipeline_defaults();
        let req = GenerateSpecRequest::new("d", "c", "go-gin", flags);
        assert_eq!(req.flags(), flags);
        assert!(!req.is_enhanced());
    }
}

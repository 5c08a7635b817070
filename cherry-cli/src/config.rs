//! Configuration module
//!
//! Resolved CLI configuration and the constructors built from it.

use anyhow::{Context, Result};
use cherry_core::domain::settings::Settings;
use cherry_orchestrator::{BuildOrchestrator, CherryRegistry, OrchestratorConfig, SettingsStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Tool and Spec Generator locations
    pub orchestrator: OrchestratorConfig,
    /// Settings file override
    pub settings_path: Option<PathBuf>,
    /// Registry import/export file
    pub bowl: Option<PathBuf>,
}

impl Config {
    pub fn settings_store(&self) -> SettingsStore {
        match &self.settings_path {
            Some(path) => SettingsStore::new(path.clone()),
            None => SettingsStore::at_default_location(),
        }
    }

    /// Imports the registry from the bowl file, or seeds a fresh one
    pub fn load_registry(&self) -> Result<CherryRegistry> {
        match &self.bowl {
            Some(path) if path.exists() => {
                debug!("Importing registry from {}", path.display());
                CherryRegistry::load_file(path)
                    .with_context(|| format!("Failed to import registry from {}", path.display()))
            }
            _ => Ok(CherryRegistry::seeded()),
        }
    }

    /// Exports the registry back to the bowl file, when one is configured
    pub fn save_registry(&self, registry: &CherryRegistry) -> Result<()> {
        if let Some(path) = &self.bowl {
            registry
                .save_file(path)
                .with_context(|| format!("Failed to export registry to {}", path.display()))?;
        }
        Ok(())
    }

    /// Wires the build orchestrator over `registry`
    pub fn build_orchestrator(
        &self,
        registry: CherryRegistry,
        settings: &Settings,
    ) -> Result<BuildOrchestrator> {
        let client = self
            .orchestrator
            .spec_client(settings)
            .context("Failed to create Spec Generator client")?;

        Ok(BuildOrchestrator::new(
            registry,
            Arc::new(client),
            Arc::new(self.orchestrator.tool()),
        ))
    }
}

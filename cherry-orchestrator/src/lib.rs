//! Cherry Orchestrator
//!
//! Tracks cherries and drives them through the install, generate-spec,
//! scaffold, build and run life cycle.
//!
//! Architecture:
//! - Configuration: tool root, tool program and Spec Generator URL, resolved once at startup
//! - Repositories: the in-memory cherry registry and the settings file
//! - Tool: subprocess wrapper around the external build tool
//! - Services: build pipeline, lifecycle tracking and the marketplace
//!
//! The registry has no storage of its own; it is rebuilt from seed data or an
//! explicit JSON import on every start.

pub mod config;
pub mod repository;
pub mod service;
pub mod tool;

pub use config::OrchestratorConfig;
pub use repository::{CherryRegistry, PersistenceError, RegistryStats, SettingsStore};
pub use service::{
    BuildOrchestrator, CodeFixer, LifecycleTracker, Marketplace, NoopFixer, PipelineError,
    ProjectReport, StageError,
};
pub use tool::{CliTool, InvokerError, ProjectTool};

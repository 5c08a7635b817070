//! Service Module
//!
//! Business logic layer for the orchestrator.
//! Services coordinate the registry, the Spec Generator and the build tool.

pub mod fixer;
pub mod lifecycle;
pub mod marketplace;
pub mod pipeline;

// Re-export for convenience
pub use fixer::{CodeFixer, NoopFixer};
pub use lifecycle::LifecycleTracker;
pub use marketplace::Marketplace;
pub use pipeline::{BuildOrchestrator, PipelineError, ProjectReport, StageError};

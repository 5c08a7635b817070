//! Repository Module
//!
//! State owned by the orchestrator process.
//! The cherry registry lives in memory; settings are read from and written to
//! a JSON file.

pub mod cherry;
pub mod error;
pub mod settings;

// Re-export for convenience
pub use cherry::{CherryRegistry, RegistryStats};
pub use error::PersistenceError;
pub use settings::SettingsStore;

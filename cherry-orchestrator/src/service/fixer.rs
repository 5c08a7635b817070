//! Code fix stage

use async_trait::async_trait;
use cherry_core::domain::spec::BuildSpecification;
use std::path::Path;

/// Repairs a freshly scaffolded project before it is built
///
/// `Ok` carries any output worth logging; `Err` fails the FixingCode stage
/// with the given cause.
#[async_trait]
pub trait CodeFixer: Send + Sync {
    async fn fix(&self, project_dir: &Path, spec: &BuildSpecification) -> Result<String, String>;
}

/// Fixer that accepts every project unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFixer;

#[async_trait]
impl CodeFixer for NoopFixer {
    async fn fix(&self, _project_dir: &Path, _spec: &BuildSpecification) -> Result<String, String> {
        Ok(String::new())
    }
}

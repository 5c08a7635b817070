//! External build tool invocation
//!
//! Wraps the command-line tool that scaffolds, extends and builds projects:
//! - `new --name <name> --stack <stack>`
//! - `add <feature> --provider <provider> --project <name>`
//! - `build --project <name>`
//!
//! Every call runs with the tool root as working directory and waits for the
//! process to exit. No timeout is enforced here; callers that need bounded
//! latency wrap the call themselves.

use async_trait::async_trait;
use cherry_core::domain::cherry::project_slug;
use cherry_core::domain::spec::BuildSpecification;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Errors raised while running the external tool
#[derive(Debug, Error)]
pub enum InvokerError {
    /// The tool ran and exited non-zero; `output` is its combined stdout and stderr
    #[error("external tool exited with code {exit_code}:\n{output}")]
    ExternalTool { exit_code: i32, output: String },

    /// The tool process could not be started at all
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The specification was rejected before the tool was started
    #[error("invalid build specification: {0}")]
    InvalidSpec(String),
}

impl InvokerError {
    /// Exit code of the failed process, if it got that far
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            InvokerError::ExternalTool { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }

    /// Captured process output, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            InvokerError::ExternalTool { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Operations of the external build tool
///
/// Successful calls return the combined process output.
#[async_trait]
pub trait ProjectTool: Send + Sync {
    /// Scaffolds a new project from a specification
    async fn create(&self, spec: &BuildSpecification) -> Result<String, InvokerError>;

    /// Adds a feature to an already-scaffolded project
    async fn add_feature(
        &self,
        project: &str,
        feature: &str,
        provider: &str,
    ) -> Result<String, InvokerError>;

    /// Builds a scaffolded project
    async fn build(&self, project: &str) -> Result<String, InvokerError>;

    /// Directory the tool scaffolds `project` into
    fn project_dir(&self, project: &str) -> PathBuf;
}

/// Subprocess-backed implementation of [`ProjectTool`]
#[derive(Debug, Clone)]
pub struct CliTool {
    program: String,
    script: Option<PathBuf>,
    root: PathBuf,
}

impl CliTool {
    /// Creates a tool invoker
    ///
    /// # Arguments
    /// * `program` - Executable to launch (e.g., "node")
    /// * `script` - Optional first argument, typically the tool's entry script
    /// * `root` - Working directory for every invocation
    pub fn new(program: impl Into<String>, script: Option<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full argument vector for a tool subcommand
    fn args<'a>(&'a self, subcommand: &[&'a str]) -> Vec<&'a std::ffi::OsStr> {
        self.script
            .iter()
            .map(|s| s.as_os_str())
            .chain(subcommand.iter().map(|s| std::ffi::OsStr::new(*s)))
            .collect()
    }

    /// Runs the tool and returns its combined output on success
    async fn run(&self, subcommand: &[&str]) -> Result<String, InvokerError> {
        info!(
            "Running {} {} in {}",
            self.program,
            subcommand.join(" "),
            self.root.display()
        );

        let output = Command::new(&self.program)
            .args(self.args(subcommand))
            .current_dir(&self.root)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| InvokerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !stdout.trim().is_empty() {
            debug!("tool stdout: {}", stdout.trim());
        }
        if !stderr.trim().is_empty() {
            debug!("tool stderr: {}", stderr.trim());
        }

        let combined = format!("{}{}", stdout, stderr);

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            warn!(
                "Tool command '{}' failed with exit_code={}",
                subcommand.first().copied().unwrap_or_default(),
                exit_code
            );
            return Err(InvokerError::ExternalTool {
                exit_code,
                output: combined,
            });
        }

        Ok(combined)
    }
}

#[async_trait]
impl ProjectTool for CliTool {
    async fn create(&self, spec: &BuildSpecification) -> Result<String, InvokerError> {
        if spec.name.trim().is_empty() {
            return Err(InvokerError::InvalidSpec("name is empty".to_string()));
        }
        let stack = spec.recognized_stack().map_err(InvokerError::InvalidSpec)?;

        self.run(&["new", "--name", &spec.name, "--stack", stack.as_str()])
            .await
    }

    async fn add_feature(
        &self,
        project: &str,
        feature: &str,
        provider: &str,
    ) -> Result<String, InvokerError> {
        self.run(&["add", feature, "--provider", provider, "--project", project])
            .await
    }

    async fn build(&self, project: &str) -> Result<String, InvokerError> {
        self.run(&["build", "--project", project]).await
    }

    fn project_dir(&self, project: &str) -> PathBuf {
        self.root
            .join("projects")
            .join("drafts")
            .join(project_slug(project))
    }
}

//! Orchestrator configuration
//!
//! Locations of the external build tool and the Spec Generator service.
//! Resolved once at startup and passed into the constructors that need them.

use cherry_client::SpecGeneratorClient;
use cherry_core::domain::settings::Settings;
use std::path::PathBuf;
use std::time::Duration;

use crate::tool::CliTool;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Root directory of the external build tool; every tool call runs here
    pub tool_root: PathBuf,

    /// Program used to launch the tool (e.g., "node")
    pub tool_program: String,

    /// Script handed to the program as its first argument, relative to the tool root
    pub tool_script: Option<PathBuf>,

    /// Spec Generator base URL (e.g., "http://localhost:3000")
    pub spec_generator_url: String,

    /// Timeout applied to each Spec Generator request
    pub request_timeout: Duration,
}

impl OrchestratorConfig {
    /// Creates a new configuration with defaults
    pub fn new(tool_root: impl Into<PathBuf>, spec_generator_url: impl Into<String>) -> Self {
        Self {
            tool_root: tool_root.into(),
            tool_program: "node".to_string(),
            tool_script: Some(PathBuf::from("cli.js")),
            spec_generator_url: spec_generator_url.into(),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - CHERRY_TOOL_ROOT (required)
    /// - CHERRY_TOOL_PROGRAM (optional, default: node)
    /// - CHERRY_TOOL_SCRIPT (optional, default: cli.js, empty for none)
    /// - CHERRY_SPEC_URL (optional, default: http://localhost:3000)
    /// - CHERRY_SPEC_TIMEOUT (optional, seconds, default: 120)
    pub fn from_env() -> anyhow::Result<Self> {
        let tool_root = std::env::var("CHERRY_TOOL_ROOT")
            .map_err(|_| anyhow::anyhow!("CHERRY_TOOL_ROOT environment variable not set"))?;

        let spec_generator_url = std::env::var("CHERRY_SPEC_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let mut config = Self::new(tool_root, spec_generator_url);

        if let Ok(program) = std::env::var("CHERRY_TOOL_PROGRAM") {
            config.tool_program = program;
        }

        if let Ok(script) = std::env::var("CHERRY_TOOL_SCRIPT") {
            config.tool_script = (!script.is_empty()).then(|| PathBuf::from(script));
        }

        config.request_timeout = std::env::var("CHERRY_SPEC_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(config.request_timeout);

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tool_root.as_os_str().is_empty() {
            anyhow::bail!("tool_root cannot be empty");
        }

        if self.tool_program.trim().is_empty() {
            anyhow::bail!("tool_program cannot be empty");
        }

        if !self.spec_generator_url.starts_with("http://")
            && !self.spec_generator_url.starts_with("https://")
        {
            anyhow::bail!("spec_generator_url must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds the tool invoker rooted at `tool_root`
    pub fn tool(&self) -> CliTool {
        CliTool::new(
            self.tool_program.clone(),
            self.tool_script.clone(),
            self.tool_root.clone(),
        )
    }

    /// Builds a Spec Generator client carrying the credential from `settings`
    pub fn spec_client(&self, settings: &Settings) -> cherry_client::Result<SpecGeneratorClient> {
        let client =
            SpecGeneratorClient::with_timeout(self.spec_generator_url.clone(), self.request_timeout)?;
        Ok(client.with_api_key(settings.ai_api_key.clone()))
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::new(".", "http://localhost:3000")
    }
}

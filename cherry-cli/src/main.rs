//! Cherry CLI
//!
//! Command-line interface for managing cherries and driving their builds.

mod commands;
mod config;
mod resolver;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cherry")]
#[command(about = "Tiny app lifecycle and build pipeline CLI", long_about = None)]
struct Cli {
    /// Root directory of the external build tool
    #[arg(long, global = true, env = "CHERRY_TOOL_ROOT", default_value = ".")]
    tool_root: PathBuf,

    /// Program used to launch the build tool
    #[arg(long, global = true, env = "CHERRY_TOOL_PROGRAM", default_value = "node")]
    tool_program: String,

    /// Entry script passed to the tool program, empty for none
    #[arg(long, global = true, env = "CHERRY_TOOL_SCRIPT", default_value = "cli.js")]
    tool_script: String,

    /// Spec Generator base URL
    #[arg(
        long,
        global = true,
        env = "CHERRY_SPEC_URL",
        default_value = "http://localhost:3000"
    )]
    spec_url: String,

    /// Spec Generator request timeout in seconds
    #[arg(long, global = true, env = "CHERRY_SPEC_TIMEOUT", default_value_t = 120)]
    spec_timeout: u64,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long, global = true, env = "CHERRY_SETTINGS")]
    settings: Option<PathBuf>,

    /// JSON file the registry is imported from and exported back to
    #[arg(long, global = true, env = "CHERRY_BOWL")]
    bowl: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cherry_cli=info,cherry_orchestrator=info,cherry_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut orchestrator = cherry_orchestrator::OrchestratorConfig::new(cli.tool_root, cli.spec_url);
    orchestrator.tool_program = cli.tool_program;
    orchestrator.tool_script = (!cli.tool_script.is_empty()).then(|| PathBuf::from(cli.tool_script));
    orchestrator.request_timeout = Duration::from_secs(cli.spec_timeout);
    orchestrator.validate()?;

    let config = Config {
        orchestrator,
        settings_path: cli.settings,
        bowl: cli.bowl,
    };

    handle_command(cli.command, &config).await
}

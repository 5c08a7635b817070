//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod build;
mod cherry;
mod marketplace;
mod settings;

pub use marketplace::MarketplaceCommands;
pub use settings::SettingsCommands;

use anyhow::Result;
use clap::{Args, Subcommand};
use cherry_core::domain::cherry::StatusFilter;
use cherry_core::domain::spec::FeatureFlags;

use crate::config::Config;

/// Optional features for project creation and spec generation
#[derive(Args, Debug, Clone, Copy)]
pub struct FeatureArgs {
    /// Include a database (fireproof)
    #[arg(long)]
    pub database: bool,
    /// Include cloud sync (fireproof-cloud)
    #[arg(long)]
    pub sync: bool,
    /// Include device authentication
    #[arg(long)]
    pub auth: bool,
}

impl From<FeatureArgs> for FeatureFlags {
    fn from(args: FeatureArgs) -> Self {
        FeatureFlags {
            database: args.database,
            sync: args.sync,
            auth: args.auth,
        }
    }
}

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List cherries
    List {
        /// all, running or stopped
        #[arg(long, default_value = "all")]
        filter: StatusFilter,
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Show registry counts
    Stats,
    /// Add a cherry by hand
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "productivity")]
        category: String,
        #[arg(long, default_value = "go-gin")]
        stack: String,
    },
    /// Remove a cherry
    Remove {
        /// Cherry ID or name
        id: String,
    },
    /// Mark a cherry running
    Run {
        /// Cherry ID or name
        id: String,
    },
    /// Mark a cherry stopped
    Stop {
        /// Cherry ID or name
        id: String,
    },
    /// Toggle a cherry's favorite flag
    Favorite {
        /// Cherry ID or name
        id: String,
    },
    /// Run the full build pipeline for a cherry
    Build {
        /// Cherry ID or name
        id: String,
    },
    /// Scaffold a cherry's project and add features
    New {
        /// Cherry ID or name
        id: String,
        #[command(flatten)]
        features: FeatureArgs,
    },
    /// Generate a specification from a description
    Generate {
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "productivity")]
        category: String,
        #[arg(long, default_value = "go-gin")]
        stack: String,
        #[command(flatten)]
        features: FeatureArgs,
        /// Use the richer enhanced-mode prompt
        #[arg(long)]
        enhanced: bool,
        /// Add the generated specification as a new cherry
        #[arg(long)]
        add: bool,
    },
    /// Browse and install ready-made cherries
    Marketplace {
        #[command(subcommand)]
        command: MarketplaceCommands,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List { filter, favorites } => cherry::list_cherries(config, filter, favorites),
        Commands::Stats => cherry::show_stats(config),
        Commands::Add {
            name,
            description,
            category,
            stack,
        } => cherry::add_cherry(config, &name, &description, &category, &stack),
        Commands::Remove { id } => cherry::remove_cherry(config, &id),
        Commands::Run { id } => cherry::set_running(config, &id, true),
        Commands::Stop { id } => cherry::set_running(config, &id, false),
        Commands::Favorite { id } => cherry::toggle_favorite(config, &id),
        Commands::Build { id } => build::build_cherry(config, &id).await,
        Commands::New { id, features } => build::create_project(config, &id, features.into()).await,
        Commands::Generate {
            description,
            category,
            stack,
            features,
            enhanced,
            add,
        } => {
            build::generate(
                config,
                build::GenerateArgs {
                    description,
                    category,
                    stack,
                    flags: features.into(),
                    enhanced,
                    add,
                },
            )
            .await
        }
        Commands::Marketplace { command } => marketplace::handle_marketplace_command(command, config),
        Commands::Settings { command } => settings::handle_settings_command(command, config),
    }
}

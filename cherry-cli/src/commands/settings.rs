//! Settings command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use cherry_core::domain::settings::Settings;
use colored::*;
use std::path::PathBuf;

use crate::config::Config;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings
    Show {
        /// Print the raw JSON, with the API key redacted
        #[arg(long)]
        json: bool,
    },
    /// Change one or more settings
    Set {
        #[arg(long)]
        auto_update: Option<bool>,
        #[arg(long)]
        storage_path: Option<PathBuf>,
        /// AI service key; pass an empty string to clear it
        #[arg(long)]
        ai_api_key: Option<String>,
    },
}

/// Handle settings commands
pub fn handle_settings_command(command: SettingsCommands, config: &Config) -> Result<()> {
    let store = config.settings_store();

    match command {
        SettingsCommands::Show { json } => {
            let settings = store.load();
            if json {
                let mut shown = settings.clone();
                if shown.has_api_key() {
                    shown.ai_api_key = "<redacted>".to_string();
                }
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                print_settings(&settings, &store.path().display().to_string());
            }
            Ok(())
        }
        SettingsCommands::Set {
            auto_update,
            storage_path,
            ai_api_key,
        } => {
            let mut settings = store.load();
            if let Some(auto_update) = auto_update {
                settings.auto_update = auto_update;
            }
            if let Some(storage_path) = storage_path {
                settings.storage_path = storage_path;
            }
            if let Some(key) = ai_api_key {
                settings.ai_api_key = key.trim().to_string();
            }

            store
                .save(&settings)
                .with_context(|| format!("Failed to save settings to {}", store.path().display()))?;

            println!("{} Settings saved", "✓".green());
            print_settings(&settings, &store.path().display().to_string());
            Ok(())
        }
    }
}

fn print_settings(settings: &Settings, path: &str) {
    println!("{}", "Settings:".bold());
    println!("  File:         {}", path.dimmed());
    println!(
        "  Auto Update:  {}",
        if settings.auto_update { "on".green() } else { "off".dimmed() }
    );
    println!("  Storage Path: {}", settings.storage_path.display());
    println!(
        "  AI API Key:   {}",
        if settings.has_api_key() { "configured".green() } else { "not set".yellow() }
    );
}

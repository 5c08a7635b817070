//! Marketplace command handlers

use anyhow::{Result, anyhow};
use clap::Subcommand;
use cherry_core::domain::marketplace::CatalogEntry;
use cherry_orchestrator::Marketplace;
use colored::*;

use crate::commands::cherry::print_cherry_summary;
use crate::config::Config;

/// Marketplace subcommands
#[derive(Subcommand)]
pub enum MarketplaceCommands {
    /// List every catalog entry
    List,
    /// Search entries by name or description
    Search {
        #[arg(default_value = "")]
        query: String,
        /// Category to search in, "all" for any
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Install an entry as a new cherry
    Install {
        /// Catalog entry ID (e.g. task-manager)
        id: String,
    },
}

/// Handle marketplace commands
pub fn handle_marketplace_command(command: MarketplaceCommands, config: &Config) -> Result<()> {
    let market = Marketplace::builtin();

    match command {
        MarketplaceCommands::List => {
            print_entries(&market.entries().iter().collect::<Vec<_>>());
            Ok(())
        }
        MarketplaceCommands::Search { query, category } => {
            print_entries(&market.search(&query, &category));
            Ok(())
        }
        MarketplaceCommands::Install { id } => install(&market, config, &id),
    }
}

fn install(market: &Marketplace, config: &Config, id: &str) -> Result<()> {
    let registry = config.load_registry()?;
    let cherry = market
        .install(&registry, id)
        .ok_or_else(|| anyhow!("No marketplace entry with ID '{}'", id))?;
    config.save_registry(&registry)?;

    println!(
        "{} Installed {} as cherry {}",
        "✓".green(),
        cherry.name.bold(),
        cherry.id.bold()
    );
    println!();
    print_cherry_summary(&cherry);
    Ok(())
}

fn print_entries(entries: &[&CatalogEntry]) {
    if entries.is_empty() {
        println!("{}", "No marketplace entries found.".yellow());
        return;
    }

    let noun = if entries.len() == 1 { "entry" } else { "entries" };
    println!("{}", format!("Found {} {}:", entries.len(), noun).bold());
    println!();
    for entry in entries {
        println!(
            "  {} {} {} {}",
            entry.icon,
            entry.name.bold(),
            format!("v{}", entry.version).dimmed(),
            format!("[{}]", entry.id).cyan()
        );
        println!("    {}", entry.description);
        println!("    Category:  {}", entry.category);
        println!("    Stack:     {}", entry.stack);
        println!("    Author:    {}", entry.author.dimmed());
        println!("    Downloads: {}", entry.downloads);
        println!("    Features:  {}", entry.features.join(", ").dimmed());
        println!();
    }
}

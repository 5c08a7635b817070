//! Cherry command handlers
//!
//! Registry and lifecycle commands: listing, adding, removing, running and
//! stopping cherries.

use anyhow::Result;
use cherry_core::domain::cherry::{Cherry, RunState, StatusFilter};
use cherry_orchestrator::LifecycleTracker;
use colored::*;

use crate::config::Config;
use crate::resolver::resolve_cherry;

/// List cherries matching a filter
pub fn list_cherries(config: &Config, filter: StatusFilter, favorites_only: bool) -> Result<()> {
    let registry = config.load_registry()?;
    let cherries: Vec<Cherry> = registry
        .filter(filter)
        .into_iter()
        .filter(|c| !favorites_only || c.favorite)
        .collect();

    if cherries.is_empty() {
        println!("{}", "No cherries found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} cherr{}:", cherries.len(), plural_y(cherries.len())).bold()
        );
        println!();
        for cherry in &cherries {
            print_cherry_summary(cherry);
        }
    }

    Ok(())
}

/// Show total, active and inactive counts
pub fn show_stats(config: &Config) -> Result<()> {
    let stats = config.load_registry()?.stats();

    println!("{}", "Cherry Bowl:".bold());
    println!("  Total:     {}", stats.total.to_string().cyan());
    println!("  Active:    {}", stats.active.to_string().green());
    println!("  Inactive:  {}", stats.inactive.to_string().dimmed());
    println!("  Favorites: {}", stats.favorites.to_string().yellow());

    Ok(())
}

pub fn add_cherry(
    config: &Config,
    name: &str,
    description: &str,
    category: &str,
    stack: &str,
) -> Result<()> {
    let registry = config.load_registry()?;
    let cherry = registry.add(name, description, category, stack);
    config.save_registry(&registry)?;

    println!("{} Added cherry {}", "✓".green(), cherry.id.bold());
    println!();
    print_cherry_summary(&cherry);

    Ok(())
}

pub fn remove_cherry(config: &Config, key: &str) -> Result<()> {
    let registry = config.load_registry()?;
    let cherry = resolve_cherry(&registry, key)?;
    registry.remove(&cherry.id);
    config.save_registry(&registry)?;

    println!("{} Removed cherry {} ({})", "✓".green(), cherry.id.bold(), cherry.name);
    Ok(())
}

/// Mark a cherry running or stopped
pub fn set_running(config: &Config, key: &str, running: bool) -> Result<()> {
    let registry = config.load_registry()?;
    let cherry = resolve_cherry(&registry, key)?;
    let lifecycle = LifecycleTracker::new(registry.clone());

    if running {
        lifecycle.mark_running(&cherry.id);
    } else {
        lifecycle.mark_stopped(&cherry.id);
    }
    config.save_registry(&registry)?;

    let state = if running { RunState::Running } else { RunState::Stopped };
    println!("{} {} is now {}", "✓".green(), cherry.name.bold(), colorize_state(state));
    if running && !cherry.is_compiled {
        println!("{}", "  ⚠ This cherry has not been built yet".yellow());
    }

    Ok(())
}

pub fn toggle_favorite(config: &Config, key: &str) -> Result<()> {
    let registry = config.load_registry()?;
    let cherry = resolve_cherry(&registry, key)?;
    let favorite = registry.toggle_favorite(&cherry.id).unwrap_or(cherry.favorite);
    config.save_registry(&registry)?;

    if favorite {
        println!("{} {} added to favorites", "★".yellow(), cherry.name.bold());
    } else {
        println!("{} {} removed from favorites", "☆".dimmed(), cherry.name.bold());
    }

    Ok(())
}

/// Print a cherry summary
pub fn print_cherry_summary(cherry: &Cherry) {
    let star = if cherry.favorite { " ★".yellow() } else { "".normal() };

    println!("  {} Cherry {} {}{}", "▸".cyan(), cherry.id.bold(), cherry.name, star);
    if !cherry.description.is_empty() {
        println!("    {}", cherry.description.dimmed());
    }
    println!("    Status:   {}", colorize_state(cherry.run_state()));
    println!(
        "    Stack:    {} ({})",
        cherry.stack,
        cherry.size.dimmed()
    );
    println!("    Category: {}", cherry.category);
    println!(
        "    Compiled: {}",
        match cherry.last_compiled {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string().green(),
            None => "never".dimmed(),
        }
    );
    if let Some(at) = cherry.last_run {
        println!("    Last Run: {}", at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed());
    }
    if let Some(path) = &cherry.path {
        println!("    Path:     {}", path.display().to_string().dimmed());
    }
    println!();
}

/// Colorize run state for display
fn colorize_state(state: RunState) -> ColoredString {
    let text = state.to_string();
    match state {
        RunState::Running => text.green(),
        RunState::Stopped => text.dimmed(),
    }
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 { "y" } else { "ies" }
}

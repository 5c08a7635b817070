//! Build command handlers
//!
//! Runs the build pipeline, scaffolds projects and asks the Spec Generator
//! for new specifications.

use anyhow::{Context, Result, bail};
use cherry_client::SpecGenerator;
use cherry_core::domain::pipeline::{PipelineRun, PipelineStage, PipelineState};
use cherry_core::domain::spec::{BuildSpecification, FeatureFlags};
use cherry_core::dto::spec::GenerateSpecRequest;
use cherry_orchestrator::PipelineError;
use colored::*;

use crate::commands::cherry::print_cherry_summary;
use crate::config::Config;
use crate::resolver::resolve_cherry;

/// Inputs of the `generate` command
pub struct GenerateArgs {
    pub description: String,
    pub category: String,
    pub stack: String,
    pub flags: FeatureFlags,
    pub enhanced: bool,
    pub add: bool,
}

/// Run the build pipeline and stream its state changes
pub async fn build_cherry(config: &Config, key: &str) -> Result<()> {
    let settings = config.settings_store().load();
    let registry = config.load_registry()?;
    let cherry = resolve_cherry(&registry, key)?;
    let orchestrator = config.build_orchestrator(registry.clone(), &settings)?;

    println!("{}", format!("Building {} ({})", cherry.name, cherry.stack).bold());
    let plan: Vec<String> = PipelineStage::ORDER.iter().map(|s| s.to_string()).collect();
    println!("  {}", plan.join(" → ").dimmed());

    let mut events = orchestrator.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            print_state(&event.state);
        }
    });

    let result = orchestrator.start_build(&cherry.id).await;

    // Closing the channel ends the printer
    drop(orchestrator);
    if let Err(e) = printer.await {
        tracing::warn!("Event printer failed: {}", e);
    }

    match result {
        Ok(run) => {
            config.save_registry(&registry)?;
            println!();
            println!("{} Build {} succeeded", "✓".green(), run.id.to_string().dimmed());
            print_run_logs(&run);
            if let Some(updated) = registry.get(&cherry.id) {
                println!();
                print_cherry_summary(&updated);
            }
            Ok(())
        }
        Err(PipelineError::StageFailed { stage, source, run }) => {
            println!();
            print_run_logs(&run);
            bail!("{} failed: {}", stage, source)
        }
        Err(e) => Err(e.into()),
    }
}

/// Scaffold a project and add the requested features
pub async fn create_project(config: &Config, key: &str, flags: FeatureFlags) -> Result<()> {
    let settings = config.settings_store().load();
    let registry = config.load_registry()?;
    let cherry = resolve_cherry(&registry, key)?;
    let orchestrator = config.build_orchestrator(registry.clone(), &settings)?;

    let report = orchestrator
        .create_project(&cherry.id, flags)
        .await
        .with_context(|| format!("Failed to create project for {}", cherry.name))?;
    config.save_registry(&registry)?;

    println!("{} Created project {}", "✓".green(), cherry.name.bold());
    println!("  Path: {}", report.project_dir.display().to_string().cyan());
    for feature in &report.features_added {
        println!("  {} {} ({})", "+".green(), feature, feature.default_provider().dimmed());
    }
    for (feature, error) in &report.feature_failures {
        println!("  {} {}: {}", "⚠".yellow(), feature, error.to_string().yellow());
    }
    if !report.is_complete() {
        println!(
            "{}",
            "  Some features could not be added; the project was still created.".yellow()
        );
    }

    Ok(())
}

/// Generate a specification, optionally adding it as a cherry
pub async fn generate(config: &Config, args: GenerateArgs) -> Result<()> {
    let settings = config.settings_store().load();
    if !settings.has_api_key() {
        println!("{}", "⚠ No AI API key configured; the service may reject the request".yellow());
    }

    let req = GenerateSpecRequest::new(args.description, args.category, args.stack, args.flags);

    if args.add {
        let registry = config.load_registry()?;
        let orchestrator = config.build_orchestrator(registry.clone(), &settings)?;
        let (cherry, spec) = orchestrator
            .generate_cherry(req, args.enhanced)
            .await
            .context("Failed to generate cherry")?;
        config.save_registry(&registry)?;

        print_specification(&spec);
        println!("{} Added cherry {}", "✓".green(), cherry.id.bold());
        println!();
        print_cherry_summary(&cherry);
        return Ok(());
    }

    let client = config
        .orchestrator
        .spec_client(&settings)
        .context("Failed to create Spec Generator client")?;
    let result = if args.enhanced {
        client.generate_enhanced(req).await
    } else {
        client.generate(req).await
    };
    if result.as_ref().is_err_and(|e| e.is_server_error()) {
        println!("{}", "⚠ The Spec Generator reported a server error; retrying later may help".yellow());
    }
    let spec = result.context("Failed to generate specification")?;

    print_specification(&spec);
    Ok(())
}

fn print_state(state: &PipelineState) {
    match state {
        PipelineState::Succeeded => println!("  {} {}", "●".green(), state),
        PipelineState::Failed { cause, .. } => {
            println!("  {} {}", "●".red(), state.to_string().red());
            println!("    {}", cause.lines().next().unwrap_or_default().red());
        }
        _ => println!("  {} {}", "○".cyan(), state),
    }
}

fn print_run_logs(run: &PipelineRun) {
    if run.logs.is_empty() {
        return;
    }
    println!("{}", "Output:".bold());
    println!("{}", "─".repeat(80).dimmed());
    for log in &run.logs {
        let stamp = log.timestamp.format("%H:%M:%S").to_string();
        for line in log.output.lines() {
            println!("{} {} {}", stamp.dimmed(), format!("[{}]", log.stage).cyan(), line);
        }
    }
    println!("{}", "─".repeat(80).dimmed());
}

fn print_specification(spec: &BuildSpecification) {
    println!("{}", "Specification:".bold());
    println!("  Name:        {}", spec.name.cyan());
    println!("  Stack:       {}", spec.stack);
    println!("  Description: {}", spec.description);
    if !spec.features.is_empty() {
        println!("  Features:");
        for feature in &spec.features {
            println!("    - {}", feature);
        }
    }
    println!();
}

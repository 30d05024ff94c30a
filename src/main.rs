//! Skillboard
//!
//! The entry point for the skill dashboard CLI.
//! Handles argument parsing, config loading, and dispatching exactly
//! one action per invocation (default: draw the dashboard).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;

use skillboard::bulk::{self, ToolPaths};
use skillboard::config::{get_config_path, load_config, resolve_path, save_config, Config};
use skillboard::report::{self, markdown, status::aggregate, ReportFormat};
use skillboard::skills::registry::SkillRegistry;
use skillboard::ui::dashboard::Dashboard;

/// Skillboard -- Skill Inventory & Status Dashboard
#[derive(Parser, Debug)]
#[command(
    name = "skillboard",
    version,
    about = "Central dashboard for local skill directories",
    long_about = "Discovers skill directories across configured search paths, \
                  summarizes their freshness and quality, and delegates bulk \
                  maintenance to external tools."
)]
struct Cli {
    /// Add a search path for skills, then rescan
    #[arg(long, value_name = "PATH")]
    add_path: Option<String>,

    /// Rescan search paths and list discovered skills
    #[arg(long)]
    scan: bool,

    /// Show details for one skill
    #[arg(long, value_name = "NAME")]
    skill: Option<String>,

    /// Run the quality checker on all skills
    #[arg(long)]
    check_quality: bool,

    /// Check all skills for available updates
    #[arg(long)]
    check_updates: bool,

    /// Apply updates to all skills
    #[arg(long)]
    update_all: bool,

    /// Create metadata sidecars for skills that have none
    #[arg(long)]
    init_metadata: bool,

    /// Write a report to FILE
    #[arg(long, value_name = "FILE")]
    report: Option<String>,

    /// Report format: dashboard or markdown
    #[arg(long, value_name = "FORMAT", default_value = "markdown")]
    format: String,

    /// Path to the external quality checker
    #[arg(long, value_name = "PATH")]
    quality_checker: Option<String>,

    /// Path to the external updater
    #[arg(long, value_name = "PATH")]
    updater: Option<String>,

    /// Config file path (default: ~/.skillboard/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Simulate updates without making changes
    #[arg(long)]
    dry_run: bool,

    /// Run the interactive dashboard loop
    #[arg(long, short)]
    interactive: bool,
}

fn main() {
    // Keep stdout clean for the dashboard; only warnings surface.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .as_deref()
        .map(|p| PathBuf::from(resolve_path(p)))
        .unwrap_or_else(get_config_path);

    let mut config = load_config(&config_path).unwrap_or_default();
    let tools = ToolPaths::resolve(
        cli.quality_checker.as_deref(),
        cli.updater.as_deref(),
        &config,
    );

    let mut registry = SkillRegistry::new();
    registry.scan(&config);

    if let Some(path) = cli.add_path.as_deref() {
        add_path(&mut config, &config_path, path, &mut registry)
    } else if cli.scan {
        scan(&mut config, &config_path, &mut registry)
    } else if let Some(name) = cli.skill.as_deref() {
        Dashboard::show_details(&registry, name);
        Ok(())
    } else if cli.check_quality {
        let checker = tools.require_checker()?;
        if no_skills(&registry) {
            return Ok(());
        }
        let outcomes = bulk::check_quality_all(registry.all(), checker);
        bulk::print_summary(&outcomes);
        Ok(())
    } else if cli.check_updates {
        let updater = tools.require_updater()?;
        if no_skills(&registry) {
            return Ok(());
        }
        let outcomes = bulk::check_updates_all(registry.all(), updater);
        bulk::print_summary(&outcomes);
        Ok(())
    } else if cli.update_all {
        let updater = tools.require_updater()?;
        if no_skills(&registry) {
            return Ok(());
        }
        let outcomes = bulk::update_all(registry.all(), updater, cli.dry_run, Utc::now());
        bulk::print_summary(&outcomes);
        Ok(())
    } else if cli.init_metadata {
        if no_skills(&registry) {
            return Ok(());
        }
        let outcomes = bulk::init_metadata_all(registry.all(), Utc::now());
        if !outcomes.is_empty() {
            bulk::print_summary(&outcomes);
        }
        Ok(())
    } else if let Some(file) = cli.report.as_deref() {
        let format: ReportFormat = cli
            .format
            .parse()
            .context("Invalid --format")?;
        generate_report(&registry, file, format)
    } else if cli.interactive {
        Dashboard::new().run_interactive(&mut config, &config_path, &mut registry, &tools)
    } else {
        Dashboard::new().show(&registry);
        Ok(())
    }
}

/// Add a search path to the config and rescan.
fn add_path(
    config: &mut Config,
    config_path: &Path,
    path: &str,
    registry: &mut SkillRegistry,
) -> Result<()> {
    println!("\nAdding search path: {}", path);

    if !Path::new(&resolve_path(path)).exists() {
        bail!("path does not exist: {}", path);
    }

    if skillboard::config::add_search_path(config, path, config_path)? {
        println!("Search path added.");
    } else {
        println!("Search path already configured.");
    }

    scan(config, config_path, registry)
}

/// Rescan and list what was found.
fn scan(config: &mut Config, config_path: &Path, registry: &mut SkillRegistry) -> Result<()> {
    println!("\nScanning for skills...");
    registry.scan(config);

    config.last_scan = Some(Utc::now().to_rfc3339());
    save_config(config_path, config)?;

    println!("Found {} skill(s)", registry.len());
    for skill in registry.all() {
        println!("  {} ({})", skill.name, skill.path.display());
    }
    Ok(())
}

/// Render a report in the requested format and write it to `file`.
fn generate_report(registry: &SkillRegistry, file: &str, format: ReportFormat) -> Result<()> {
    let now = Utc::now();
    let snapshot = aggregate(registry.all(), now);
    let content = report::render(&snapshot, registry.all(), format, now);

    markdown::write_report(Path::new(file), &content)?;
    println!("Report saved to: {}", file);
    Ok(())
}

/// Print guidance and return `true` when no skills are configured.
fn no_skills(registry: &SkillRegistry) -> bool {
    if registry.is_empty() {
        println!("\nNo skills found. Add a search path with --add-path.");
        return true;
    }
    false
}

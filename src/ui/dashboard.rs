//! Interactive Dashboard
//!
//! Redraws the rendered dashboard between actions and drives the
//! quick-action menu. The only state carried across iterations is the
//! skill set (re-scanned after every mutating action) and a short
//! recent-activity log.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use dialoguer::Select;

use crate::bulk::{self, ToolPaths};
use crate::config::{add_search_path, Config};
use crate::report::render::{relative_age, render_dashboard, status_indicator};
use crate::report::status::{aggregate, classify, STALE_THRESHOLD_DAYS};
use crate::report::{markdown, ReportFormat};
use crate::skills::registry::SkillRegistry;
use crate::types::StatusLevel;
use crate::ui::prompts::{pause, prompt_required};

/// Default file name for reports generated from the menu.
const MENU_REPORT_FILE: &str = "skill_report.md";

/// Number of recent-activity entries kept on screen.
const ACTIVITY_LIMIT: usize = 5;

const MENU_ITEMS: &[&str] = &[
    "Check all for updates",
    "Run quality checks",
    "Update outdated skills",
    "Init metadata for all",
    "Generate report",
    "Show skill details",
    "Rescan for skills",
    "Add search path",
    "Exit",
];

#[derive(Default)]
pub struct Dashboard {
    activity: Vec<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard::default()
    }

    fn clear_screen() {
        print!("\x1B[2J\x1B[1;1H");
    }

    /// Draw the dashboard once.
    pub fn show(&self, registry: &SkillRegistry) {
        Self::clear_screen();

        let now = Utc::now();
        let snapshot = aggregate(registry.all(), now);
        println!("{}", render_dashboard(&snapshot, registry.all(), now));

        if !self.activity.is_empty() {
            println!("  Recent activity\n");
            for entry in self.activity.iter().rev().take(ACTIVITY_LIMIT).rev() {
                println!("    {}", entry.dimmed());
            }
            println!();
        }
    }

    fn add_activity(&mut self, entry: &str) {
        self.activity
            .push(format!("{} - {}", Utc::now().format("%H:%M"), entry));
    }

    /// Run the interactive menu loop until the user exits.
    pub fn run_interactive(
        &mut self,
        config: &mut Config,
        config_path: &Path,
        registry: &mut SkillRegistry,
        tools: &ToolPaths,
    ) -> Result<()> {
        loop {
            self.show(registry);

            let choice = Select::new()
                .with_prompt("  Choose action")
                .items(MENU_ITEMS)
                .default(0)
                .interact()?;

            match choice {
                0 => {
                    match tools.require_updater() {
                        Ok(updater) => {
                            let outcomes = bulk::check_updates_all(registry.all(), updater);
                            bulk::print_summary(&outcomes);
                            self.add_activity("Checked for updates");
                        }
                        Err(e) => println!("\n  {}", e.to_string().yellow()),
                    }
                    pause()?;
                }
                1 => {
                    match tools.require_checker() {
                        Ok(checker) => {
                            let outcomes = bulk::check_quality_all(registry.all(), checker);
                            bulk::print_summary(&outcomes);
                            registry.scan(config);
                            self.add_activity("Ran quality checks");
                        }
                        Err(e) => println!("\n  {}", e.to_string().yellow()),
                    }
                    pause()?;
                }
                2 => {
                    match tools.require_updater() {
                        Ok(updater) => {
                            let now = Utc::now();
                            let outdated = registry.outdated(now);
                            if outdated.is_empty() {
                                println!("\n  Nothing is outdated.");
                            } else {
                                let outcomes = bulk::update_all(&outdated, updater, false, now);
                                bulk::print_summary(&outcomes);
                                registry.scan(config);
                                self.add_activity("Updated outdated skills");
                            }
                        }
                        Err(e) => println!("\n  {}", e.to_string().yellow()),
                    }
                    pause()?;
                }
                3 => {
                    let outcomes = bulk::init_metadata_all(registry.all(), Utc::now());
                    if !outcomes.is_empty() {
                        bulk::print_summary(&outcomes);
                    }
                    registry.scan(config);
                    self.add_activity("Initialized metadata");
                    pause()?;
                }
                4 => {
                    let now = Utc::now();
                    let snapshot = aggregate(registry.all(), now);
                    let content = crate::report::render(
                        &snapshot,
                        registry.all(),
                        ReportFormat::Markdown,
                        now,
                    );
                    match markdown::write_report(Path::new(MENU_REPORT_FILE), &content) {
                        Ok(()) => {
                            println!("\n  Report saved to: {}", MENU_REPORT_FILE.green());
                            self.add_activity("Generated report");
                        }
                        Err(e) => println!("\n  {}", e.to_string().red()),
                    }
                    pause()?;
                }
                5 => {
                    let name = prompt_required("Skill name")?;
                    Self::show_details(registry, &name);
                    pause()?;
                }
                6 => {
                    registry.scan(config);
                    println!("\n  Found {} skill(s)", registry.len());
                    self.add_activity("Rescanned for skills");
                    pause()?;
                }
                7 => {
                    let path = prompt_required("Path to add")?;
                    if !Path::new(&path).exists() {
                        println!("\n  {}", format!("Path does not exist: {}", path).red());
                    } else {
                        if add_search_path(config, &path, config_path)? {
                            println!("\n  Search path added.");
                        } else {
                            println!("\n  Search path already configured.");
                        }
                        registry.scan(config);
                        self.add_activity(&format!("Added path: {}", path));
                    }
                    pause()?;
                }
                _ => {
                    println!("\n  Goodbye.");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Print the detail view for one skill.
    pub fn show_details(registry: &SkillRegistry, name: &str) {
        let record = match registry.get(name) {
            Some(r) => r,
            None => {
                println!("\n  {}", format!("Skill '{}' not found", name).red());
                return;
            }
        };

        let now = Utc::now();
        let status = classify(record, now);
        let banner = "=".repeat(70);

        println!("\n{}", banner);
        println!("  {}", format!("Skill: {}", record.name).cyan());
        println!("{}", banner);

        println!("\n  General");
        println!(
            "    Version:       {}",
            record
                .version()
                .map(|v| format!("v{}", v))
                .unwrap_or_else(|| "unknown".to_string())
        );
        println!("    Path:          {}", record.path.display());
        println!(
            "    Last updated:  {}",
            relative_age(record.age_days(now))
        );
        println!(
            "    Status:        {} {}",
            status_indicator(status),
            status
        );
        if status == StatusLevel::Stale {
            println!(
                "    {}",
                format!("warning: outdated (>{} days)", STALE_THRESHOLD_DAYS).yellow()
            );
        }

        println!("\n  Content");
        println!("    SKILL.md size:   {} bytes", record.skill_md_size);
        println!("    Reference docs:  {}", record.reference_count);

        println!("\n  Quality");
        match record.quality_score() {
            Some(score) => {
                let verdict = if score >= 9.0 {
                    "excellent"
                } else if score >= 7.0 {
                    "good"
                } else {
                    "needs improvement"
                };
                println!("    Score: {:.1}/10 - {}", score, verdict);
            }
            None => println!("    No score yet; run a quality check."),
        }

        println!(
            "\n  Metadata: {}",
            if record.has_metadata() {
                "present".green()
            } else {
                "missing".yellow()
            }
        );
        println!("{}", banner);
    }
}

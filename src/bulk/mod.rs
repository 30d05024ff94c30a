//! Bulk Operations
//!
//! Sequential maintenance passes over all discovered skills: quality
//! checks, update checks, update application, and metadata init. One
//! skill at a time, one subprocess per skill; a failure is reported and
//! the batch moves on.

pub mod external;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::config::{resolve_path, Config};
use crate::skills::metadata;
use crate::types::{BulkSummary, OpOutcome, SkillRecord};

// ─── Tool Paths ──────────────────────────────────────────────────

/// Resolved locations of the two external maintenance tools.
#[derive(Clone, Debug, Default)]
pub struct ToolPaths {
    pub quality_checker: Option<PathBuf>,
    pub updater: Option<PathBuf>,
}

impl ToolPaths {
    /// Combine command-line arguments with config defaults; the command
    /// line wins.
    pub fn resolve(
        cli_checker: Option<&str>,
        cli_updater: Option<&str>,
        config: &Config,
    ) -> Self {
        let pick = |cli: Option<&str>, stored: Option<&String>| {
            cli.map(str::to_string)
                .or_else(|| stored.cloned())
                .map(|p| PathBuf::from(resolve_path(&p)))
        };

        ToolPaths {
            quality_checker: pick(cli_checker, config.quality_checker.as_ref()),
            updater: pick(cli_updater, config.updater.as_ref()),
        }
    }

    pub fn require_checker(&self) -> Result<&Path> {
        match &self.quality_checker {
            Some(p) => Ok(p),
            None => bail!(
                "quality checker not configured; pass --quality-checker or set it in the config"
            ),
        }
    }

    pub fn require_updater(&self) -> Result<&Path> {
        match &self.updater {
            Some(p) => Ok(p),
            None => bail!("updater not configured; pass --updater or set it in the config"),
        }
    }
}

// ─── Operations ──────────────────────────────────────────────────

/// Run the quality checker on every skill.
///
/// A successful check merges the new score into the skill's sidecar
/// (creating one if the skill had none). Failures leave any prior score
/// untouched.
pub fn check_quality_all(skills: &[SkillRecord], checker: &Path) -> Vec<OpOutcome> {
    println!("\nRunning quality checks on {} skill(s)...\n", skills.len());

    let mut outcomes = Vec::with_capacity(skills.len());

    for (i, skill) in skills.iter().enumerate() {
        progress(i + 1, skills.len(), &skill.name);

        match external::run_quality_checker(checker, &skill.path) {
            Ok(score) => match store_score(skill, score) {
                Ok(()) => {
                    println!("{}", format!("score {:.1}/10", score).green());
                    outcomes.push(OpOutcome::ok(&skill.name));
                }
                Err(e) => {
                    println!("{}", "failed".red());
                    outcomes.push(OpOutcome::failed(&skill.name, e.to_string()));
                }
            },
            Err(e) => {
                println!("{}", "failed".red());
                outcomes.push(OpOutcome::failed(&skill.name, e.to_string()));
            }
        }
    }

    outcomes
}

fn store_score(skill: &SkillRecord, score: f64) -> Result<()> {
    let mut meta = metadata::load_metadata(&skill.path).unwrap_or_default();
    meta.quality_score = Some(score);
    metadata::save_metadata(&skill.path, &meta)
}

/// Ask the updater whether each skill has updates available.
///
/// Skills without metadata are skipped; there is nothing to compare
/// against.
pub fn check_updates_all(skills: &[SkillRecord], updater: &Path) -> Vec<OpOutcome> {
    println!("\nChecking updates for {} skill(s)...\n", skills.len());

    let mut outcomes = Vec::with_capacity(skills.len());
    let mut with_updates = 0usize;

    for (i, skill) in skills.iter().enumerate() {
        progress(i + 1, skills.len(), &skill.name);

        if !skill.has_metadata() {
            println!("{}", "skipped (no metadata)".yellow());
            outcomes.push(OpOutcome::skipped(&skill.name, "no metadata"));
            continue;
        }

        match external::check_for_updates(updater, &skill.path) {
            Ok(true) => {
                with_updates += 1;
                println!("{}", "updates available".yellow());
                let mut outcome = OpOutcome::ok(&skill.name);
                outcome.detail = Some("updates available".to_string());
                outcomes.push(outcome);
            }
            Ok(false) => {
                println!("{}", "up to date".green());
                outcomes.push(OpOutcome::ok(&skill.name));
            }
            Err(e) => {
                println!("{}", "failed".red());
                outcomes.push(OpOutcome::failed(&skill.name, e.to_string()));
            }
        }
    }

    println!("\n{} skill(s) have updates available", with_updates);
    outcomes
}

/// Apply updates to every skill that carries metadata.
///
/// On success the sidecar is stamped with `last_updated = now` and the
/// new version when the updater reports one. Dry runs touch nothing.
pub fn update_all(
    skills: &[SkillRecord],
    updater: &Path,
    dry_run: bool,
    now: DateTime<Utc>,
) -> Vec<OpOutcome> {
    println!("\nUpdating {} skill(s)...\n", skills.len());
    if dry_run {
        println!("{}\n", "(dry run - no changes will be made)".yellow());
    }

    let mut outcomes = Vec::with_capacity(skills.len());

    for (i, skill) in skills.iter().enumerate() {
        progress(i + 1, skills.len(), &skill.name);

        if !skill.has_metadata() {
            println!("{}", "skipped (no metadata)".yellow());
            outcomes.push(OpOutcome::skipped(&skill.name, "no metadata"));
            continue;
        }

        match external::run_updater(updater, &skill.path, dry_run) {
            Ok(result) => {
                let stamped = if dry_run {
                    Ok(())
                } else {
                    stamp_update(skill, result.new_version.as_deref(), now)
                };
                match stamped {
                    Ok(()) => {
                        println!("{}", "updated".green());
                        outcomes.push(OpOutcome::ok(&skill.name));
                    }
                    Err(e) => {
                        println!("{}", "failed".red());
                        outcomes.push(OpOutcome::failed(&skill.name, e.to_string()));
                    }
                }
            }
            Err(e) => {
                println!("{}", "failed".red());
                outcomes.push(OpOutcome::failed(&skill.name, e.to_string()));
            }
        }
    }

    outcomes
}

fn stamp_update(skill: &SkillRecord, new_version: Option<&str>, now: DateTime<Utc>) -> Result<()> {
    let mut meta = metadata::load_metadata(&skill.path).unwrap_or_default();
    meta.last_updated = Some(now.to_rfc3339());
    if let Some(version) = new_version {
        meta.version = Some(version.to_string());
    }
    metadata::save_metadata(&skill.path, &meta)
}

/// Create sidecars for every skill that has none. Purely local; no
/// external tool involved.
pub fn init_metadata_all(skills: &[SkillRecord], now: DateTime<Utc>) -> Vec<OpOutcome> {
    let missing: Vec<&SkillRecord> = skills.iter().filter(|s| !s.has_metadata()).collect();

    if missing.is_empty() {
        println!("\nAll skills already have metadata.");
        return Vec::new();
    }

    println!(
        "\nInitializing metadata for {} skill(s)...\n",
        missing.len()
    );

    let mut outcomes = Vec::with_capacity(missing.len());

    for (i, skill) in missing.iter().enumerate() {
        progress(i + 1, missing.len(), &skill.name);

        match metadata::init_metadata(&skill.path, now) {
            Ok(_) => {
                println!("{}", "ok".green());
                outcomes.push(OpOutcome::ok(&skill.name));
            }
            Err(e) => {
                println!("{}", "failed".red());
                outcomes.push(OpOutcome::failed(&skill.name, e.to_string()));
            }
        }
    }

    outcomes
}

// ─── Reporting ───────────────────────────────────────────────────

/// Print the closing tally and any per-skill failure details.
pub fn print_summary(outcomes: &[OpOutcome]) {
    let summary = BulkSummary::from_outcomes(outcomes);

    for outcome in outcomes.iter().filter(|o| !o.success && !o.skipped) {
        println!(
            "  {} {}: {}",
            "failure".red(),
            outcome.skill,
            outcome.detail.as_deref().unwrap_or("unknown error")
        );
    }

    println!("\n{}", summary);
}

fn progress(current: usize, total: usize, name: &str) {
    print!("  [{}/{}] {} ... ", current, total, name);
    let _ = io::stdout().flush();
}

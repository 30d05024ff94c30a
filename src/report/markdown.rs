//! Markdown Report
//!
//! Renders the snapshot and per-skill sections as a markdown document
//! and writes it to a file. Rendering itself has no side effects; the
//! final write is the only fallible step.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::report::render::relative_age;
use crate::report::status::classify;
use crate::types::{DashboardSnapshot, SkillRecord, StatusLevel};

/// Render the markdown report.
pub fn render_markdown(
    snapshot: &DashboardSnapshot,
    records: &[SkillRecord],
    now: DateTime<Utc>,
) -> String {
    let mut out = String::from("# Skill Report\n\n");
    out.push_str(&format!(
        "**Generated**: {}\n\n",
        now.format("%Y-%m-%d %H:%M")
    ));

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- Total skills: {}\n", snapshot.total_count));
    out.push_str(&format!("- With metadata: {}\n", snapshot.with_metadata_count));
    out.push_str(&format!(
        "- Without metadata: {}\n",
        snapshot.without_metadata_count
    ));
    let average = match snapshot.average_quality_score {
        Some(avg) => format!("{:.2}/10", avg),
        None => "N/A".to_string(),
    };
    out.push_str(&format!("- Average quality score: {}\n", average));
    out.push_str(&format!(
        "- Needing update: {}\n\n",
        snapshot.needing_update_count
    ));

    if records.is_empty() {
        out.push_str("No skills found.\n");
        return out;
    }

    out.push_str("## Skills\n\n");
    for record in records {
        out.push_str(&skill_section(record, now));
    }

    out
}

fn skill_section(record: &SkillRecord, now: DateTime<Utc>) -> String {
    let status = classify(record, now);

    let mut out = format!("### {}\n\n", record.name);
    out.push_str(&format!("- Status: {}\n", status));
    out.push_str(&format!(
        "- Version: {}\n",
        record
            .version()
            .map(|v| format!("v{}", v))
            .unwrap_or_else(|| "unknown".to_string())
    ));

    if let Some(score) = record.quality_score() {
        out.push_str(&format!("- Quality score: {:.1}/10\n", score));
    }

    out.push_str(&format!(
        "- Last updated: {}\n",
        record
            .last_updated_at()
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string())
    ));

    if matches!(status, StatusLevel::Stale | StatusLevel::NoData) {
        out.push_str(&format!(
            "- Recommendation: needs update ({})\n",
            relative_age(record.age_days(now))
        ));
    }

    out.push('\n');
    out
}

/// Write a rendered report to `path`.
///
/// A failed write is fatal for the report command only; nothing else in
/// the run depends on it.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

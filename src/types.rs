//! Skillboard - Type Definitions
//!
//! Shared types for skill records, metadata sidecars, dashboard
//! statistics, and bulk operation results.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Metadata Sidecar ────────────────────────────────────────────

/// File name of the metadata sidecar inside each skill directory.
pub const METADATA_FILENAME: &str = ".skill_metadata.json";

/// Payload of a skill's metadata sidecar.
///
/// All fields are optional: a sidecar may be written incrementally by
/// different tools (the updater stamps `version`/`last_updated`, the
/// quality checker contributes `quality_score`). Absent fields are kept
/// absent on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Quality score in `0.0..=10.0`, absent until a check has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    /// Timestamp of the last update, as an ISO-8601 string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Parse a sidecar timestamp leniently.
///
/// Sidecars are written by more than one tool; RFC 3339 is the preferred
/// form but naive ISO-8601 (no offset) also occurs and is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

// ─── Skill Records ───────────────────────────────────────────────

/// One discovered skill directory.
///
/// Records are rebuilt from scratch on every scan; there is no persistent
/// identity beyond the directory name.
#[derive(Clone, Debug)]
pub struct SkillRecord {
    pub name: String,
    pub path: PathBuf,
    /// Sidecar contents, `None` when the skill carries no metadata file
    /// (or the file was unreadable).
    pub metadata: Option<SkillMetadata>,
    /// Size of `SKILL.md` in bytes.
    pub skill_md_size: u64,
    /// Number of `.md` documents under `references/`.
    pub reference_count: usize,
}

impl SkillRecord {
    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn version(&self) -> Option<&str> {
        self.metadata.as_ref()?.version.as_deref()
    }

    pub fn quality_score(&self) -> Option<f64> {
        self.metadata.as_ref()?.quality_score
    }

    /// The parsed `last_updated` timestamp, if present and parseable.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.metadata.as_ref()?.last_updated.as_deref()?;
        parse_timestamp(raw)
    }

    /// Time elapsed since the last update, relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        Some(now.signed_duration_since(self.last_updated_at()?))
    }

    /// Whole days elapsed since the last update, relative to `now`.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        Some(self.age(now)?.num_days())
    }
}

// ─── Status Classification ───────────────────────────────────────

/// Freshness classification of a single skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Fresh,
    Aging,
    Stale,
    NoData,
}

impl StatusLevel {
    /// Lowercase label used in table rows and report sections.
    pub fn label(&self) -> &'static str {
        match self {
            StatusLevel::Fresh => "fresh",
            StatusLevel::Aging => "aging",
            StatusLevel::Stale => "stale",
            StatusLevel::NoData => "no data",
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Dashboard Statistics ────────────────────────────────────────

/// Aggregate statistics over a set of skill records at a point in time.
///
/// A derived, immutable view: building a snapshot never mutates the
/// records it summarizes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub total_count: usize,
    pub with_metadata_count: usize,
    pub without_metadata_count: usize,
    /// Mean over records that carry a score; `None` when no record does.
    pub average_quality_score: Option<f64>,
    /// Records classified [`StatusLevel::Stale`]. Skills without metadata
    /// are not counted here.
    pub needing_update_count: usize,
}

// ─── Report Formats ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Dashboard,
    Markdown,
}

#[derive(Debug, Error)]
#[error("unknown report format '{0}' (expected 'dashboard' or 'markdown')")]
pub struct ParseFormatError(String);

impl FromStr for ReportFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(ReportFormat::Dashboard),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}

// ─── Bulk Operations ─────────────────────────────────────────────

/// Per-skill result of one step in a bulk operation.
#[derive(Clone, Debug)]
pub struct OpOutcome {
    pub skill: String,
    pub success: bool,
    /// The step did not apply to this skill (e.g. no metadata yet).
    pub skipped: bool,
    pub detail: Option<String>,
}

impl OpOutcome {
    pub fn ok(skill: &str) -> Self {
        OpOutcome {
            skill: skill.to_string(),
            success: true,
            skipped: false,
            detail: None,
        }
    }

    pub fn failed(skill: &str, detail: impl Into<String>) -> Self {
        OpOutcome {
            skill: skill.to_string(),
            success: false,
            skipped: false,
            detail: Some(detail.into()),
        }
    }

    pub fn skipped(skill: &str, detail: impl Into<String>) -> Self {
        OpOutcome {
            skill: skill.to_string(),
            success: false,
            skipped: true,
            detail: Some(detail.into()),
        }
    }
}

/// Tally of a finished bulk operation. Failures never abort the batch,
/// so every skill lands in exactly one bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BulkSummary {
    pub fn from_outcomes(outcomes: &[OpOutcome]) -> Self {
        let mut summary = BulkSummary::default();
        for outcome in outcomes {
            if outcome.skipped {
                summary.skipped += 1;
            } else if outcome.success {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
        }
        summary
    }
}

impl fmt::Display for BulkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} succeeded, {} failed", self.succeeded, self.failed)?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let t = parse_timestamp("2026-08-01T12:00:00Z").unwrap();
        assert_eq!(t.to_rfc3339(), "2026-08-01T12:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_naive() {
        // Sidecars written by other tools omit the offset.
        assert!(parse_timestamp("2026-08-01T12:00:00").is_some());
        assert!(parse_timestamp("2026-08-01T12:00:00.123456").is_some());
        assert!(parse_timestamp("2026-08-01").is_some());
    }

    #[test]
    fn test_parse_timestamp_garbage() {
        assert!(parse_timestamp("last tuesday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("dashboard".parse::<ReportFormat>().unwrap(), ReportFormat::Dashboard);
        assert_eq!("Markdown".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("html".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_bulk_summary_counts() {
        let outcomes = vec![
            OpOutcome::ok("a"),
            OpOutcome::failed("b", "tool exited with status 1"),
            OpOutcome::skipped("c", "no metadata"),
            OpOutcome::ok("d"),
        ];
        let summary = BulkSummary::from_outcomes(&outcomes);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.to_string(), "2 succeeded, 1 failed, 1 skipped");
    }
}

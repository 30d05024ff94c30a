//! Report Module
//!
//! Status classification, aggregate statistics, and the two report
//! renderers (terminal dashboard and markdown file). Everything in here
//! is a pure function of the record set and an explicit `now`.

pub mod markdown;
pub mod render;
pub mod status;

use chrono::{DateTime, Utc};

pub use crate::types::ReportFormat;
use crate::types::{DashboardSnapshot, SkillRecord};

/// Render a snapshot and its records in the requested format.
pub fn render(
    snapshot: &DashboardSnapshot,
    records: &[SkillRecord],
    format: ReportFormat,
    now: DateTime<Utc>,
) -> String {
    match format {
        ReportFormat::Dashboard => render::render_dashboard(snapshot, records, now),
        ReportFormat::Markdown => markdown::render_markdown(snapshot, records, now),
    }
}

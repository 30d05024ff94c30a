//! Dashboard Renderer
//!
//! Fixed-width textual dashboard: banner, numbered skill rows, and the
//! statistics/insight blocks. Output is plain text and deterministic for
//! a given record set and `now`; the interactive UI adds color around it.

use chrono::{DateTime, Utc};

use crate::report::status::{classify, STALE_THRESHOLD_DAYS};
use crate::types::{DashboardSnapshot, SkillRecord, StatusLevel};

const BANNER_WIDTH: usize = 70;
const NAME_WIDTH: usize = 25;
const BAR_WIDTH: usize = 10;

/// Render the full dashboard view.
pub fn render_dashboard(
    snapshot: &DashboardSnapshot,
    records: &[SkillRecord],
    now: DateTime<Utc>,
) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    out.push_str(&banner);
    out.push_str("\n  SKILL DASHBOARD\n");
    out.push_str(&banner);
    out.push('\n');
    out.push_str(&format!(
        "  Generated: {}\n",
        now.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&banner);
    out.push('\n');

    if records.is_empty() {
        out.push_str("\n  No skills found.\n");
        out.push_str("  Add a search path with: skillboard --add-path /path/to/skills\n");
        return out;
    }

    out.push_str(&format!(
        "\n  Skills ({} total)\n\n",
        snapshot.total_count
    ));

    for (i, record) in records.iter().enumerate() {
        out.push_str(&skill_row(i + 1, record, now));
        out.push('\n');
    }

    out.push_str(&statistics_block(snapshot));
    out.push_str(&quality_distribution_block(records));
    out.push_str(&actions_block(snapshot, records));

    out
}

/// One numbered table row. The index is the 1-based display position.
fn skill_row(index: usize, record: &SkillRecord, now: DateTime<Utc>) -> String {
    let status = classify(record, now);

    let name: String = record.name.chars().take(NAME_WIDTH).collect();

    let version = match record.version() {
        Some(v) => format!("v{}", v),
        None => "-".to_string(),
    };

    let score = match record.quality_score() {
        Some(s) => format!("{:.1}/10", s),
        None => "no score".to_string(),
    };

    format!(
        "  {:>2}. {:<8} {:<25} {:<10} {:>8}  {}",
        index,
        status.label(),
        name,
        version,
        score,
        relative_age(record.age_days(now))
    )
}

/// Human-relative age of a skill's last update.
pub fn relative_age(age_days: Option<i64>) -> String {
    let days = match age_days {
        Some(d) => d,
        None => return "never".to_string(),
    };

    if days <= 0 {
        "today".to_string()
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        let weeks = days / 7;
        format!("{} week{} ago", weeks, plural(weeks as usize))
    } else {
        let months = days / 30;
        format!("{} month{} ago", months, plural(months as usize))
    }
}

fn statistics_block(snapshot: &DashboardSnapshot) -> String {
    let average = match snapshot.average_quality_score {
        Some(avg) => format!("{:.2}/10", avg),
        None => "N/A".to_string(),
    };

    format!(
        "\n  Statistics\n\n\
         \x20   Total skills:      {}\n\
         \x20   With metadata:     {}\n\
         \x20   Without metadata:  {}\n\
         \x20   Average quality:   {}\n\
         \x20   Needing update:    {}\n",
        snapshot.total_count,
        snapshot.with_metadata_count,
        snapshot.without_metadata_count,
        average,
        snapshot.needing_update_count,
    )
}

/// Quality distribution over the scored skills, as text progress bars.
fn quality_distribution_block(records: &[SkillRecord]) -> String {
    let scores: Vec<f64> = records.iter().filter_map(|r| r.quality_score()).collect();
    if scores.is_empty() {
        return String::new();
    }

    let excellent = scores.iter().filter(|&&s| s >= 9.0).count();
    let good = scores.iter().filter(|&&s| (7.0..9.0).contains(&s)).count();
    let needs_work = scores.iter().filter(|&&s| s < 7.0).count();

    let mut out = String::from("\n  Quality distribution\n\n");
    for (label, count) in [
        ("Excellent (9-10)", excellent),
        ("Good (7-9)      ", good),
        ("Needs work (<7) ", needs_work),
    ] {
        if count == 0 {
            continue;
        }
        out.push_str(&format!(
            "    {} {} {} skill{}\n",
            label,
            progress_bar(count, records.len()),
            count,
            plural(count)
        ));
    }

    out
}

/// Actionable insights: what is missing and which flag fixes it.
fn actions_block(snapshot: &DashboardSnapshot, records: &[SkillRecord]) -> String {
    let mut actions: Vec<String> = Vec::new();

    if snapshot.without_metadata_count > 0 {
        actions.push(format!(
            "{} skill{} missing metadata -> run --init-metadata",
            snapshot.without_metadata_count,
            plural(snapshot.without_metadata_count)
        ));
    }

    if snapshot.needing_update_count > 0 {
        actions.push(format!(
            "{} skill{} need update (>{} days) -> run --check-updates",
            snapshot.needing_update_count,
            plural(snapshot.needing_update_count),
            STALE_THRESHOLD_DAYS
        ));
    }

    let unscored = records.iter().filter(|r| r.quality_score().is_none()).count();
    if unscored > 0 {
        actions.push(format!(
            "{} skill{} never scored -> run --check-quality",
            unscored,
            plural(unscored)
        ));
    }

    if actions.is_empty() {
        return "\n  All good. No actions required.\n".to_string();
    }

    let mut out = String::from("\n  Action required\n\n");
    for action in actions {
        out.push_str(&format!("    {}\n", action));
    }
    out
}

fn progress_bar(value: usize, total: usize) -> String {
    if total == 0 {
        return format!("{} {:>3}%", "░".repeat(BAR_WIDTH), 0);
    }

    let filled = value * BAR_WIDTH / total;
    let percent = value * 100 / total;
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent
    )
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Fixed-width indicator shown in the interactive detail view.
pub fn status_indicator(status: StatusLevel) -> &'static str {
    match status {
        StatusLevel::Fresh => "[ok]",
        StatusLevel::Aging => "[..]",
        StatusLevel::Stale => "[!!]",
        StatusLevel::NoData => "[??]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use chrono::Duration;

    use crate::report::status::aggregate;
    use crate::types::SkillMetadata;

    fn now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    fn record(name: &str, metadata: Option<SkillMetadata>) -> SkillRecord {
        SkillRecord {
            name: name.to_string(),
            path: PathBuf::from(format!("/skills/{}", name)),
            metadata,
            skill_md_size: 2048,
            reference_count: 4,
        }
    }

    fn sample_records(now: DateTime<Utc>) -> Vec<SkillRecord> {
        vec![
            record(
                "django",
                Some(SkillMetadata {
                    version: Some("2.1.0".to_string()),
                    quality_score: Some(9.1),
                    last_updated: Some((now - Duration::days(7)).to_rfc3339()),
                }),
            ),
            record(
                "react",
                Some(SkillMetadata {
                    version: Some("1.1.0".to_string()),
                    quality_score: Some(8.5),
                    last_updated: Some((now - Duration::days(2)).to_rfc3339()),
                }),
            ),
            record(
                "vue",
                Some(SkillMetadata {
                    version: Some("1.0.0".to_string()),
                    quality_score: Some(7.2),
                    last_updated: Some((now - Duration::days(95)).to_rfc3339()),
                }),
            ),
        ]
    }

    #[test]
    fn test_render_is_deterministic() {
        let now = now();
        let records = sample_records(now);
        let snapshot = aggregate(&records, now);

        let first = render_dashboard(&snapshot, &records, now);
        let second = render_dashboard(&snapshot, &records, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_rows_numbered_in_input_order() {
        let now = now();
        let records = sample_records(now);
        let snapshot = aggregate(&records, now);
        let text = render_dashboard(&snapshot, &records, now);

        assert!(text.contains("1. aging    django"));
        assert!(text.contains("2. fresh    react"));
        assert!(text.contains("3. stale    vue"));
    }

    #[test]
    fn test_render_statistics_and_actions() {
        let now = now();
        let records = sample_records(now);
        let snapshot = aggregate(&records, now);
        let text = render_dashboard(&snapshot, &records, now);

        assert!(text.contains("Total skills:      3"));
        assert!(text.contains("Average quality:   8.27/10"));
        assert!(text.contains("Needing update:    1"));
        assert!(text.contains("1 skill need update (>30 days) -> run --check-updates"));
        assert!(!text.contains("--init-metadata"));
    }

    #[test]
    fn test_render_empty_set() {
        let now = now();
        let snapshot = aggregate(&[], now);
        let text = render_dashboard(&snapshot, &[], now);

        assert!(text.contains("No skills found."));
        assert!(text.contains("--add-path"));
        assert!(!text.contains("Statistics"));
    }

    #[test]
    fn test_render_placeholders_without_metadata() {
        let now = now();
        let records = vec![record("bare", None)];
        let snapshot = aggregate(&records, now);
        let text = render_dashboard(&snapshot, &records, now);

        assert!(text.contains("no data"));
        assert!(text.contains("no score"));
        assert!(text.contains("never"));
        assert!(text.contains("Average quality:   N/A"));
        assert!(text.contains("1 skill missing metadata -> run --init-metadata"));
    }

    #[test]
    fn test_relative_age() {
        assert_eq!(relative_age(None), "never");
        assert_eq!(relative_age(Some(0)), "today");
        assert_eq!(relative_age(Some(1)), "yesterday");
        assert_eq!(relative_age(Some(5)), "5 days ago");
        assert_eq!(relative_age(Some(13)), "1 week ago");
        assert_eq!(relative_age(Some(21)), "3 weeks ago");
        assert_eq!(relative_age(Some(95)), "3 months ago");
        // Timestamps slightly in the future read as today.
        assert_eq!(relative_age(Some(-1)), "today");
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0, 4), "░░░░░░░░░░   0%");
        assert_eq!(progress_bar(4, 4), "██████████ 100%");
        assert_eq!(progress_bar(1, 4), "██░░░░░░░░  25%");
    }
}

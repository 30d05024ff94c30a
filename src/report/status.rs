//! Status Classifier & Statistics Aggregator
//!
//! Classifies each skill by the age of its last update and derives the
//! dashboard statistics. Pure, total functions: missing fields degrade
//! to "no data", never an error.

use chrono::{DateTime, Duration, Utc};

use crate::types::{DashboardSnapshot, SkillRecord, StatusLevel};

/// A skill younger than this many days is fresh.
pub const FRESH_WINDOW_DAYS: i64 = 7;

/// A skill older than this many days is stale and needs an update.
pub const STALE_THRESHOLD_DAYS: i64 = 30;

/// Classify one skill at time `now`.
///
/// Boundaries are inclusive-aging: exactly 7 days old is aging, exactly
/// 30 days old is still aging, and anything past 30 days (by any margin,
/// down to a second) is stale. The comparison happens at full duration
/// precision, not on truncated day counts.
pub fn classify(record: &SkillRecord, now: DateTime<Utc>) -> StatusLevel {
    let age = match record.age(now) {
        Some(age) => age,
        None => return StatusLevel::NoData,
    };

    if age < Duration::days(FRESH_WINDOW_DAYS) {
        StatusLevel::Fresh
    } else if age <= Duration::days(STALE_THRESHOLD_DAYS) {
        StatusLevel::Aging
    } else {
        StatusLevel::Stale
    }
}

/// Aggregate statistics over a record set at time `now`.
///
/// The average quality score is the mean over exactly the records that
/// carry one, `None` when no record does. `needing_update_count` counts
/// stale skills only; skills without metadata have no age to judge and
/// are excluded.
pub fn aggregate(records: &[SkillRecord], now: DateTime<Utc>) -> DashboardSnapshot {
    let total_count = records.len();
    let with_metadata_count = records.iter().filter(|r| r.has_metadata()).count();

    let scores: Vec<f64> = records.iter().filter_map(|r| r.quality_score()).collect();
    let average_quality_score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    let needing_update_count = records
        .iter()
        .filter(|r| classify(r, now) == StatusLevel::Stale)
        .count();

    DashboardSnapshot {
        total_count,
        with_metadata_count,
        without_metadata_count: total_count - with_metadata_count,
        average_quality_score,
        needing_update_count,
    }
}

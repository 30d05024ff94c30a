//! Metadata Sidecar Store
//!
//! Reads and writes the `.skill_metadata.json` sidecar co-located with
//! each skill. Missing or malformed sidecars are never fatal; they
//! degrade the skill to "no data".

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::types::{SkillMetadata, METADATA_FILENAME};

/// Version stamped into a freshly initialized sidecar.
const INITIAL_VERSION: &str = "1.0.0";

/// Full path of a skill's sidecar file.
pub fn metadata_path(skill_path: &Path) -> PathBuf {
    skill_path.join(METADATA_FILENAME)
}

/// Load the sidecar for a skill, if one exists and parses.
pub fn load_metadata(skill_path: &Path) -> Option<SkillMetadata> {
    let path = metadata_path(skill_path);
    if !path.exists() {
        return None;
    }

    let contents = fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<SkillMetadata>(&contents) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            debug!("ignoring malformed sidecar {}: {}", path.display(), e);
            None
        }
    }
}

/// Write the sidecar for a skill.
pub fn save_metadata(skill_path: &Path, metadata: &SkillMetadata) -> Result<()> {
    let path = metadata_path(skill_path);
    let json =
        serde_json::to_string_pretty(metadata).context("Failed to serialize skill metadata")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write sidecar {}", path.display()))?;
    Ok(())
}

/// Create a fresh sidecar for a skill that has none.
///
/// Stamps an initial version and `last_updated = now`; no quality score
/// is recorded until a check has actually run.
pub fn init_metadata(skill_path: &Path, now: DateTime<Utc>) -> Result<SkillMetadata> {
    let metadata = SkillMetadata {
        version: Some(INITIAL_VERSION.to_string()),
        quality_score: None,
        last_updated: Some(now.to_rfc3339()),
    };
    save_metadata(skill_path, &metadata)?;
    Ok(metadata)
}

//! Skill Registry
//!
//! In-memory collection of discovered skills, rebuilt on every scan.
//! Holds the single documented display order (name ascending) and the
//! duplicate-name policy (last discovered wins).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::report::status::classify;
use crate::skills::{discovery, metadata};
use crate::types::{SkillRecord, StatusLevel};

#[derive(Debug, Default)]
pub struct SkillRegistry {
    skills: Vec<SkillRecord>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        SkillRegistry::default()
    }

    /// Re-discover all skills and reload their sidecars.
    ///
    /// When two search paths yield the same skill name, the later
    /// discovery replaces the earlier one. Records are kept sorted by
    /// name, which is the display order everywhere.
    pub fn scan(&mut self, config: &Config) {
        let mut by_name: BTreeMap<String, SkillRecord> = BTreeMap::new();

        for mut record in discovery::discover_all(&config.search_paths) {
            record.metadata = metadata::load_metadata(&record.path);

            if let Some(previous) = by_name.get(&record.name) {
                warn!(
                    "duplicate skill name '{}': {} replaces {}",
                    record.name,
                    record.path.display(),
                    previous.path.display()
                );
            }
            by_name.insert(record.name.clone(), record);
        }

        self.skills = by_name.into_values().collect();
        info!("scan complete: {} skill(s)", self.skills.len());
    }

    pub fn all(&self) -> &[SkillRecord] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SkillRecord> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// Skills classified stale at `now`. Skills without metadata are not
    /// included; they have no age to judge.
    pub fn outdated(&self, now: DateTime<Utc>) -> Vec<SkillRecord> {
        self.skills
            .iter()
            .filter(|s| classify(s, now) == StatusLevel::Stale)
            .cloned()
            .collect()
    }
}

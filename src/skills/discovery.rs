//! Skill Discovery
//!
//! Scans configured search paths for skill directories. A directory
//! counts as a skill when it contains a `SKILL.md` and a `references/`
//! subdirectory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::types::SkillRecord;

/// Returns `true` if `path` is a valid skill directory.
pub fn is_skill_dir(path: &Path) -> bool {
    path.join("SKILL.md").is_file() && path.join("references").is_dir()
}

/// Build a metadata-less [`SkillRecord`] for a skill directory.
///
/// The sidecar is attached later by the registry; discovery only collects
/// what the filesystem itself can tell us.
fn record_for(path: &Path) -> SkillRecord {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    let skill_md_size = fs::metadata(path.join("SKILL.md"))
        .map(|m| m.len())
        .unwrap_or(0);

    SkillRecord {
        name,
        path: path.to_path_buf(),
        metadata: None,
        skill_md_size,
        reference_count: count_reference_docs(&path.join("references")),
    }
}

/// Count `.md` documents directly under a `references/` directory.
fn count_reference_docs(dir: &Path) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return 0,
    };

    entries
        .flatten()
        .filter(|entry| {
            let path = entry.path();
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("md")
        })
        .count()
}

/// Scan one directory for skills.
///
/// If the directory itself is a skill, it is returned alone; otherwise
/// each immediate subdirectory is checked. Deeper nesting is not
/// descended into.
pub fn scan_directory(root: &Path) -> Vec<SkillRecord> {
    if !root.is_dir() {
        warn!("search path is not a directory: {}", root.display());
        return Vec::new();
    }

    if is_skill_dir(root) {
        return vec![record_for(root)];
    }

    let entries = match fs::read_dir(root) {
        Ok(e) => e,
        Err(e) => {
            warn!("cannot read search path {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut skills = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() && is_skill_dir(&path) {
            skills.push(record_for(&path));
        }
    }

    skills
}

/// Discover all skills across the configured search paths, in path order.
pub fn discover_all(search_paths: &[String]) -> Vec<SkillRecord> {
    let mut all = Vec::new();

    for raw in search_paths {
        let root = PathBuf::from(crate::config::resolve_path(raw));
        let found = scan_directory(&root);
        debug!("{}: {} skill(s)", root.display(), found.len());
        all.extend(found);
    }

    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_skill(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("references")).unwrap();
        fs::write(dir.join("SKILL.md"), "# Skill\n").unwrap();
        dir
    }

    #[test]
    fn test_is_skill_dir_requires_both_markers() {
        let tmp = tempfile::tempdir().unwrap();

        let full = make_skill(tmp.path(), "full");
        assert!(is_skill_dir(&full));

        let no_refs = tmp.path().join("no-refs");
        fs::create_dir_all(&no_refs).unwrap();
        fs::write(no_refs.join("SKILL.md"), "# Skill\n").unwrap();
        assert!(!is_skill_dir(&no_refs));

        let no_md = tmp.path().join("no-md");
        fs::create_dir_all(no_md.join("references")).unwrap();
        assert!(!is_skill_dir(&no_md));
    }

    #[test]
    fn test_scan_directory_descends_one_level() {
        let tmp = tempfile::tempdir().unwrap();
        make_skill(tmp.path(), "alpha");
        make_skill(tmp.path(), "beta");
        // A skill nested two levels down must not be picked up.
        make_skill(&tmp.path().join("deep"), "gamma");

        let mut names: Vec<String> = scan_directory(tmp.path())
            .into_iter()
            .map(|s| s.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_scan_directory_root_is_skill() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = make_skill(tmp.path(), "solo");
        // Siblings inside a skill directory are not scanned.
        make_skill(&dir, "inner");

        let skills = scan_directory(&dir);
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name, "solo");
    }

    #[test]
    fn test_scan_directory_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let skills = scan_directory(&tmp.path().join("nowhere"));
        assert!(skills.is_empty());
    }

    #[test]
    fn test_record_extras() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = make_skill(tmp.path(), "docs");
        fs::write(dir.join("references").join("api.md"), "api\n").unwrap();
        fs::write(dir.join("references").join("guide.md"), "guide\n").unwrap();
        fs::write(dir.join("references").join("notes.txt"), "notes\n").unwrap();

        let skills = scan_directory(&dir);
        assert_eq!(skills[0].reference_count, 2);
        assert!(skills[0].skill_md_size > 0);
        assert!(!skills[0].has_metadata());
    }
}

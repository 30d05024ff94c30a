//! External Tool Invocation
//!
//! Wraps the two maintenance executables (quality checker and updater)
//! as subprocesses. Both are opaque: the only contract is the argument
//! shape, the exit status, and a few stdout markers.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use regex::Regex;
use tracing::debug;

/// Stdout marker the updater prints when a newer upstream exists.
const UPDATES_AVAILABLE_MARKER: &str = "Updates available";

/// Result of a successful `--update` run.
#[derive(Clone, Debug, Default)]
pub struct UpdateResult {
    /// New version string, when the updater reports one.
    pub new_version: Option<String>,
}

/// Run the quality checker against one skill and return its score.
///
/// Invoked as `<checker> <skill_path> --skip-ai`. A non-zero exit or a
/// missing score line is an error; the caller leaves any prior score
/// untouched.
pub fn run_quality_checker(checker: &Path, skill_path: &Path) -> Result<f64> {
    let output = Command::new(checker)
        .arg(skill_path)
        .arg("--skip-ai")
        .output()
        .with_context(|| format!("Failed to execute {}", checker.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "quality checker exited with {}: {}",
            output.status,
            stderr.trim()
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_overall_score(&stdout) {
        Some(score) => Ok(score),
        None => bail!("quality checker produced no 'Overall Score' line"),
    }
}

/// Extract the score from a checker's `Overall Score: <n>/10` line.
pub fn parse_overall_score(stdout: &str) -> Option<f64> {
    let re = Regex::new(r"Overall Score:\s*([0-9]+(?:\.[0-9]+)?)\s*/\s*10").ok()?;
    let caps = re.captures(stdout)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Ask the updater whether a skill has updates available.
///
/// Invoked as `<updater> <skill_path> --check-updates`; the answer is the
/// presence of the `Updates available` marker on stdout.
pub fn check_for_updates(updater: &Path, skill_path: &Path) -> Result<bool> {
    let output = Command::new(updater)
        .arg(skill_path)
        .arg("--check-updates")
        .output()
        .with_context(|| format!("Failed to execute {}", updater.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("updater exited with {}: {}", output.status, stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.contains(UPDATES_AVAILABLE_MARKER))
}

/// Run the updater against one skill.
///
/// Invoked as `<updater> <skill_path> --update [--dry-run]`. On success
/// the stdout is scanned for a `New version: <v>` line so the caller can
/// stamp it into the sidecar.
pub fn run_updater(updater: &Path, skill_path: &Path, dry_run: bool) -> Result<UpdateResult> {
    let mut cmd = Command::new(updater);
    cmd.arg(skill_path).arg("--update");
    if dry_run {
        cmd.arg("--dry-run");
    }

    let output = cmd
        .output()
        .with_context(|| format!("Failed to execute {}", updater.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("updater exited with {}: {}", output.status, stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let new_version = parse_new_version(&stdout);
    debug!(
        "updated {}: new version {:?}",
        skill_path.display(),
        new_version
    );

    Ok(UpdateResult { new_version })
}

/// Extract the version from an updater's `New version: <v>` line.
pub fn parse_new_version(stdout: &str) -> Option<String> {
    stdout.lines().find_map(|line| {
        line.trim()
            .strip_prefix("New version:")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overall_score() {
        let stdout = "Checking skill...\nOverall Score: 8.5/10\nDone.\n";
        assert_eq!(parse_overall_score(stdout), Some(8.5));

        assert_eq!(parse_overall_score("Overall Score: 10/10"), Some(10.0));
        assert_eq!(parse_overall_score("Overall Score:7.25 / 10"), Some(7.25));
    }

    #[test]
    fn test_parse_overall_score_absent() {
        assert_eq!(parse_overall_score("no score here"), None);
        assert_eq!(parse_overall_score(""), None);
        assert_eq!(parse_overall_score("Overall Score: n/a"), None);
    }

    #[test]
    fn test_parse_new_version() {
        let stdout = "Fetching...\nNew version: 2.3.1\nDone.\n";
        assert_eq!(parse_new_version(stdout).as_deref(), Some("2.3.1"));
        assert_eq!(parse_new_version("Updated in place.\n"), None);
        assert_eq!(parse_new_version("New version:\n"), None);
    }
}

//! Skillboard Configuration
//!
//! Loads and saves the tool's configuration from `~/.skillboard/config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Config file name within the skillboard directory.
const CONFIG_FILENAME: &str = "config.json";

/// Returns the skillboard data directory: `~/.skillboard`.
pub fn get_skillboard_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/root"))
        .join(".skillboard")
}

/// Returns the full path to the default config file:
/// `~/.skillboard/config.json`.
pub fn get_config_path() -> PathBuf {
    get_skillboard_dir().join(CONFIG_FILENAME)
}

/// Persistent configuration, loaded once at process start.
///
/// Tool paths given on the command line take precedence over the values
/// stored here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directories scanned for skill directories.
    #[serde(default)]
    pub search_paths: Vec<String>,
    /// Default path to the external quality checker executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_checker: Option<String>,
    /// Default path to the external updater executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updater: Option<String>,
    /// RFC 3339 timestamp of the most recent scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scan: Option<String>,
}

/// Load the config from `path`.
///
/// Returns `None` if the file does not exist or cannot be parsed; callers
/// fall back to `Config::default()`.
pub fn load_config(path: &Path) -> Option<Config> {
    if !path.exists() {
        return None;
    }

    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Config>(&contents) {
        Ok(config) => Some(config),
        Err(e) => {
            debug!("ignoring unparseable config {}: {}", path.display(), e);
            None
        }
    }
}

/// Save the config to `path`, creating the parent directory if needed.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    Ok(())
}

/// Add a search path to the config and persist it.
///
/// Returns `true` if the path was added, `false` if it was already present.
pub fn add_search_path(config: &mut Config, path: &str, config_path: &Path) -> Result<bool> {
    if config.search_paths.iter().any(|p| p == path) {
        return Ok(false);
    }

    config.search_paths.push(path.to_string());
    save_config(config_path, config)?;
    Ok(true)
}

/// Resolve a path that may start with `~` to an absolute path.
///
/// If the path starts with `~`, the tilde is replaced with the user's home
/// directory. Otherwise the path is returned as-is.
pub fn resolve_path(p: &str) -> String {
    if let Some(rest) = p.strip_prefix('~') {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest).to_string_lossy().to_string()
    } else {
        p.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_with_tilde() {
        let resolved = resolve_path("~/some/path");
        assert!(!resolved.starts_with('~'));
        assert!(resolved.ends_with("some/path"));
    }

    #[test]
    fn test_resolve_path_without_tilde() {
        let path = "/absolute/path/to/file";
        assert_eq!(resolve_path(path), path);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("config.json")).is_none());
    }

    #[test]
    fn test_load_config_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_config(&path).is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            search_paths: vec!["/skills".to_string()],
            quality_checker: Some("/opt/bin/skill-quality-checker".to_string()),
            updater: None,
            last_scan: None,
        };
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.search_paths, vec!["/skills".to_string()]);
        assert_eq!(
            loaded.quality_checker.as_deref(),
            Some("/opt/bin/skill-quality-checker")
        );
        assert!(loaded.updater.is_none());
    }

    #[test]
    fn test_add_search_path_dedupes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();

        assert!(add_search_path(&mut config, "/skills", &path).unwrap());
        assert!(!add_search_path(&mut config, "/skills", &path).unwrap());
        assert_eq!(config.search_paths.len(), 1);

        // The first add persisted the config to disk.
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.search_paths, vec!["/skills".to_string()]);
    }
}

//! Config file discovery.
//!
//! Resolution order (first match wins):
//! 1. An explicit path (`--config`)
//! 2. `./warden.toml` (project-local)
//! 3. `~/.config/warden/config.toml` (XDG user config, or `WARDEN_CONFIG_DIR`)
//! 4. Built-in defaults
//!
//! Flags and environment variables are layered on top by the caller.

use std::path::{Path, PathBuf};

use crate::{LoadError, RawConfiguration, Result};

/// Default config filename for project-local config.
const PROJECT_CONFIG_FILE: &str = "warden.toml";

/// Default config filename within the user config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for XDG directory resolution.
const APP_NAME: &str = "warden";

/// Environment variable overriding the user config directory.
const CONFIG_DIR_ENV: &str = "WARDEN_CONFIG_DIR";

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The loaded raw configuration.
    pub config: RawConfiguration,
    /// File the configuration came from, or `None` for built-in defaults.
    pub source: Option<PathBuf>,
}

/// Discover and load the raw configuration.
///
/// An explicit path must exist. Discovered files are only read if present;
/// a present but unreadable or malformed file is an error rather than being
/// silently skipped.
pub fn load_config(explicit: Option<&Path>, project_dir: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        return Ok(LoadedConfig {
            config: load_config_file(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    let project_path = project_dir
        .map(|d| d.join(PROJECT_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));

    let candidates = std::iter::once(project_path).chain(xdg_config_path());
    for path in candidates {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config file");
            return Ok(LoadedConfig {
                config: load_config_file(&path)?,
                source: Some(path),
            });
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(LoadedConfig {
        config: RawConfiguration::default(),
        source: None,
    })
}

/// Load config from a specific file path (no discovery).
pub fn load_config_file(path: &Path) -> Result<RawConfiguration> {
    let contents = std::fs::read_to_string(path).map_err(|e| LoadError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    RawConfiguration::from_toml(&contents)
}

/// Get the user config file path for warden.
pub fn xdg_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// Get the user config directory for warden.
///
/// Checks `WARDEN_CONFIG_DIR` first, then falls back to the platform default.
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_xdg_config_path_shape() {
        if let Some(p) = xdg_config_path() {
            assert!(p.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
client_id = "abc"
upstreams = ["http://localhost:8080"]
"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.client_id, "abc");
        assert_eq!(config.upstreams, vec!["http://localhost:8080"]);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let err = load_config_file(Path::new("/nonexistent/warden.toml")).unwrap_err();
        assert!(matches!(err, LoadError::ReadFile { .. }));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not valid toml {{{{").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("warden.toml"), r#"client_id = "project""#).unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, r#"client_id = "explicit""#).unwrap();

        let loaded = load_config(Some(&explicit), Some(dir.path())).unwrap();
        assert_eq!(loaded.config.client_id, "explicit");
        assert_eq!(loaded.source.as_deref(), Some(explicit.as_path()));
    }

    #[test]
    fn test_explicit_path_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(load_config(Some(&missing), None).is_err());
    }

    #[test]
    fn test_project_config_discovered() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("warden.toml"),
            r#"
client_id = "project"
provider = "myusa"
"#,
        )
        .unwrap();

        let loaded = load_config(None, Some(dir.path())).unwrap();
        assert_eq!(loaded.config.client_id, "project");
        assert_eq!(loaded.config.provider, "myusa");
        assert!(loaded.source.unwrap().ends_with("warden.toml"));
    }

    #[test]
    fn test_malformed_project_config_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("warden.toml"), "upstreams = 1").unwrap();

        let err = load_config(None, Some(dir.path())).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}

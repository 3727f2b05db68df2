//! Configuration module for dirsearch
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "DIRSEARCH_SETTINGS_PATH";

/// Candidate settings files, most specific first
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var(SETTINGS_PATH_VAR) {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from("settings.yml"));
    paths.push(PathBuf::from("config/settings.yml"));
    paths.push(PathBuf::from("/etc/dirsearch/settings.yml"));
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("dirsearch/settings.yml"));
    }
    paths
}

/// Load settings, then apply env overrides.
///
/// An explicit path must exist; otherwise the first existing candidate
/// file is used, or defaults when there is none.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let found = match explicit {
        Some(path) if !path.exists() => bail!("settings file {} not found", path.display()),
        Some(path) => Some(path.to_path_buf()),
        None => candidate_paths().into_iter().find(|path| path.exists()),
    };

    let mut settings = match found {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env();
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/dirsearch.yml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

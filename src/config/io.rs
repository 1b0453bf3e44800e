use std::fs;
use std::path::Path;

use super::types::ViewConfig;
use crate::error::{Result, ScanlensError};

/// Reads and parses a config file.
///
/// # Errors
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<ViewConfig> {
    let content = fs::read_to_string(path).map_err(|source| ScanlensError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse(&content).map_err(|e| match e {
        ScanlensError::Config { message, .. } => ScanlensError::Config {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

/// Parses TOML config text.
///
/// # Errors
/// Returns error if the text is not a valid config.
pub fn parse(content: &str) -> Result<ViewConfig> {
    toml::from_str(content).map_err(|e| ScanlensError::Config {
        path: "<inline>".into(),
        message: e.to_string(),
    })
}

/// Loads `path` if it exists; a missing or broken file yields defaults.
#[must_use]
pub fn load_or_default(path: &Path) -> ViewConfig {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return ViewConfig::default();
    }
    match load_from_path(path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config file");
            ViewConfig::default()
        }
    }
}

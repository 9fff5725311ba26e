use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::AgentConfig;

/// Directory, relative to the working directory, that holds config files.
pub const CONFIG_DIR_NAME: &str = "config";

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to create config directory '{path}': {source}")]
    CreateDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize config for '{path}': {source}")]
    SerializeError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Returns `<base>/config`.
pub fn config_dir(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR_NAME)
}

/// Creates `<base>/config` (and any missing parents) and returns it.
pub fn ensure_config_dir(base: &Path) -> Result<PathBuf, ConfigError> {
    let dir = config_dir(base);
    fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDirError {
        path: dir.clone(),
        source: e,
    })?;
    Ok(dir)
}

impl AgentConfig {
    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns an empty config.
    /// - An empty or `null` document also yields an empty config.
    /// - Anything that is not a config mapping is a `ParseError`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, starting empty");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::parse(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!(
            path = %path.display(),
            endpoints = config.endpoints.as_ref().map_or(0, Vec::len),
            initialized = config.has_agent(),
            "loaded config"
        );
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value)
    }

    /// Writes the whole config to `path`, replacing any previous contents.
    ///
    /// The document goes to a sibling temp file first and is renamed over
    /// the target, so a failed write leaves the old file intact.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self).map_err(|e| ConfigError::SerializeError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let temp_path = path.with_extension("yml.tmp");
        let write_error = |e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        };

        fs::write(&temp_path, yaml.as_bytes()).map_err(write_error)?;

        // std::fs::rename doesn't replace existing files on Windows
        #[cfg(windows)]
        {
            if path.exists() {
                fs::remove_file(path).map_err(write_error)?;
            }
        }

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_error(e));
        }

        tracing::info!(path = %path.display(), bytes = yaml.len(), "saved config");
        Ok(())
    }
}

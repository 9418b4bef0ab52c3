//! Unified path management for gatehouse files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/gatehouse/         # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/gatehouse/    # Data directory (overridable)
//! ├── storage.toml             # Durable key-value store (session slot)
//! └── logs/                    # Application logs
//!     └── gatehouse.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "gatehouse";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
    /// Platform data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::DataDirNotFound => write!(f, "Cannot find data directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for gatehouse_core::GatehouseError {
    fn from(err: PathError) -> Self {
        Self::config(err.to_string())
    }
}

/// Resolves where gatehouse keeps its files.
///
/// The data directory can be overridden (CLI flag, config file, tests);
/// otherwise the platform directories from `dirs` are used.
#[derive(Debug, Clone, Default)]
pub struct GatehousePaths {
    data_dir_override: Option<PathBuf>,
}

impl GatehousePaths {
    pub fn new(data_dir_override: Option<PathBuf>) -> Self {
        Self { data_dir_override }
    }

    /// Returns the gatehouse configuration directory (e.g. `~/.config/gatehouse/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the data directory, honoring the override.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::DataDirNotFound)
    }

    /// Returns the durable key-value store file.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("storage.toml"))
    }

    /// Returns the log directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_drives_data_paths() {
        let paths = GatehousePaths::new(Some(PathBuf::from("/tmp/gh-data")));
        assert_eq!(paths.data_dir().unwrap(), PathBuf::from("/tmp/gh-data"));
        assert_eq!(
            paths.storage_file().unwrap(),
            PathBuf::from("/tmp/gh-data/storage.toml")
        );
        assert_eq!(paths.logs_dir().unwrap(), PathBuf::from("/tmp/gh-data/logs"));
    }

    #[test]
    fn test_config_file_name() {
        if let Ok(path) = GatehousePaths::config_file() {
            assert!(path.ends_with("gatehouse/config.toml"));
        }
    }
}

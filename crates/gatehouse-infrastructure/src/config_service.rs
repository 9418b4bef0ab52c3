//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` (by default
//! `~/.config/gatehouse/config.toml`) and caches it.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use gatehouse_core::GatehouseError;
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::Result;

use crate::paths::GatehousePaths;
use crate::storage::AtomicTomlFile;

/// Configuration service that loads and caches the application configuration.
///
/// A missing file yields [`AppConfig::default`]; a file that fails to parse
/// is reported as an error rather than silently replaced.
#[derive(Clone)]
pub struct ConfigService {
    file: AtomicTomlFile<AppConfig>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(GatehousePaths::config_file()?))
    }

    /// Creates a service reading `path`.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self.config.read().map_err(poisoned)?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = match self.file.load()? {
            Some(config) => config,
            None => {
                tracing::debug!(path = %self.file.path().display(), "No config file, using defaults");
                AppConfig::default()
            }
        };

        let mut write_lock = self.config.write().map_err(poisoned)?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }
}

fn poisoned<E>(_: E) -> GatehouseError {
    GatehouseError::internal("config cache lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(service.get_config().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_reads_overrides_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\nsimulated_latency_ms = 10\n").unwrap();

        let config = ConfigService::with_path(path).get_config().unwrap();
        assert_eq!(config.auth.simulated_latency_ms, 10);
        assert_eq!(config.auth.min_password_len, 6);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[auth\n").unwrap();

        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_config_is_cached_after_first_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        assert_eq!(service.get_config().unwrap().ui.redirect_delay_ms, 1500);

        std::fs::write(&path, "[ui]\nredirect_delay_ms = 0\n").unwrap();
        assert_eq!(service.get_config().unwrap().ui.redirect_delay_ms, 1500);

        // Clones share the cache.
        assert_eq!(service.clone().get_config().unwrap().ui.redirect_delay_ms, 1500);
        assert_eq!(
            ConfigService::with_path(path).get_config().unwrap().ui.redirect_delay_ms,
            0
        );
    }
}

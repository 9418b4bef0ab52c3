//! Application configuration model.
//!
//! Every section and field has a default, so an empty (or missing)
//! `config.toml` yields the stock demo behavior.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::SESSION_SLOT_KEY;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub auth: AuthSettings,
    pub storage: StorageSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Parses a TOML document. Missing sections and fields fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Simulated login settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AuthSettings {
    /// Artificial delay standing in for a network round trip.
    pub simulated_latency_ms: u64,
    /// Minimum accepted password length, in characters.
    pub min_password_len: usize,
}

impl AuthSettings {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 1000,
            min_password_len: 6,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSettings {
    /// Key of the durable session slot.
    pub session_key: String,
    /// Overrides the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            session_key: SESSION_SLOT_KEY.to_string(),
            data_dir: None,
        }
    }
}

/// Timings used by the page controller.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UiSettings {
    pub redirect_delay_ms: u64,
    pub signup_close_delay_ms: u64,
    pub message_auto_hide_ms: u64,
}

impl UiSettings {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn signup_close_delay(&self) -> Duration {
        Duration::from_millis(self.signup_close_delay_ms)
    }

    pub fn message_auto_hide(&self) -> Duration {
        Duration::from_millis(self.message_auto_hide_ms)
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 1500,
            signup_close_delay_ms: 2000,
            message_auto_hide_ms: 5000,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Also write a daily-rolling log file under `<data_dir>/logs`.
    pub log_to_file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            log_to_file: false,
        }
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Client settings, loaded from `config.toml`.
///
/// Every field has a default so the client runs without a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds before a copied value is wiped from the clipboard.
    #[serde(default = "default_clipboard_timeout_secs")]
    pub clipboard_timeout_secs: u64,

    /// Seconds a status message stays visible.
    #[serde(default = "default_message_timeout_secs")]
    pub message_timeout_secs: u64,

    /// Idle seconds before the view locks itself; 0 disables.
    #[serde(default = "default_auto_lock_secs")]
    pub auto_lock_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_clipboard_timeout_secs() -> u64 {
    15
}

fn default_message_timeout_secs() -> u64 {
    5
}

fn default_auto_lock_secs() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            clipboard_timeout_secs: default_clipboard_timeout_secs(),
            message_timeout_secs: default_message_timeout_secs(),
            auto_lock_secs: default_auto_lock_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load settings from `path`, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultinator")
            .join("config.toml")
    }

    pub fn default_log_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultinator")
            .join("vaultinator.log")
    }

    pub fn clipboard_timeout(&self) -> Duration {
        Duration::from_secs(self.clipboard_timeout_secs)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }

    pub fn auto_lock_timeout(&self) -> Duration {
        Duration::from_secs(self.auto_lock_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteRecord(String),
    LockVault,
}

impl PendingAction {
    pub fn confirm_message(&self) -> &'static str {
        match self {
            Self::DeleteRecord(_) => "Delete this password?",
            Self::LockVault => "Lock the vault?",
        }
    }
}

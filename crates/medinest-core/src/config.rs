//! Portal configuration models.
//!
//! Loaded from `config.toml` by the infrastructure crate's `ConfigService`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::session::{DEFAULT_NAMESPACE, StorageKeys};

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LogSettings,
}

/// Where and under which namespace the session is persisted.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    /// Prefix of the three session keys (`<namespace>_auth`, ...).
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Name of the storage file inside the storage directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl StorageSettings {
    pub fn keys(&self) -> StorageKeys {
        StorageKeys::with_namespace(&self.namespace)
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            file_name: default_file_name(),
            directory: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_file_name() -> String {
    "local_storage.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

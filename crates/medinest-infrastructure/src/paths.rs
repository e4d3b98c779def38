//! Unified path management for MediNest files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/medinest/            # Config directory
//! └── config.toml                # Portal configuration
//!
//! ~/.local/share/medinest/       # Data directory
//! └── local_storage.json         # Durable session keys
//! ```

use std::path::PathBuf;

use medinest_core::MedinestError;

const APP_DIR: &str = "medinest";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config/data directory could not be determined.
    BaseDirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::BaseDirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for MedinestError {
    fn from(e: PathError) -> Self {
        MedinestError::config(e.to_string())
    }
}

/// Resolves MediNest directories, optionally under an explicit base.
///
/// With a base directory (tests, `--storage-dir`), config and data both live
/// directly under it. Without one, the platform directories from `dirs` are
/// used.
#[derive(Debug, Clone, Default)]
pub struct MedinestPaths {
    base_dir: Option<PathBuf>,
}

impl MedinestPaths {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the configuration directory (e.g., `~/.config/medinest/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::BaseDirNotFound("config"))
    }

    /// Returns the data directory (e.g., `~/.local/share/medinest/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::BaseDirNotFound("data"))
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path of the durable key-value file named `file_name`.
    pub fn storage_file(&self, file_name: &str) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join(file_name))
    }
}

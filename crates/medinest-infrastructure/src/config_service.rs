//! Configuration service implementation.
//!
//! Loads the portal configuration from `config.toml`, writing the defaults
//! back when the file does not exist yet.

use std::path::PathBuf;

use medinest_core::config::PortalConfig;
use medinest_core::error::{MedinestError, Result};
use tracing::{debug, info};

use crate::paths::MedinestPaths;
use crate::storage::{AtomicFile, FileKeyValueStorage};

/// Configuration service that loads and caches the portal configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: MedinestPaths,
    config: PortalConfig,
}

impl ConfigService {
    /// Loads `config.toml` under `paths`.
    ///
    /// A missing file yields the defaults, which are saved for the user to
    /// edit. A file that cannot be parsed is a configuration error.
    pub fn load(paths: MedinestPaths) -> Result<Self> {
        let config_path = paths.config_file()?;
        let file = AtomicFile::<PortalConfig>::toml(config_path.clone());

        let config = match file.load() {
            Ok(Some(config)) => {
                debug!(path = %config_path.display(), "Loaded config");
                config
            }
            Ok(None) => {
                let config = PortalConfig::default();
                file.save(&config).map_err(MedinestError::from)?;
                info!(path = %config_path.display(), "Created default config");
                config
            }
            Err(e) => {
                return Err(MedinestError::config(format!(
                    "Failed to read {}: {}",
                    config_path.display(),
                    e
                )));
            }
        };

        Ok(Self { paths, config })
    }

    /// Defaults only; nothing is read from or written to disk.
    pub fn in_memory(paths: MedinestPaths) -> Self {
        Self {
            paths,
            config: PortalConfig::default(),
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Path of the durable key-value file, honouring `storage.directory`.
    pub fn storage_path(&self) -> Result<PathBuf> {
        let settings = &self.config.storage;
        match &settings.directory {
            Some(dir) => Ok(dir.join(&settings.file_name)),
            None => Ok(self.paths.storage_file(&settings.file_name)?),
        }
    }

    /// Opens the configured file-backed storage.
    pub fn open_storage(&self) -> Result<FileKeyValueStorage> {
        Ok(FileKeyValueStorage::new(self.storage_path()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MedinestPaths::new(Some(temp_dir.path().to_path_buf()));

        let service = ConfigService::load(paths).unwrap();
        assert_eq!(service.config(), &PortalConfig::default());
        assert!(temp_dir.path().join("config.toml").exists());
        assert_eq!(
            service.storage_path().unwrap(),
            temp_dir.path().join("local_storage.json")
        );
    }

    #[test]
    fn test_existing_config_is_read() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "[storage]\nnamespace = \"clinic\"\nfile_name = \"kv.json\"\n",
        )
        .unwrap();

        let service =
            ConfigService::load(MedinestPaths::new(Some(temp_dir.path().to_path_buf()))).unwrap();
        assert_eq!(service.config().storage.namespace, "clinic");
        assert_eq!(
            service.storage_path().unwrap(),
            temp_dir.path().join("kv.json")
        );
    }

    #[test]
    fn test_storage_directory_override() {
        let temp_dir = TempDir::new().unwrap();
        let elsewhere = temp_dir.path().join("elsewhere");
        std::fs::write(
            temp_dir.path().join("config.toml"),
            format!("[storage]\ndirectory = {:?}\n", elsewhere.display().to_string()),
        )
        .unwrap();

        let service =
            ConfigService::load(MedinestPaths::new(Some(temp_dir.path().to_path_buf()))).unwrap();
        assert_eq!(
            service.storage_path().unwrap(),
            elsewhere.join("local_storage.json")
        );
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "[storage\n").unwrap();

        let result = ConfigService::load(MedinestPaths::new(Some(temp_dir.path().to_path_buf())));
        assert!(matches!(result, Err(MedinestError::Config(_))));
    }
}

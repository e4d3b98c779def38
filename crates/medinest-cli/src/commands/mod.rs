pub mod session;
pub mod shell;
pub mod status;
pub mod utils;
pub mod views;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use medinest_application::PortalApp;
use medinest_core::storage::{KeyValueStorage, MemoryStorage};
use medinest_infrastructure::logging::{init_tracing, level_for_verbosity};
use medinest_infrastructure::{ConfigService, MedinestPaths};

/// Storage backend chosen at startup: file-backed or in-memory.
pub type DynStorage = Box<dyn KeyValueStorage>;

pub type Portal = PortalApp<DynStorage>;

/// Resolved configuration shared by every subcommand.
pub struct Context {
    config: ConfigService,
    ephemeral: bool,
}

impl Context {
    pub fn new(storage_dir: Option<PathBuf>, ephemeral: bool, verbose: u8) -> Result<Self> {
        let paths = MedinestPaths::new(storage_dir);
        let config = if ephemeral {
            ConfigService::in_memory(paths)
        } else {
            ConfigService::load(paths).context("Failed to load configuration")?
        };

        let level = level_for_verbosity(&config.config().logging, verbose);
        init_tracing(&level)?;

        Ok(Self { config, ephemeral })
    }

    /// Starts a portal over the configured storage.
    pub fn open_portal(&self) -> Result<Portal> {
        let storage: DynStorage = if self.ephemeral {
            Box::new(MemoryStorage::new())
        } else {
            let storage = self
                .config
                .open_storage()
                .context("Failed to open session storage")?;
            tracing::debug!(path = %storage.path().display(), "Using file storage");
            Box::new(storage)
        };

        Ok(PortalApp::start_with_keys(
            storage,
            self.config.config().storage.keys(),
        ))
    }
}

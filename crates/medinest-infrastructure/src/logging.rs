//! Tracing subscriber setup for MediNest binaries.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! job of whichever binary hosts the portal core.

use medinest_core::config::LogSettings;
use medinest_core::error::{MedinestError, Result};
use tracing_subscriber::EnvFilter;

/// Maps `-v` repetitions onto a filter directive, falling back to the
/// configured level when no flag is given.
pub fn level_for_verbosity(settings: &LogSettings, verbosity: u8) -> String {
    match verbosity {
        0 => settings.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Builds the filter: `RUST_LOG` if set, otherwise `default_directive`.
pub fn env_filter(default_directive: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive).map_err(|e| {
            MedinestError::config(format!(
                "Invalid log level '{}': {}",
                default_directive, e
            ))
        }),
    }
}

/// Installs a global fmt subscriber writing to stderr.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = env_filter(default_directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| MedinestError::internal(format!("Failed to install tracing subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        let settings = LogSettings {
            level: "warn".to_string(),
        };
        assert_eq!(level_for_verbosity(&settings, 0), "warn");
        assert_eq!(level_for_verbosity(&settings, 1), "debug");
        assert_eq!(level_for_verbosity(&settings, 4), "trace");
    }

    #[test]
    fn test_invalid_directive_is_config_error() {
        // Only meaningful when RUST_LOG does not override the directive.
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(matches!(
                env_filter("medinest=verbose"),
                Err(MedinestError::Config(_))
            ));
        }
    }
}

//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use lesson_core::config::ConfigError;

/// Errors emitted while loading a lesson configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

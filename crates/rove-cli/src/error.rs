//! Error handling for the rove CLI.
//!
//! `CliError` wraps the library errors via `#[from]` so commands can use `?`
//! throughout. It is converted to a miette report once, in `main`.

mod miette;

use std::path::PathBuf;

use rove_config::ConfigError;
use rove_graph::{BuildError, ModuleError};
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Module collection failed
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The entrypoint could not be read
    #[error(transparent)]
    Module(#[from] ModuleError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing the manifest failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_from_config_error() {
        let err: CliError = ConfigError::NoEntrypoint.into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error: no entrypoint"));
    }

    #[test]
    fn test_module_error_is_transparent() {
        let err: CliError = ModuleError::string_script_import("<script:0>", "./a.mjs").into();
        assert!(err.to_string().starts_with("Unable to resolve \"<script:0>\""));
    }
}

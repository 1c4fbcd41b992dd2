//! Error types for configuration loading and validation.

use std::path::PathBuf;

use rove_graph::{ContentKind, RuleError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Config parsing/loading errors
    #[error("no rove.toml or package.json \"rove\" field found in {}", root.display())]
    NotFound { root: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    // Schema validation errors (no filesystem checks)
    #[error("no entrypoint: set `main` or declare `modules`")]
    NoEntrypoint,

    #[error("{kind} rule must list at least one glob")]
    EmptyRule { kind: ContentKind },

    #[error(transparent)]
    InvalidRule(#[from] RuleError),

    #[error("external specifiers cannot be empty")]
    EmptyExternal,

    // Filesystem validation errors (for CLI use)
    #[error("entrypoint not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    #[error("module path not found: {}", .0.display())]
    ModuleNotFound(PathBuf),
}

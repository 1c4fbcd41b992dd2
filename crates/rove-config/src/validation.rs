//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for
//! library use).

use std::path::{Path, PathBuf};

use rove_graph::compile_module_rules;

use crate::config::RoveConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &RoveConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use rove_config::{ConfigValidator, RoveConfig, SchemaValidator};
///
/// let config = RoveConfig {
///     main: Some("index.mjs".into()),
///     ..RoveConfig::default()
/// };
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &RoveConfig) -> Result<()> {
        if config.main.is_none() && config.modules.is_empty() {
            return Err(ConfigError::NoEntrypoint);
        }

        if config.external.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyExternal);
        }

        if let Some(rule) = config.rules.iter().find(|rule| rule.include.is_empty()) {
            return Err(ConfigError::EmptyRule { kind: rule.kind });
        }

        // Same compilation the walker performs, so bad globs fail here first.
        compile_module_rules(&config.rules)?;

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs [`SchemaValidator`], then checks that the entrypoint and every
/// module without inline contents exist on disk.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator; relative paths are joined onto `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &RoveConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        if let Some(main) = &config.main {
            let path = self.root.join(main);
            if !path.is_file() {
                return Err(ConfigError::EntryNotFound(path));
            }
        }

        for module in config.modules.iter().filter(|m| m.contents.is_none()) {
            let path = self.root.join(&module.path);
            if !path.is_file() {
                return Err(ConfigError::ModuleNotFound(path));
            }
        }

        Ok(())
    }
}

/// Validate without touching the filesystem.
pub fn validate_schema(config: &RoveConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Validate schema and filesystem references relative to `root`.
pub fn validate_fs(config: &RoveConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

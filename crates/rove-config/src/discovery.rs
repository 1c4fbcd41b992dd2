//! File-based config discovery for CLI use
//!
//! Handles finding and loading rove configuration files from the filesystem.

// Configuration is read before any module Runtime exists.
#![allow(clippy::disallowed_methods)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::config::RoveConfig;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "rove.toml";
pub const PACKAGE_JSON: &str = "package.json";
pub const PACKAGE_FIELD: &str = "rove";

/// File-based configuration discovery
///
/// Searches for rove configuration files in conventional locations and loads
/// them. Relative paths in a loaded configuration are resolved against the
/// directory of the file they came from.
///
/// # Example
///
/// ```no_run
/// use rove_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: rove.toml
    /// 2. package.json (rove field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_FIELD).is_some_and(|field| !field.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<RoveConfig> {
        let path = self.find().ok_or_else(|| ConfigError::NotFound {
            root: self.root.clone(),
        })?;
        load_from(&path)
    }
}

/// Load config from a specific file, resolving its paths.
pub fn load_from(path: &Path) -> Result<RoveConfig> {
    debug!(path = %path.display(), "loading config");
    let value = read_value(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(RoveConfig::from_value(value)?.resolve_paths(base))
}

/// Raw configuration document of `path`, as JSON.
///
/// For `package.json` this is the `rove` field; any other file is parsed as
/// TOML.
pub fn read_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if path.file_name() == Some(std::ffi::OsStr::new(PACKAGE_JSON)) {
        return package_field(&content);
    }

    let toml_val: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: format!("Invalid TOML syntax: {}", e),
    })?;

    serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: format!("TOML to JSON conversion failed: {}", e),
    })
}

fn package_field(content: &str) -> Result<Value> {
    let mut parsed: Value = serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: PACKAGE_JSON.to_string(),
        hint: format!("Invalid JSON: {}", e),
    })?;

    match parsed.get_mut(PACKAGE_FIELD).map(Value::take) {
        Some(Value::Null) => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: "The 'rove' field cannot be null".to_string(),
        }),
        Some(value) => Ok(value),
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: "Add a 'rove' field to your package.json".to_string(),
        }),
    }
}

/// Discover and load config from the current directory (convenience function)
pub fn discover() -> Result<RoveConfig> {
    let root = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    ConfigDiscovery::new(&root).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rove_graph::NodeCompatMode;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn find_prefers_toml_over_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "main = \"index.mjs\"").unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{ "rove": { "main": "other.mjs" } }"#,
        )
        .unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.find().unwrap(), dir.path().join(CONFIG_FILE));
    }

    #[test]
    fn find_skips_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), r#"{ "name": "worker" }"#).unwrap();

        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound { .. }));
    }

    #[test]
    fn load_parses_toml_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
main = "src/index.mjs"
node_compat = "v1"

[[rules]]
type = "Data"
globs = ["**/*.bin"]
"#,
        )
        .unwrap();

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.main, Some(dir.path().join("src/index.mjs")));
        assert_eq!(config.root, Some(dir.path().to_path_buf()));
        assert_eq!(config.node_compat, NodeCompatMode::V1);
        assert_eq!(config.rules.len(), 1);
    }

    #[test]
    fn load_from_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{
                "name": "worker",
                "rove": {
                    "main": "index.mjs",
                    "external": ["__STATIC_CONTENT_MANIFEST"]
                }
            }"#,
        )
        .unwrap();

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.main, Some(dir.path().join("index.mjs")));
        assert_eq!(config.external, vec!["__STATIC_CONTENT_MANIFEST".to_string()]);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "main = ").unwrap();

        let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "toml"));
    }
}

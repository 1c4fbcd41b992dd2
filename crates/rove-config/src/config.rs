//! Configuration model for rove.
//!
//! This module provides the `RoveConfig` struct and path resolution.
//! For file discovery, see the `discovery` module.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rove_graph::{ModuleDefinition, ModuleRule, NodeCompatMode, WalkOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoveConfig {
    /// Entrypoint, walked for imports. Optional when `modules` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<PathBuf>,

    /// Directory module names are relative to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub node_compat: NodeCompatMode,

    /// Specifiers resolved by the runtime rather than from disk.
    #[serde(default)]
    pub external: Vec<String>,

    #[serde(default)]
    pub rules: Vec<ModuleRule>,

    /// Manually declared modules. When present, no traversal happens.
    #[serde(default)]
    pub modules: Vec<ModuleDefinition>,
}

impl RoveConfig {
    /// Create from serde_json::Value (for configs embedded in other documents)
    ///
    /// # Example
    ///
    /// ```
    /// use rove_config::RoveConfig;
    /// use rove_graph::NodeCompatMode;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "main": "src/index.mjs",
    ///     "node_compat": "v2"
    /// });
    ///
    /// let config = RoveConfig::from_value(value).unwrap();
    /// assert_eq!(config.node_compat, NodeCompatMode::V2);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: e.to_string(),
        })
    }

    /// Make every path absolute against `base`.
    ///
    /// `root` defaults to `base` itself, so names stay relative to the
    /// directory the configuration lives in.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.main = self.main.map(|main| base.join(main).clean());
        self.root = Some(match self.root {
            Some(root) => base.join(root).clean(),
            None => base.clean(),
        });
        for module in &mut self.modules {
            module.path = base.join(&module.path).clean();
        }
        self
    }

    /// Walk options for this configuration. `fallback_root` is used when no
    /// root was configured or resolved.
    pub fn walk_options(&self, fallback_root: &Path) -> WalkOptions {
        let root = self.root.as_deref().unwrap_or(fallback_root);
        WalkOptions::new(root)
            .rules(self.rules.clone())
            .node_compat(self.node_compat)
            .external(self.external.iter().cloned())
    }
}

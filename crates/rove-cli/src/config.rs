//! Multi-source configuration loading.
//!
//! Priority: CLI flags > `ROVE_*` environment variables > config file > defaults.
//! Paths in the config file are relative to the file; paths from the
//! environment and flags are relative to the working directory.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Serialized};
use rove_config::{ConfigDiscovery, ConfigError, RoveConfig};
use rove_graph::NodeCompatMode;
use serde::Serialize;
use tracing::debug;

use crate::cli::CollectArgs;
use crate::error::Result;

pub const ENV_PREFIX: &str = "ROVE_";

/// Values given on the command line. Unset flags leave lower layers alone.
#[derive(Debug, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_compat: Option<NodeCompatMode>,
    /// Appended to the configured list rather than replacing it.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<String>,
}

impl From<&CollectArgs> for CliOverrides {
    fn from(args: &CollectArgs) -> Self {
        Self {
            main: args.entry.clone(),
            root: args.root.clone(),
            node_compat: args.node_compat,
            external: args.external.clone(),
        }
    }
}

/// Locate the config file: `explicit` if given, else discovery in `cwd`.
pub fn config_file(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(cwd.join(path)),
        None => ConfigDiscovery::new(cwd).find(),
    }
}

/// Load configuration from every source, with all paths made absolute.
pub fn load(file: Option<&Path>, overrides: &CliOverrides, cwd: &Path) -> Result<RoveConfig> {
    let mut figment = Figment::new().merge(Serialized::defaults(RoveConfig::default()));

    if let Some(path) = file {
        debug!(path = %path.display(), "merging config file");
        let file_config = rove_config::load_from(path)?;
        figment = figment.merge(Serialized::defaults(file_config));
    }

    // ROVE_MAIN, ROVE_NODE_COMPAT, ROVE_EXTERNAL, ...
    figment = figment.merge(Env::prefixed(ENV_PREFIX));

    figment = figment.admerge(Serialized::defaults(overrides));

    let config: RoveConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
        field: "configuration".to_string(),
        hint: e.to_string(),
    })?;

    Ok(config.resolve_paths(cwd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = load(None, &CliOverrides::default(), dir.path()).unwrap();

        assert_eq!(config.main, None);
        assert_eq!(config.root, Some(dir.path().to_path_buf()));
        assert_eq!(config.node_compat, NodeCompatMode::None);
    }

    #[test]
    #[serial]
    fn cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("rove.toml"),
            r#"
main = "src/index.mjs"
node_compat = "v1"
external = ["from-file"]
"#,
        )
        .unwrap();
        let file = config_file(None, dir.path());

        let overrides = CliOverrides {
            main: Some("other.mjs".into()),
            node_compat: Some(NodeCompatMode::V2),
            external: vec!["from-cli".into()],
            ..CliOverrides::default()
        };
        let config = load(file.as_deref(), &overrides, dir.path()).unwrap();

        assert_eq!(config.main, Some(dir.path().join("other.mjs")));
        assert_eq!(config.node_compat, NodeCompatMode::V2);
        assert_eq!(
            config.external,
            vec!["from-file".to_string(), "from-cli".to_string()]
        );
    }

    #[test]
    #[serial]
    fn file_paths_are_relative_to_the_file() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("worker");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("rove.toml"), "main = \"index.mjs\"").unwrap();

        let file = config_file(Some(Path::new("worker/rove.toml")), dir.path());
        let config = load(file.as_deref(), &CliOverrides::default(), dir.path()).unwrap();

        assert_eq!(config.main, Some(nested.join("index.mjs")));
        assert_eq!(config.root, Some(nested));
    }

    #[test]
    #[serial]
    fn environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rove.toml"), "node_compat = \"v1\"").unwrap();
        let file = config_file(None, dir.path());

        // SAFETY: serialized with every other test that reads the environment.
        unsafe {
            std::env::set_var("ROVE_NODE_COMPAT", "als");
        }
        let result = load(file.as_deref(), &CliOverrides::default(), dir.path());
        unsafe {
            std::env::remove_var("ROVE_NODE_COMPAT");
        }

        assert_eq!(result.unwrap().node_compat, NodeCompatMode::Als);
    }
}

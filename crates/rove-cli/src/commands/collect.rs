//! Collect command implementation.
//!
//! Loads configuration, walks the entrypoint (or converts the manually
//! declared modules) and writes the module manifest.

use std::fs;
use std::sync::Arc;

use rove_config::{ConfigError, RoveConfig, validate_schema};
use rove_graph::{ModuleSource, NativeRuntime, Runtime, WorkerModule, collect_modules};
use tracing::info;

use crate::cli::{CollectArgs, OutputFormat};
use crate::commands::utils;
use crate::config::{self, CliOverrides};
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the collect command.
///
/// An `ENTRY` argument always walks that entrypoint. Without one, manually
/// declared `modules` win over `main`.
pub fn execute(args: CollectArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let file = config::config_file(args.config.as_deref(), &cwd);
    let config = config::load(file.as_deref(), &CliOverrides::from(&args), &cwd)?;
    validate_schema(&config)?;

    let runtime: Arc<dyn Runtime> = Arc::new(NativeRuntime);
    let source = module_source(&config, args.entry.is_some(), runtime.as_ref())?;
    let modules = collect_modules(source, config.walk_options(&cwd), runtime)?;
    info!(count = modules.len(), "module manifest ready");

    let manifest = render(&modules, args.format)?;
    match &args.output {
        Some(output) => {
            let path = cwd.join(output);
            fs::write(&path, manifest).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            ui::success(&format!(
                "Wrote {} modules to {}",
                modules.len(),
                path.display()
            ));
        }
        None => print!("{manifest}"),
    }

    Ok(())
}

fn module_source(
    config: &RoveConfig,
    entry_given: bool,
    runtime: &dyn Runtime,
) -> Result<ModuleSource> {
    if !entry_given && !config.modules.is_empty() {
        return Ok(ModuleSource::Manual(config.modules.clone()));
    }
    match &config.main {
        Some(main) => Ok(ModuleSource::from_file(main, runtime)?),
        None => Err(ConfigError::NoEntrypoint.into()),
    }
}

/// Render the manifest in the requested format.
pub fn render(modules: &[WorkerModule], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(modules)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Text => Ok(modules
            .iter()
            .map(|module| {
                let kind = module.kind().map_or("NodeJsCompat", |kind| kind.as_str());
                format!(
                    "{:<18} {}  {}\n",
                    kind,
                    module.name,
                    ui::format_size(module.contents.len() as u64)
                )
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rove_graph::ModuleContents;

    fn modules() -> Vec<WorkerModule> {
        vec![
            WorkerModule::new("index.mjs", ModuleContents::EsModule("export {};".into())),
            WorkerModule::new("blob.bin", ModuleContents::Data(vec![0; 2048])),
        ]
    }

    #[test]
    fn text_manifest_lists_kind_name_and_size() {
        let text = render(&modules(), OutputFormat::Text).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ESModule"));
        assert!(lines[0].ends_with("index.mjs  10 B"));
        assert!(lines[1].ends_with("blob.bin  2.00 KB"));
    }

    #[test]
    fn json_manifest_is_an_ordered_array() {
        let json = render(&modules(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "index.mjs");
        assert_eq!(value[0]["esModule"], "export {};");
        assert_eq!(value[1]["name"], "blob.bin");
    }

    #[test]
    fn manual_modules_win_without_entry_argument() {
        let config = RoveConfig {
            main: Some("/w/index.mjs".into()),
            modules: vec![rove_graph::ModuleDefinition::new(
                rove_graph::ContentKind::EsModule,
                "/w/index.mjs",
            )],
            ..RoveConfig::default()
        };
        let source = module_source(&config, false, &NativeRuntime).unwrap();
        assert!(matches!(source, ModuleSource::Manual(defs) if defs.len() == 1));
    }

    #[test]
    fn missing_entrypoint_is_config_error() {
        let err = module_source(&RoveConfig::default(), false, &NativeRuntime).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NoEntrypoint)));
    }
}

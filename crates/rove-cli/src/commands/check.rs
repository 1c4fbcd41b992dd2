//! Check command implementation.
//!
//! Validates configuration without walking any modules.

use rove_config::{ConfigError, validate_fs};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::config::{self, CliOverrides};
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Locate and load the config file (with environment overrides)
/// 2. Check an entrypoint or manual modules are declared
/// 3. Compile every module rule
/// 4. Check the entrypoint and declared module files exist
pub fn execute(args: CheckArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let Some(file) = config::config_file(args.config.as_deref(), &cwd) else {
        return Err(ConfigError::NotFound { root: cwd }.into());
    };
    ui::info(&format!("Checking {}...", file.display()));

    let config = config::load(Some(&file), &CliOverrides::default(), &cwd)?;
    validate_fs(&config, &cwd)?;

    ui::success("Configuration is valid!");
    if let Some(main) = &config.main {
        ui::info(&format!("  entrypoint: {}", main.display()));
    }
    ui::info(&format!("  node compat: {}", config.node_compat));
    ui::info(&format!(
        "  {} rules, {} declared modules",
        config.rules.len(),
        config.modules.len()
    ));

    Ok(())
}

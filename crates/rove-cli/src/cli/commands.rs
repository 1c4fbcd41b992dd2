use std::path::PathBuf;

use clap::{Args, Subcommand};
use rove_graph::NodeCompatMode;

use crate::cli::enums::OutputFormat;

/// Available rove subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect the modules reachable from an entrypoint
    ///
    /// Walks static imports and requires, classifies each file with the
    /// module rules, and writes the ordered module manifest.
    Collect(CollectArgs),

    /// Validate configuration
    ///
    /// Loads rove.toml (or the "rove" field of package.json), checks the
    /// rules compile and that referenced files exist.
    Check(CheckArgs),
}

/// Arguments for the collect command
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Entrypoint to walk. Overrides `main` and any manual `modules`.
    #[arg(value_name = "ENTRY")]
    pub entry: Option<PathBuf>,

    /// Directory module names are relative to
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Node.js compatibility mode of the target runtime (none, v1, v2, als)
    #[arg(long, value_name = "MODE")]
    pub node_compat: Option<NodeCompatMode>,

    /// Specifier provided by the runtime; may be repeated
    #[arg(long, value_name = "NAME")]
    pub external: Vec<String>,

    /// Config file to use instead of discovering one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Manifest format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write the manifest to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Config file to check instead of discovering one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

//! Command-line interface definition for rove.
//!
//! # Command Structure
//!
//! - `rove collect` - Walk an entrypoint and print its module manifest
//! - `rove check` - Validate configuration without walking

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{CheckArgs, CollectArgs, Command};
pub use enums::*;

/// Rove - static module discovery for serverless functions
#[derive(Parser, Debug)]
#[command(
    name = "rove",
    version,
    about = "List the modules a serverless function entrypoint loads",
    long_about = "Rove walks the static imports of a JavaScript entrypoint and tags every\n\
                  reachable file with the kind the runtime loads it as. Nothing is bundled\n\
                  or transformed."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rove_graph::NodeCompatMode;
    use std::path::PathBuf;

    #[test]
    fn collect_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "rove",
            "collect",
            "src/index.mjs",
            "--root",
            "src",
            "--node-compat",
            "v2",
            "--external",
            "a",
            "--external",
            "b",
            "--format",
            "text",
            "-o",
            "modules.txt",
        ])
        .unwrap();

        let Command::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        assert_eq!(args.entry, Some(PathBuf::from("src/index.mjs")));
        assert_eq!(args.root, Some(PathBuf::from("src")));
        assert_eq!(args.node_compat, Some(NodeCompatMode::V2));
        assert_eq!(args.external, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.output, Some(PathBuf::from("modules.txt")));
    }

    #[test]
    fn collect_defaults_to_json() {
        let cli = Cli::try_parse_from(["rove", "collect"]).unwrap();
        let Command::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.entry.is_none());
    }

    #[test]
    fn unknown_compat_mode_is_rejected() {
        let result = Cli::try_parse_from(["rove", "collect", "--node-compat", "v9"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["rove", "-v", "-q", "check"]);
        assert!(result.is_err());
    }
}

//! Logging infrastructure for the rove CLI.
//!
//! Sets up a `tracing` subscriber with verbosity flags, colored output and
//! `RUST_LOG` overrides.
//!
//! # Example
//!
//! ```rust,no_run
//! use rove_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("collecting modules");
//! debug!("visiting {}", "index.mjs");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const VERBOSE_FILTER: &str = "rove_graph=debug,rove_config=debug,rove_cli=debug";
pub const QUIET_FILTER: &str = "rove_graph=error,rove_config=error,rove_cli=error";
pub const DEFAULT_FILTER: &str = "rove_graph=info,rove_config=info,rove_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for rove crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for rove crates
///
/// Logs are written to stderr.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    init_logger_with_filter(filter, no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

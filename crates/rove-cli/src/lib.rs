//! Rove CLI - list the modules a serverless function entrypoint loads.
//!
//! This crate provides the command-line interface over `rove-graph`: it
//! layers configuration from `rove.toml` / `package.json`, the environment
//! and flags, walks the entrypoint, and writes the module manifest.
//!
//! # Architecture
//!
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages and size formatting
//! - [`config`] - Multi-source configuration loading
//! - `commands` - `collect` and `check`

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};

//! Shared utilities for command implementations.

use std::path::PathBuf;

use crate::error::Result;

/// Current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

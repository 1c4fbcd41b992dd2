//! Platform runtime abstraction for Rove
//!
//! This module defines the `Runtime` trait that abstracts the file access the
//! walker needs. Discovery is fully synchronous: a read blocks the walk until
//! the bytes are available, and there is never more than one read in flight.

pub mod native;

// Test utilities (available in test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// Platform runtime trait
///
/// Implementations provide byte-level file reads by absolute path and the
/// working directory used to absolutize relative entry paths.
///
/// # Example
///
/// ```rust,ignore
/// use rove_graph::runtime::{Runtime, RuntimeError, RuntimeResult};
///
/// #[derive(Debug)]
/// struct MyRuntime;
///
/// impl Runtime for MyRuntime {
///     fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
///         std::fs::read(path).map_err(|e| RuntimeError::Io(e.to_string()))
///     }
///
///     fn get_cwd(&self) -> RuntimeResult<PathBuf> {
///         Ok(PathBuf::from("/"))
///     }
/// }
/// ```
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file's raw bytes
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get the current working directory
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;
}

//! Test utilities for rove-graph.
//!
//! `MemoryRuntime` serves files from an in-memory map and records how many
//! times each path was read, which is how tests observe memoization.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::{Runtime, RuntimeError, RuntimeResult};

/// In-memory runtime for tests.
///
/// ```rust,ignore
/// use rove_graph::runtime::Runtime;
/// use rove_graph::test_utils::MemoryRuntime;
/// use std::path::Path;
///
/// let runtime = MemoryRuntime::new("/w").with_file("/w/a.txt", "hello");
/// assert_eq!(runtime.read_file(Path::new("/w/a.txt")).unwrap(), b"hello");
/// assert_eq!(runtime.reads(Path::new("/w/a.txt")), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: FxHashMap<PathBuf, Vec<u8>>,
    reads: Mutex<FxHashMap<PathBuf, usize>>,
}

impl MemoryRuntime {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    /// Add a file, returning the runtime for chaining.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Number of reads recorded for `path`.
    pub fn reads(&self, path: &Path) -> usize {
        self.reads.lock().get(path).copied().unwrap_or(0)
    }

    /// Total reads across all paths.
    pub fn total_reads(&self) -> usize {
        self.reads.lock().values().sum()
    }
}

impl Runtime for MemoryRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        *self.reads.lock().entry(path.to_path_buf()).or_insert(0) += 1;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}

//! Command implementations for the rove CLI.
//!
//! - [`collect`] - Walk an entrypoint and write the module manifest
//! - [`check`] - Configuration validation
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod check;
pub mod collect;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use collect::execute as collect_execute;

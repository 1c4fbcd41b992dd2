//! # rove-graph
//!
//! Static module discovery for serverless function entrypoints.
//!
//! Given an entrypoint, rove finds every file statically reachable from it and
//! tags each one with the content kind the runtime must load it as. Nothing is
//! concatenated or transformed; modules are only discovered and tagged.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     collect_modules                      │
//! │        (entrypoint walk, or manual module definitions)   │
//! └────────────────────┬─────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ModuleWalker                        │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────────────┐  │
//! │  │  Parser    │→ │ Node-compat│→ │   Module rules     │  │
//! │  │(specifiers)│  │   policy   │  │   (glob → kind)    │  │
//! │  └────────────┘  └────────────┘  └────────────────────┘  │
//! └────────────────────┬─────────────────────────────────────┘
//!                      │
//!                      ▼
//!              Vec<WorkerModule> (discovery order)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rove_graph::{ModuleWalker, NativeRuntime, NodeCompatMode, WalkOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = WalkOptions::new("/srv/worker").node_compat(NodeCompatMode::V2);
//! let mut walker = ModuleWalker::new(options, Arc::new(NativeRuntime))?;
//! walker.visit_entrypoint("import './util.mjs';", "/srv/worker/index.mjs")?;
//!
//! for module in walker.modules() {
//!     println!("{}", module.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod compat;
pub mod definition;
pub mod error;
pub mod module;
pub mod naming;
pub mod parser;
pub mod rules;
pub mod runtime;
pub mod walker;

pub use build::{BuildError, ModuleSource, collect_modules};
pub use compat::{NodeCompatMode, is_externally_resolved, is_node_builtin};
pub use definition::{DefinitionContents, ModuleDefinition, to_definition, to_module};
pub use error::{ModuleError, ModuleErrorKind};
pub use module::{ContentKind, ModuleContents, WorkerModule};
pub use naming::{module_name, script_id, with_source_url};
pub use parser::{ModuleParser, OxcParser, ParseFailure, ParseMode, Specifier};
pub use rules::{
    CompiledModuleRule, ModuleRule, RuleError, compile_module_rules, default_module_rules,
};
pub use runtime::native::NativeRuntime;
pub use runtime::{Runtime, RuntimeError, RuntimeResult};
pub use walker::{ModuleWalker, WalkOptions};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    pub use super::runtime::test_utils::*;
}

//! Graph walker for module discovery.
//!
//! Performs a synchronous depth-first pre-order traversal of the import graph
//! starting at an entrypoint. Each JavaScript module is stamped, parsed, and
//! recorded before its own imports are followed; non-JavaScript assets are
//! classified by module rules and recorded without further traversal.
//!
//! A walker is scoped to a single build. Construct a fresh one per build and
//! discard it after an error: its module list is incomplete at that point.

mod traversal;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::compat::NodeCompatMode;
use crate::error::ModuleError;
use crate::module::{ModuleContents, WorkerModule};
use crate::naming::{is_script_path, module_name, source_locator, with_source_url};
use crate::parser::{ModuleParser, OxcParser, ParseMode};
use crate::rules::{CompiledModuleRule, ModuleRule, RuleError, compile_module_rules};
use crate::runtime::Runtime;

/// Configuration for a single walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Directory module names are computed relative to.
    pub root: PathBuf,
    /// User rules, evaluated before the default rules.
    pub rules: Vec<ModuleRule>,
    /// Node.js compatibility mode of the target runtime.
    pub node_compat: NodeCompatMode,
    /// Specifiers the caller guarantees are resolvable out of band.
    pub external: Vec<String>,
}

impl WalkOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn rules(mut self, rules: Vec<ModuleRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn node_compat(mut self, mode: NodeCompatMode) -> Self {
        self.node_compat = mode;
        self
    }

    pub fn external(mut self, external: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.external = external.into_iter().map(Into::into).collect();
        self
    }
}

/// Walks the static import graph of one entrypoint.
#[derive(Debug)]
pub struct ModuleWalker {
    runtime: Arc<dyn Runtime>,
    parser: Arc<dyn ModuleParser>,
    root: PathBuf,
    rules: Vec<CompiledModuleRule>,
    node_compat: NodeCompatMode,
    external: FxHashSet<String>,
    /// Inserted before a path's content is examined; the sole cycle guard.
    visited: FxHashSet<PathBuf>,
    modules: Vec<WorkerModule>,
}

impl ModuleWalker {
    /// Create a walker, compiling `options.rules` with the default rules.
    pub fn new(options: WalkOptions, runtime: Arc<dyn Runtime>) -> Result<Self, RuleError> {
        let rules = compile_module_rules(&options.rules)?;
        Ok(Self {
            runtime,
            parser: Arc::new(OxcParser),
            root: options.root.clean(),
            rules,
            node_compat: options.node_compat,
            external: options.external.into_iter().collect(),
            visited: FxHashSet::default(),
            modules: Vec::new(),
        })
    }

    /// Replace the default OXC parser.
    pub fn with_parser(mut self, parser: Arc<dyn ModuleParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Discover every module statically reachable from an entrypoint.
    ///
    /// `path` is either a file path or a synthetic script id (see
    /// [`script_id`](crate::naming::script_id)). The entrypoint is always
    /// treated as an ES module, whatever the rules say. Visiting an
    /// already-visited entrypoint is a no-op.
    pub fn visit_entrypoint(
        &mut self,
        code: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<(), ModuleError> {
        let path = self.absolutize(path.as_ref())?;
        if !self.visited.insert(path.clone()) {
            debug!(path = %path.display(), "entrypoint already visited");
            return Ok(());
        }
        self.visit_javascript_module(code.into(), &path, ParseMode::Module)
    }

    /// Modules discovered so far, in discovery order.
    pub fn modules(&self) -> &[WorkerModule] {
        &self.modules
    }

    pub fn into_modules(self) -> Vec<WorkerModule> {
        self.modules
    }

    fn absolutize(&self, path: &Path) -> Result<PathBuf, ModuleError> {
        if is_script_path(path) {
            return Ok(path.to_path_buf());
        }
        if path.is_absolute() {
            return Ok(path.clean());
        }
        let cwd = self
            .runtime
            .get_cwd()
            .map_err(|source| ModuleError::read_failure(path, source))?;
        Ok(cwd.join(path).clean())
    }

    /// Stamp, parse, and record a JavaScript module, then follow its imports.
    fn visit_javascript_module(
        &mut self,
        code: String,
        path: &Path,
        mode: ParseMode,
    ) -> Result<(), ModuleError> {
        let name = module_name(&self.root, path);
        let code = with_source_url(code, &source_locator(path));

        let specifiers = self
            .parser
            .collect_specifiers(&code, mode)
            .map_err(|failure| {
                ModuleError::parse_failure(&name, &failure.message, failure.location)
            })?;

        debug!(
            module = %name,
            ?mode,
            specifiers = specifiers.len(),
            "discovered javascript module"
        );

        let contents = match mode {
            ParseMode::Module => ModuleContents::EsModule(code),
            ParseMode::Script => ModuleContents::CommonJs(code),
        };
        // Recorded before any import is followed: pre-order.
        self.modules.push(WorkerModule::new(name.clone(), contents));

        for specifier in specifiers {
            self.visit_specifier(path, &name, specifier)?;
        }
        Ok(())
    }
}

//! One-shot module collection for a build.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use tracing::info;

use crate::definition::{ModuleDefinition, to_module};
use crate::error::ModuleError;
use crate::module::{WorkerModule, decode_utf8};
use crate::rules::RuleError;
use crate::runtime::Runtime;
use crate::walker::{ModuleWalker, WalkOptions};

/// Error returned by [`collect_modules`].
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum BuildError {
    #[error(transparent)]
    #[diagnostic(code(rove::build::invalid_rule))]
    Rules(#[from] RuleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Module(#[from] ModuleError),
}

/// Where the modules of a build come from.
#[derive(Debug, Clone)]
pub enum ModuleSource {
    /// Discover modules by walking the imports of an entrypoint.
    Entrypoint { code: String, path: PathBuf },
    /// Use caller-declared modules as-is, in order.
    Manual(Vec<ModuleDefinition>),
}

impl ModuleSource {
    /// Entrypoint source read from `path` through `runtime`.
    pub fn from_file(path: impl AsRef<Path>, runtime: &dyn Runtime) -> Result<Self, ModuleError> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.clean()
        } else {
            let cwd = runtime
                .get_cwd()
                .map_err(|source| ModuleError::read_failure(path, source))?;
            cwd.join(path).clean()
        };
        let bytes = runtime
            .read_file(&path)
            .map_err(|source| ModuleError::read_failure(&path, source))?;
        Ok(ModuleSource::Entrypoint {
            code: decode_utf8(bytes),
            path,
        })
    }
}

/// Collect the modules of one build with a fresh walker.
pub fn collect_modules(
    source: ModuleSource,
    options: WalkOptions,
    runtime: Arc<dyn Runtime>,
) -> Result<Vec<WorkerModule>, BuildError> {
    let modules = match source {
        ModuleSource::Entrypoint { code, path } => {
            let mut walker = ModuleWalker::new(options, runtime)?;
            walker.visit_entrypoint(code, &path)?;
            walker.into_modules()
        }
        ModuleSource::Manual(definitions) => {
            let root = options.root.clean();
            definitions
                .into_iter()
                .map(|definition| to_module(&root, definition, runtime.as_ref()))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    info!(count = modules.len(), "collected modules");
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{ContentKind, ModuleContents};
    use crate::runtime::test_utils::MemoryRuntime;

    #[test]
    fn manual_definitions_skip_traversal() {
        let runtime = Arc::new(
            MemoryRuntime::new("/w")
                .with_file("/w/index.mjs", "import(dynamic);")
                .with_file("/w/lazy.mjs", "export default 1;"),
        );
        let source = ModuleSource::Manual(vec![
            ModuleDefinition::new(ContentKind::EsModule, "/w/index.mjs"),
            ModuleDefinition::new(ContentKind::EsModule, "/w/lazy.mjs"),
        ]);

        let modules = collect_modules(source, WalkOptions::new("/w"), runtime).unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["index.mjs", "lazy.mjs"]);
    }

    #[test]
    fn entrypoint_source_reads_relative_path_from_cwd() {
        let runtime = MemoryRuntime::new("/w").with_file("/w/src/index.mjs", "export {};");
        let source = ModuleSource::from_file("src/index.mjs", &runtime).unwrap();
        match source {
            ModuleSource::Entrypoint { code, path } => {
                assert_eq!(code, "export {};");
                assert_eq!(path, PathBuf::from("/w/src/index.mjs"));
            }
            ModuleSource::Manual(_) => panic!("expected entrypoint"),
        }
    }

    #[test]
    fn entrypoint_walk_returns_modules() {
        let runtime = Arc::new(MemoryRuntime::new("/w").with_file("/w/dep.mjs", "export {};"));
        let source = ModuleSource::Entrypoint {
            code: "import './dep.mjs';".into(),
            path: PathBuf::from("/w/index.mjs"),
        };

        let modules = collect_modules(source, WalkOptions::new("/w"), runtime).unwrap();
        assert_eq!(modules.len(), 2);
        assert!(matches!(modules[1].contents, ModuleContents::EsModule(_)));
    }
}

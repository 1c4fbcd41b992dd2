//! Conversion between caller-authored module definitions and worker modules.
//!
//! Definitions are how callers list modules by hand when discovery cannot
//! (for example, when a function uses dynamic `import()`). The reverse
//! direction is used to render discovered modules inside error messages.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::error::ModuleError;
use crate::module::{ContentKind, ModuleContents, WorkerModule, decode_utf8};
use crate::naming::{module_name, source_locator, with_source_url};
use crate::runtime::Runtime;

/// Inline contents of a module definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefinitionContents {
    Text(String),
    Bytes(Vec<u8>),
}

impl DefinitionContents {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            DefinitionContents::Text(text) => text.into_bytes(),
            DefinitionContents::Bytes(bytes) => bytes,
        }
    }
}

/// A module declared by the caller rather than discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<DefinitionContents>,
}

impl ModuleDefinition {
    pub fn new(kind: ContentKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            contents: None,
        }
    }

    pub fn with_contents(mut self, contents: DefinitionContents) -> Self {
        self.contents = Some(contents);
        self
    }
}

/// Build the worker module for a caller-declared definition.
///
/// Without inline contents the file is read through `runtime`. Relative
/// paths are taken from the runtime's working directory. JavaScript kinds are
/// stamped exactly as discovered modules are.
pub fn to_module(
    root: &Path,
    definition: ModuleDefinition,
    runtime: &dyn Runtime,
) -> Result<WorkerModule, ModuleError> {
    let path = if definition.path.is_absolute() {
        definition.path
    } else {
        let cwd = runtime
            .get_cwd()
            .map_err(|source| ModuleError::read_failure(&definition.path, source))?;
        cwd.join(&definition.path)
    };
    let name = module_name(root, &path);

    let bytes = match definition.contents {
        Some(contents) => contents.into_bytes(),
        None => runtime
            .read_file(&path)
            .map_err(|source| ModuleError::read_failure(&path, source))?,
    };

    let contents = match definition.kind {
        ContentKind::EsModule => {
            ModuleContents::EsModule(with_source_url(decode_utf8(bytes), &source_locator(&path)))
        }
        ContentKind::CommonJs => {
            ModuleContents::CommonJs(with_source_url(decode_utf8(bytes), &source_locator(&path)))
        }
        kind => kind.contents_from_bytes(bytes),
    };

    Ok(WorkerModule::new(name, contents))
}

/// Inverse of [`to_module`], used to list modules in error messages.
///
/// # Panics
///
/// Panics on runtime-internal module kinds. The walker never produces them,
/// so reaching that arm is a bug.
pub fn to_definition(root: &Path, module: &WorkerModule) -> ModuleDefinition {
    let path = root.join(&module.name).clean();
    let (kind, contents) = match &module.contents {
        ModuleContents::EsModule(code) => {
            (ContentKind::EsModule, DefinitionContents::Text(code.clone()))
        }
        ModuleContents::CommonJs(code) => {
            (ContentKind::CommonJs, DefinitionContents::Text(code.clone()))
        }
        ModuleContents::Text(text) => (ContentKind::Text, DefinitionContents::Text(text.clone())),
        ModuleContents::Data(bytes) => {
            (ContentKind::Data, DefinitionContents::Bytes(bytes.clone()))
        }
        ModuleContents::Wasm(bytes) => {
            (ContentKind::CompiledWasm, DefinitionContents::Bytes(bytes.clone()))
        }
        ModuleContents::PythonModule(code) => {
            (ContentKind::PythonModule, DefinitionContents::Text(code.clone()))
        }
        ModuleContents::PythonRequirement(text) => {
            (ContentKind::PythonRequirement, DefinitionContents::Text(text.clone()))
        }
        ModuleContents::NodeJsCompat(_) => {
            unreachable!("node.js compat modules are generated by the runtime, never discovered")
        }
    };
    ModuleDefinition {
        kind,
        path,
        contents: Some(contents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::MemoryRuntime;

    #[test]
    fn reads_missing_contents_from_disk() {
        let runtime = MemoryRuntime::new("/w").with_file("/w/data/blob.bin", vec![1, 2, 3]);
        let def = ModuleDefinition::new(ContentKind::Data, "/w/data/blob.bin");

        let module = to_module(Path::new("/w"), def, &runtime).unwrap();
        assert_eq!(module.name, "data/blob.bin");
        assert_eq!(module.contents, ModuleContents::Data(vec![1, 2, 3]));
        assert_eq!(runtime.reads(Path::new("/w/data/blob.bin")), 1);
    }

    #[test]
    fn inline_javascript_is_stamped() {
        let runtime = MemoryRuntime::new("/w");
        let def = ModuleDefinition::new(ContentKind::EsModule, "/w/index.mjs")
            .with_contents(DefinitionContents::Text("export default {}".into()));

        let module = to_module(Path::new("/w"), def, &runtime).unwrap();
        assert_eq!(
            module.contents,
            ModuleContents::EsModule(
                "export default {}\n//# sourceURL=file:///w/index.mjs\n".into()
            )
        );
        assert_eq!(runtime.total_reads(), 0);
    }

    #[test]
    fn relative_paths_use_runtime_cwd() {
        let runtime = MemoryRuntime::new("/w").with_file("/w/req.txt", "numpy");
        let def = ModuleDefinition::new(ContentKind::PythonRequirement, "req.txt");

        let module = to_module(Path::new("/w"), def, &runtime).unwrap();
        assert_eq!(module.name, "req.txt");
        assert_eq!(module.contents, ModuleContents::PythonRequirement("numpy".into()));
    }

    #[test]
    fn missing_file_is_a_read_failure() {
        let runtime = MemoryRuntime::new("/w");
        let def = ModuleDefinition::new(ContentKind::Text, "/w/gone.txt");
        let err = to_module(Path::new("/w"), def, &runtime).unwrap_err();
        assert_eq!(err.kind().as_str(), "module-read-failure");
    }

    #[test]
    fn to_definition_joins_root() {
        let module = WorkerModule::new("lib/a.wasm", ModuleContents::Wasm(vec![0]));
        let def = to_definition(Path::new("/w"), &module);
        assert_eq!(def.kind, ContentKind::CompiledWasm);
        assert_eq!(def.path, PathBuf::from("/w/lib/a.wasm"));
    }

    #[test]
    #[should_panic(expected = "generated by the runtime")]
    fn to_definition_rejects_runtime_internal_modules() {
        let module = WorkerModule::new("node-compat", ModuleContents::NodeJsCompat(String::new()));
        to_definition(Path::new("/w"), &module);
    }
}

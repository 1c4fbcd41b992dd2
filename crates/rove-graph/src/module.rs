//! Worker module records produced by the walker.
//!
//! A [`WorkerModule`] is a named unit of code or asset that a runtime loads to
//! execute a function. Each record carries exactly one content field, tagged by
//! its [`ContentKind`].

use serde::{Deserialize, Serialize};

/// Kind of content a module rule or definition classifies a file as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    #[serde(rename = "ESModule")]
    EsModule,
    #[serde(rename = "CommonJS")]
    CommonJs,
    Text,
    Data,
    CompiledWasm,
    PythonModule,
    PythonRequirement,
}

impl ContentKind {
    /// All kinds, in declaration order.
    pub const ALL: [ContentKind; 7] = [
        ContentKind::EsModule,
        ContentKind::CommonJs,
        ContentKind::Text,
        ContentKind::Data,
        ContentKind::CompiledWasm,
        ContentKind::PythonModule,
        ContentKind::PythonRequirement,
    ];

    /// Name used in configuration files and error listings.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::EsModule => "ESModule",
            ContentKind::CommonJs => "CommonJS",
            ContentKind::Text => "Text",
            ContentKind::Data => "Data",
            ContentKind::CompiledWasm => "CompiledWasm",
            ContentKind::PythonModule => "PythonModule",
            ContentKind::PythonRequirement => "PythonRequirement",
        }
    }

    /// Wrap raw file bytes in the matching content variant, decoding text kinds.
    pub(crate) fn contents_from_bytes(self, bytes: Vec<u8>) -> ModuleContents {
        match self {
            ContentKind::EsModule => ModuleContents::EsModule(decode_utf8(bytes)),
            ContentKind::CommonJs => ModuleContents::CommonJs(decode_utf8(bytes)),
            ContentKind::Text => ModuleContents::Text(decode_utf8(bytes)),
            ContentKind::Data => ModuleContents::Data(bytes),
            ContentKind::CompiledWasm => ModuleContents::Wasm(bytes),
            ContentKind::PythonModule => ModuleContents::PythonModule(decode_utf8(bytes)),
            ContentKind::PythonRequirement => {
                ModuleContents::PythonRequirement(decode_utf8(bytes))
            }
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode file bytes as UTF-8, replacing invalid sequences with U+FFFD.
pub(crate) fn decode_utf8(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Content of a worker module. Exactly one variant per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleContents {
    EsModule(String),
    #[serde(rename = "commonJsModule")]
    CommonJs(String),
    Text(String),
    Data(Vec<u8>),
    Wasm(Vec<u8>),
    PythonModule(String),
    PythonRequirement(String),
    /// Runtime-internal fallback module. Only the runtime generates these;
    /// the walker and definition converter never do.
    #[serde(rename = "nodeJsCompatModule")]
    NodeJsCompat(String),
}

impl ModuleContents {
    /// Textual content, if this variant stores text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModuleContents::EsModule(s)
            | ModuleContents::CommonJs(s)
            | ModuleContents::Text(s)
            | ModuleContents::PythonModule(s)
            | ModuleContents::PythonRequirement(s)
            | ModuleContents::NodeJsCompat(s) => Some(s),
            ModuleContents::Data(_) | ModuleContents::Wasm(_) => None,
        }
    }

    /// Binary content, if this variant stores raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ModuleContents::Data(b) | ModuleContents::Wasm(b) => Some(b),
            _ => None,
        }
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        match self.as_bytes() {
            Some(bytes) => bytes.len(),
            None => self.as_text().map_or(0, str::len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, tagged module ready to hand to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerModule {
    /// Path relative to the module root, always `/`-separated.
    pub name: String,
    #[serde(flatten)]
    pub contents: ModuleContents,
}

impl WorkerModule {
    pub fn new(name: impl Into<String>, contents: ModuleContents) -> Self {
        Self {
            name: name.into(),
            contents,
        }
    }

    /// Content kind of this record, or `None` for runtime-internal modules.
    pub fn kind(&self) -> Option<ContentKind> {
        match self.contents {
            ModuleContents::EsModule(_) => Some(ContentKind::EsModule),
            ModuleContents::CommonJs(_) => Some(ContentKind::CommonJs),
            ModuleContents::Text(_) => Some(ContentKind::Text),
            ModuleContents::Data(_) => Some(ContentKind::Data),
            ModuleContents::Wasm(_) => Some(ContentKind::CompiledWasm),
            ModuleContents::PythonModule(_) => Some(ContentKind::PythonModule),
            ModuleContents::PythonRequirement(_) => Some(ContentKind::PythonRequirement),
            ModuleContents::NodeJsCompat(_) => None,
        }
    }
}

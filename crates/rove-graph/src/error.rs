//! Errors raised while discovering modules.
//!
//! Every error has a stable machine-readable kind ([`ModuleErrorKind`]) and a
//! multi-line human message with remediation guidance. Any error aborts the
//! whole walk; there is no partial result.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::definition::ModuleDefinition;
use crate::runtime::RuntimeError;

/// Stable classification of a [`ModuleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleErrorKind {
    ParseFailure,
    DynamicSpecifier,
    StringScriptImport,
    NoMatchingRule,
    ReadFailure,
}

impl ModuleErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleErrorKind::ParseFailure => "module-parse-failure",
            ModuleErrorKind::DynamicSpecifier => "dynamic-specifier-unsupported",
            ModuleErrorKind::StringScriptImport => "unresolvable-string-script-import",
            ModuleErrorKind::NoMatchingRule => "no-matching-rule",
            ModuleErrorKind::ReadFailure => "module-read-failure",
        }
    }
}

impl std::fmt::Display for ModuleErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error that can occur during module discovery.
#[derive(Debug, Error, Diagnostic)]
pub enum ModuleError {
    #[error("{message}")]
    #[diagnostic(code(rove::module::parse_failure))]
    ParseFailure { name: String, message: String },

    #[error("{message}")]
    #[diagnostic(
        code(rove::module::dynamic_specifier),
        help("list every module under `modules` in rove.toml instead of relying on discovery")
    )]
    DynamicSpecifier { name: String, message: String },

    #[error("{message}")]
    #[diagnostic(code(rove::module::string_script_import))]
    StringScriptImport {
        name: String,
        specifier: String,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(rove::module::no_matching_rule))]
    NoMatchingRule {
        name: String,
        specifier: String,
        message: String,
    },

    #[error("Unable to read \"{}\": {source}", path.display())]
    #[diagnostic(code(rove::module::read_failure))]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },
}

impl ModuleError {
    /// Stable kind of this error.
    pub fn kind(&self) -> ModuleErrorKind {
        match self {
            ModuleError::ParseFailure { .. } => ModuleErrorKind::ParseFailure,
            ModuleError::DynamicSpecifier { .. } => ModuleErrorKind::DynamicSpecifier,
            ModuleError::StringScriptImport { .. } => ModuleErrorKind::StringScriptImport,
            ModuleError::NoMatchingRule { .. } => ModuleErrorKind::NoMatchingRule,
            ModuleError::ReadFailure { .. } => ModuleErrorKind::ReadFailure,
        }
    }

    /// Parser rejected the module `name`.
    pub fn parse_failure(
        name: impl Into<String>,
        parser_message: &str,
        location: Option<(u32, u32)>,
    ) -> Self {
        let name = name.into();
        let mut message = format!("Unable to parse \"{name}\": {parser_message}");
        if let Some((line, column)) = location {
            message.push_str(&format!("\n    at {name}:{line}:{column}"));
        }
        Self::ParseFailure { name, message }
    }

    /// A specifier in `name` is not a string literal.
    ///
    /// `registered` lists the modules discovered so far, so the caller can
    /// start a manual `modules` list from it.
    pub fn dynamic_specifier(
        name: impl Into<String>,
        location: Option<(u32, u32)>,
        registered: &[ModuleDefinition],
    ) -> Self {
        let name = name.into();
        let referrer = match location {
            Some((line, column)) => format!("{name}:{line}:{column}"),
            None => name.clone(),
        };
        let listing = registered
            .iter()
            .map(|def| {
                format!(
                    "  {{ type = \"{}\", path = \"{}\" }},",
                    def.kind,
                    def.path.display()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let message = format!(
            "Unable to resolve \"{referrer}\" dependency: dynamic module specifiers are unsupported.\n\
             You must manually define your modules in rove.toml:\n\
             modules = [\n{listing}\n  ...\n]"
        );
        Self::DynamicSpecifier { name, message }
    }

    /// An inline script without a path tried to import something.
    pub fn string_script_import(name: impl Into<String>, specifier: impl Into<String>) -> Self {
        let name = name.into();
        let specifier = specifier.into();
        let message = format!(
            "Unable to resolve \"{name}\" dependency \"{specifier}\": imports are unsupported in \
             inline scripts without a defined path.\n\
             Pass the entrypoint as a file so relative imports can be resolved."
        );
        Self::StringScriptImport {
            name,
            specifier,
            message,
        }
    }

    /// No module rule matched the resolved path of `specifier`.
    pub fn no_matching_rule(
        name: impl Into<String>,
        specifier: impl Into<String>,
        looks_like_builtin: bool,
    ) -> Self {
        let name = name.into();
        let specifier = specifier.into();
        let remediation = if looks_like_builtin {
            format!(
                "\"{specifier}\" is a Node.js built-in module. Enable Node.js compatibility \
                 (set `node_compat = \"v2\"` or pass `--node-compat v2`) so the runtime \
                 provides it."
            )
        } else {
            format!(
                "If \"{specifier}\" is an npm package, bundle your function with its \
                 dependencies first, or add a module rule whose globs match the file."
            )
        };
        let message = format!(
            "Unable to resolve \"{name}\" dependency \"{specifier}\": no matching module rules.\n\
             {remediation}"
        );
        Self::NoMatchingRule {
            name,
            specifier,
            message,
        }
    }

    pub fn read_failure(path: impl Into<PathBuf>, source: RuntimeError) -> Self {
        Self::ReadFailure {
            path: path.into(),
            source,
        }
    }
}

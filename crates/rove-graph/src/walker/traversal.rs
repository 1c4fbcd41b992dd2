//! Specifier resolution and rule dispatch.

use std::path::Path;

use path_clean::PathClean;
use tracing::{debug, trace};

use super::ModuleWalker;
use crate::compat::{is_externally_resolved, is_node_builtin};
use crate::definition::ModuleDefinition;
use crate::error::ModuleError;
use crate::module::{ContentKind, WorkerModule, decode_utf8};
use crate::naming::{module_name, parse_script_id};
use crate::parser::{ParseMode, Specifier};
use crate::rules::find_rule;

impl ModuleWalker {
    /// Resolve one specifier found in `referencing_path` and visit its target.
    pub(super) fn visit_specifier(
        &mut self,
        referencing_path: &Path,
        referencing_name: &str,
        specifier: Specifier,
    ) -> Result<(), ModuleError> {
        let spec = match specifier {
            Specifier::Literal { value, .. } => value,
            Specifier::Dynamic { line, column } => {
                let registered: Vec<ModuleDefinition> = self
                    .modules
                    .iter()
                    .filter_map(|module| {
                        let kind = module.kind()?;
                        Some(ModuleDefinition::new(kind, self.root.join(&module.name).clean()))
                    })
                    .collect();
                return Err(ModuleError::dynamic_specifier(
                    referencing_name,
                    Some((line, column)),
                    &registered,
                ));
            }
        };

        if is_externally_resolved(&spec, self.node_compat, &self.external) {
            trace!(specifier = %spec, from = %referencing_name, "specifier provided by runtime");
            return Ok(());
        }

        if parse_script_id(referencing_name).is_some() {
            return Err(ModuleError::string_script_import(referencing_name, spec));
        }

        let base = referencing_path.parent().unwrap_or_else(|| Path::new(""));
        let identifier = base.join(&spec).clean();
        if !self.visited.insert(identifier.clone()) {
            trace!(path = %identifier.display(), "already visited");
            return Ok(());
        }

        let Some(rule) = find_rule(&self.rules, &identifier) else {
            return Err(ModuleError::no_matching_rule(
                referencing_name,
                &spec,
                is_node_builtin(&spec),
            ));
        };
        let kind = rule.kind;
        trace!(path = %identifier.display(), %kind, "matched module rule");

        let bytes = self
            .runtime
            .read_file(&identifier)
            .map_err(|source| ModuleError::read_failure(&identifier, source))?;

        match kind {
            ContentKind::EsModule => {
                self.visit_javascript_module(decode_utf8(bytes), &identifier, ParseMode::Module)
            }
            ContentKind::CommonJs => {
                self.visit_javascript_module(decode_utf8(bytes), &identifier, ParseMode::Script)
            }
            ContentKind::Text
            | ContentKind::Data
            | ContentKind::CompiledWasm
            | ContentKind::PythonModule
            | ContentKind::PythonRequirement => {
                let name = module_name(&self.root, &identifier);
                debug!(module = %name, %kind, "discovered asset module");
                self.modules
                    .push(WorkerModule::new(name, kind.contents_from_bytes(bytes)));
                Ok(())
            }
        }
    }
}

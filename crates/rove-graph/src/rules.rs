//! Module rule compilation.
//!
//! Rules map glob patterns to a [`ContentKind`]. They are evaluated in order
//! and the first rule whose patterns match a path decides its kind. Two
//! default rules are always appended after the user's rules:
//!
//! - `*.mjs` → `ESModule`
//! - `*.js`, `*.cjs` → `CommonJS`
//!
//! Patterns are not anchored at the start: a relative pattern matches when it
//! matches any trailing run of whole path segments, so `*.txt` matches
//! `/w/notes.txt` and `src/**/*.txt` matches `/w/src/a/notes.txt`. A pattern
//! starting with `/` must match the whole absolute path.
//!
//! A rule without `fallthrough` finalizes its kind: any later rule of the same
//! kind (including the defaults) is dropped during compilation. Rules of other
//! kinds are unaffected.

use std::path::Path;

use glob::{MatchOptions, Pattern, PatternError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::module::ContentKind;
use crate::naming::slash_path;

/// `*` never crosses a separator, `**/` spans any number of directories.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A user-authored module rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRule {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(rename = "globs", alias = "include")]
    pub include: Vec<String>,
    #[serde(default)]
    pub fallthrough: bool,
}

impl ModuleRule {
    pub fn new(kind: ContentKind, include: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            include: include.into_iter().map(Into::into).collect(),
            fallthrough: false,
        }
    }

    /// Let later rules of the same kind still apply.
    pub fn fallthrough(mut self, fallthrough: bool) -> Self {
        self.fallthrough = fallthrough;
        self
    }
}

/// Error raised when a rule pattern is not a valid glob.
#[derive(Debug, thiserror::Error)]
#[error("invalid {kind} rule pattern '{pattern}': {source}")]
pub struct RuleError {
    pub kind: ContentKind,
    pub pattern: String,
    #[source]
    pub source: PatternError,
}

/// A rule whose patterns are ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledModuleRule {
    pub kind: ContentKind,
    pub include: Vec<Pattern>,
}

impl CompiledModuleRule {
    /// Whether any include pattern matches the absolute `path`.
    pub fn matches(&self, path: &Path) -> bool {
        let path = slash_path(path);
        self.include.iter().any(|pattern| {
            if pattern.as_str().starts_with('/') {
                pattern.matches_with(&path, MATCH_OPTIONS)
            } else {
                segment_suffixes(&path).any(|tail| pattern.matches_with(tail, MATCH_OPTIONS))
            }
        })
    }
}

/// Every suffix of `path` that starts at a segment boundary, longest first.
fn segment_suffixes(path: &str) -> impl Iterator<Item = &str> {
    path.char_indices()
        .filter(|&(_, c)| c == '/')
        .map(move |(at, _)| &path[at + 1..])
        .filter(|tail| !tail.is_empty())
}

/// Rules appended after every user rule list.
pub fn default_module_rules() -> Vec<ModuleRule> {
    vec![
        ModuleRule::new(ContentKind::EsModule, ["*.mjs"]),
        ModuleRule::new(ContentKind::CommonJs, ["*.js", "*.cjs"]),
    ]
}

/// Compile user rules followed by the default rules, applying fallthrough
/// precedence.
pub fn compile_module_rules(rules: &[ModuleRule]) -> Result<Vec<CompiledModuleRule>, RuleError> {
    let defaults = default_module_rules();
    let mut finalized: FxHashSet<ContentKind> = FxHashSet::default();
    let mut compiled = Vec::new();

    for rule in rules.iter().chain(defaults.iter()) {
        if finalized.contains(&rule.kind) {
            continue;
        }
        let include = rule
            .include
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| RuleError {
                    kind: rule.kind,
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        compiled.push(CompiledModuleRule {
            kind: rule.kind,
            include,
        });
        if !rule.fallthrough {
            finalized.insert(rule.kind);
        }
    }

    Ok(compiled)
}

/// First compiled rule matching `path`, in compiled order.
pub fn find_rule<'r>(rules: &'r [CompiledModuleRule], path: &Path) -> Option<&'r CompiledModuleRule> {
    rules.iter().find(|rule| rule.matches(path))
}

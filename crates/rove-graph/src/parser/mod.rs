//! Parser contract used by the walker.
//!
//! The walker only needs one thing from a parser: the specifier expressions a
//! source file references, in document order. [`ModuleParser`] is that narrow
//! seam; [`OxcParser`] is the default implementation built on `oxc_parser`.

mod visitor;

use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;

use crate::naming::LineIndex;
use visitor::SpecifierCollector;

/// Goal symbol to parse a source with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// ES module: import/export declarations and dynamic `import()`.
    Module,
    /// CommonJS script: dynamic `import()` and `require(...)` calls.
    Script,
}

/// A specifier expression found while walking a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// A string literal specifier.
    Literal {
        value: String,
        line: u32,
        column: u32,
    },
    /// Any other expression. Cannot be resolved statically.
    Dynamic { line: u32, column: u32 },
}

impl Specifier {
    /// Source position as `(line, column)`.
    pub fn location(&self) -> (u32, u32) {
        match self {
            Specifier::Literal { line, column, .. } | Specifier::Dynamic { line, column } => {
                (*line, *column)
            }
        }
    }
}

/// Syntax error reported by a parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseFailure {
    /// Parser diagnostic, verbatim.
    pub message: String,
    /// `(line, column)` of the error, when the parser reports one.
    pub location: Option<(u32, u32)>,
}

/// Narrow parser seam: source text in, specifiers out.
pub trait ModuleParser: Send + Sync + std::fmt::Debug {
    fn collect_specifiers(
        &self,
        source: &str,
        mode: ParseMode,
    ) -> Result<Vec<Specifier>, ParseFailure>;
}

/// Default parser backed by OXC.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcParser;

impl ModuleParser for OxcParser {
    fn collect_specifiers(
        &self,
        source: &str,
        mode: ParseMode,
    ) -> Result<Vec<Specifier>, ParseFailure> {
        let allocator = Allocator::default();
        let source_type = match mode {
            ParseMode::Module => SourceType::mjs(),
            ParseMode::Script => SourceType::cjs(),
        };

        let ParserReturn {
            program, errors, ..
        } = Parser::new(&allocator, source, source_type).parse();

        let index = LineIndex::new(source);

        if let Some(error) = errors.first() {
            let location = error
                .labels
                .as_ref()
                .and_then(|labels| labels.first())
                .map(|label| index.line_column(label.offset() as u32, source));
            return Err(ParseFailure {
                message: error.message.to_string(),
                location,
            });
        }

        let mut collector = SpecifierCollector::new(source, &index, mode);
        collector.visit_program(&program);
        Ok(collector.into_specifiers())
    }
}

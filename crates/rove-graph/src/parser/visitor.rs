//! AST visitor that collects import/require specifiers.

use oxc_ast::ast::{
    CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression, ImportDeclaration,
    ImportExpression, StringLiteral,
};
use oxc_ast_visit::{Visit, walk};
use oxc_span::{GetSpan, Span};

use super::{ParseMode, Specifier};
use crate::naming::LineIndex;

/// Collects specifier expressions in AST visitation order.
///
/// `require` calls are matched by callee name only. A local binding that
/// shadows `require` is still treated as a require call.
pub(super) struct SpecifierCollector<'s> {
    source: &'s str,
    index: &'s LineIndex,
    mode: ParseMode,
    specifiers: Vec<Specifier>,
}

impl<'s> SpecifierCollector<'s> {
    pub(super) fn new(source: &'s str, index: &'s LineIndex, mode: ParseMode) -> Self {
        Self {
            source,
            index,
            mode,
            specifiers: Vec::new(),
        }
    }

    pub(super) fn into_specifiers(self) -> Vec<Specifier> {
        self.specifiers
    }

    fn location(&self, span: Span) -> (u32, u32) {
        self.index.line_column(span.start, self.source)
    }

    fn push_literal(&mut self, literal: &StringLiteral<'_>) {
        let (line, column) = self.location(literal.span);
        self.specifiers.push(Specifier::Literal {
            value: literal.value.to_string(),
            line,
            column,
        });
    }

    fn push_dynamic(&mut self, span: Span) {
        let (line, column) = self.location(span);
        self.specifiers.push(Specifier::Dynamic { line, column });
    }

    fn push_expression(&mut self, expression: &Expression<'_>) {
        match expression {
            Expression::StringLiteral(literal) => self.push_literal(literal),
            other => self.push_dynamic(other.span()),
        }
    }

    fn is_require_call(&self, call: &CallExpression<'_>) -> bool {
        self.mode == ParseMode::Script
            && !call.arguments.is_empty()
            && matches!(&call.callee, Expression::Identifier(ident) if ident.name.as_str() == "require")
    }
}

impl<'a> Visit<'a> for SpecifierCollector<'_> {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        self.push_literal(&it.source);
        walk::walk_import_declaration(self, it);
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &it.source {
            self.push_literal(source);
        }
        walk::walk_export_named_declaration(self, it);
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        self.push_literal(&it.source);
        walk::walk_export_all_declaration(self, it);
    }

    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        self.push_expression(&it.source);
        walk::walk_import_expression(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if self.is_require_call(it) {
            let argument = &it.arguments[0];
            match argument.as_expression() {
                Some(expression) => self.push_expression(expression),
                // Spread arguments
                None => self.push_dynamic(argument.span()),
            }
        }
        walk::walk_call_expression(self, it);
    }
}

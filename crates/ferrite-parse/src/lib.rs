//! Error-tolerant parser producing lossless syntax trees.

pub mod factory;
mod grammar;
mod parser;
#[cfg(test)]
mod tests;

use std::fmt::Write as _;

use ferrite_errors::Diagnostic;
use ferrite_yellow::ast::{self, AstNode as _};
use ferrite_yellow::{SyntaxNode, SyntaxTree};

/// Result of parsing a file: the tree and the problems found on the way.
///
/// Parsing never fails; malformed input produces `ERROR` nodes, missing
/// children and diagnostics.
#[derive(Debug, salsa::Update)]
pub struct Parse {
    tree: SyntaxTree,
    errors: Vec<Diagnostic>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn syntax_node(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    pub fn source_file(&self) -> ast::SourceFile<'_> {
        ast::SourceFile::from_syntax(self.tree.root())
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Tree dump followed by the diagnostics, one per line.
    pub fn debug_dump(&self) -> String {
        let mut out = self.syntax_node().debug_dump();
        out.push_str("Errors:\n");
        for error in &self.errors {
            _ = writeln!(out, "  {:?}: {}", error.range(), error.message());
        }
        out
    }
}

pub fn parse(text: &str) -> Parse {
    let mut parser = parser::Parser::new(text);
    grammar::items::source_file(&mut parser);
    let (tree, errors) = parser.finish();

    tracing::debug!(
        len = text.len(),
        items = tree.root().children().filter(|node| ast::Item::can_cast(node.kind())).count(),
        errors = errors.len(),
        "parsed source file"
    );
    Parse { tree, errors }
}

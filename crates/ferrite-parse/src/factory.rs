//! Builds standalone typed nodes from source snippets.
//!
//! Each constructor places the snippet into a small template file, parses it
//! and points at the node the snippet became. Snippets that do not parse
//! cleanly into exactly one node of the requested production yield `None`.

use ferrite_yellow::ast::{self, AstNode};
use ferrite_yellow::{SyntaxKind, SyntaxNode, SyntaxNodePtr, SyntaxSet};
use text_size::TextSize;

use crate::{Parse, parse};

/// An owned parse together with the node that was asked for.
#[derive(Debug)]
pub struct Fragment {
    parse: Parse,
    ptr: SyntaxNodePtr,
}

impl Fragment {
    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn kind(&self) -> SyntaxKind {
        self.ptr.kind
    }

    pub fn syntax(&self) -> SyntaxNode<'_> {
        self.ptr.to_node(self.parse.syntax_node())
    }

    pub fn cast<'a, N: AstNode<'a>>(&'a self) -> Option<N> {
        N::cast(self.syntax())
    }
}

pub fn expression(text: &str) -> Option<Fragment> {
    from_template("fn f() { let _ = ", text, "; }", ast::Expr::KINDS)
}

pub fn statement(text: &str) -> Option<Fragment> {
    from_template("fn f() { ", text, " }", ast::Stmt::KINDS)
}

pub fn let_stmt(pat: &str, initializer: Option<&str>) -> Option<Fragment> {
    match initializer {
        Some(initializer) => statement(&format!("let {pat} = {initializer};")),
        None => statement(&format!("let {pat};")),
    }
}

pub fn pattern(text: &str) -> Option<Fragment> {
    from_template("fn f() { let ", text, " = x; }", ast::Pat::KINDS)
}

pub fn block_expr(stmts: &str) -> Option<Fragment> {
    expression(&format!("{{ {stmts} }}"))
        .filter(|fragment| fragment.kind() == SyntaxKind::BLOCK_EXPR)
}

pub fn fn_item(text: &str) -> Option<Fragment> {
    item(text, SyntaxKind::FN_ITEM)
}

pub fn use_item(path: &str) -> Option<Fragment> {
    item(&format!("use {path};"), SyntaxKind::USE_ITEM)
}

/// `mod name;` without `items`, an inline module otherwise.
pub fn mod_item(name: &str, items: Option<&str>) -> Option<Fragment> {
    match items {
        Some(items) => item(&format!("mod {name} {{ {items} }}"), SyntaxKind::MOD_ITEM),
        None => item(&format!("mod {name};"), SyntaxKind::MOD_ITEM),
    }
}

/// `#[path]`, attached to a placeholder item.
pub fn outer_attr(path: &str) -> Option<Fragment> {
    from_template("", &format!("#[{path}]"), "\nfn f() {}", SyntaxSet::new([SyntaxKind::ATTR]))
}

fn item(text: &str, kind: SyntaxKind) -> Option<Fragment> {
    from_template("", text, "", SyntaxSet::new([kind]))
}

fn from_template(prefix: &str, snippet: &str, suffix: &str, kinds: SyntaxSet) -> Option<Fragment> {
    let snippet = snippet.trim();
    let parse = parse(&format!("{prefix}{snippet}{suffix}"));
    if parse.has_errors() {
        tracing::debug!(snippet, errors = parse.errors().len(), "snippet did not parse cleanly");
        return None;
    }

    let start = TextSize::of(prefix);
    let ptr = parse
        .syntax_node()
        .descendants()
        .find(|node| {
            kinds.contains(node.kind())
                && node.trimmed_range().start() == start
                && node.text_trimmed() == snippet
        })
        .map(SyntaxNodePtr::new)?;

    Some(Fragment { parse, ptr })
}

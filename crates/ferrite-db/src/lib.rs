//! Incremental inputs and the queries derived from them.

use camino::Utf8PathBuf;
pub use ferrite_errors::Diagnostic;
use ferrite_parse::Parse;
use ferrite_yellow::SyntaxNode;
use ferrite_yellow::ast::{self, AstNode as _};
use ferrite_yellow::query::{children_of, descendants_of};
pub use line_index::{LineCol, LineIndex};
use rustc_hash::FxHashSet;

#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {}

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    /// Syntax tree of the current text. A new revision of the text yields a
    /// new tree; trees handed out earlier stay valid for their revision.
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn parse(self, db: &dyn salsa::Database) -> Parse {
        let _span = tracing::debug_span!("parse", path = %self.path(db)).entered();
        ferrite_parse::parse(self.text(db))
    }

    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

/// Parse diagnostics followed by item-level checks, sorted by position.
#[salsa::tracked(returns(ref), no_eq)]
pub fn check_file(db: &dyn salsa::Database, file: File) -> Vec<Diagnostic> {
    let parse = file.parse(db);
    let mut diagnostics = parse.errors().to_owned();

    duplicate_items(parse.syntax_node(), &mut diagnostics);
    for module in descendants_of::<ast::ModItem<'_>>(parse.syntax_node()) {
        if let Some(list) = module.item_list() {
            duplicate_items(list.syntax(), &mut diagnostics);
        }
    }

    diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
    diagnostics
}

/// Reports every item whose name was already defined by an earlier item of
/// the same scope.
fn duplicate_items(scope: SyntaxNode<'_>, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = FxHashSet::default();
    for item in children_of::<ast::Item<'_>>(scope) {
        let Some(name) = item.name() else { continue };
        if !seen.insert(name.text()) {
            diagnostics.push(Diagnostic::error(
                format!("the name `{}` is defined multiple times", name.text()),
                name.syntax().trimmed_range(),
            ));
        }
    }
}

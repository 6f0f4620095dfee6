use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use expect_test::expect;
use text_size::{TextRange, TextSize};

use crate::SyntaxKind::{self, *};
use crate::ast::{self, AnyVisitor, AstNode, Visitor};
use crate::query::{
    ancestors_of, child_token, child_token_in, children_of, covering_node_of, descendants_of,
    first_child_of, parent_of_type,
};
use crate::{
    Builder, SyntaxNode, SyntaxNodePtr, SyntaxSet, SyntaxTree, TriviaPiece, TriviaPieceKind,
    WalkEvent,
};

enum Element {
    Node(SyntaxKind, Vec<Element>),
    /// Leading spaces become whitespace trivia.
    Token(SyntaxKind, &'static str),
}

fn node(kind: SyntaxKind, children: impl IntoIterator<Item = Element>) -> Element {
    Element::Node(kind, children.into_iter().collect())
}

fn token(kind: SyntaxKind, text: &'static str) -> Element {
    Element::Token(kind, text)
}

fn ident_pat(text: &'static str) -> Element {
    node(IDENT_PAT, [node(NAME, [token(IDENT, text)])])
}

fn build(root: &Element) -> SyntaxTree {
    fn collect(element: &Element, text: &mut String) {
        match element {
            Element::Node(_, children) => children.iter().for_each(|child| collect(child, text)),
            Element::Token(_, token) => text.push_str(token),
        }
    }

    fn push(builder: &mut Builder, element: &Element) {
        match element {
            Element::Node(kind, children) => {
                builder.start_node(*kind);
                for child in children {
                    push(builder, child);
                }
                builder.finish_node();
            }
            Element::Token(kind, text) => {
                let trimmed = text.trim_start();
                let leading = (trimmed.len() != text.len()).then(|| {
                    TriviaPiece::new(
                        TriviaPieceKind::Whitespace,
                        TextSize::of(&text[..text.len() - trimmed.len()]),
                    )
                });
                builder.token(leading.as_slice(), *kind, TextSize::of(trimmed), &[]);
            }
        }
    }

    let mut text = String::new();
    collect(root, &mut text);
    let mut builder = Builder::new(&text);
    push(&mut builder, root);
    builder.finish()
}

/// `(a, _, (b, c))`
fn nested_tuple() -> SyntaxTree {
    build(&node(
        TUPLE_PAT,
        [
            token(LEFT_PAREN, "("),
            ident_pat("a"),
            token(COMMA, ","),
            node(WILDCARD_PAT, [token(UNDERSCORE, " _")]),
            token(COMMA, ","),
            node(
                TUPLE_PAT,
                [
                    token(LEFT_PAREN, " ("),
                    ident_pat("b"),
                    token(COMMA, ","),
                    ident_pat(" c"),
                    token(RIGHT_PAREN, ")"),
                ],
            ),
            token(RIGHT_PAREN, ")"),
        ],
    ))
}

fn kinds<'a>(nodes: impl IntoIterator<Item = impl AstNode<'a>>) -> Vec<SyntaxKind> {
    nodes.into_iter().map(|node| node.syntax().kind()).collect()
}

fn hash_of(value: impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn lossless() {
    let tree = nested_tuple();
    assert_eq!(tree.root().text(), "(a, _, (b, c))");
    assert_eq!(tree.text(), "(a, _, (b, c))");
}

#[test]
fn tuple_pattern_sub_patterns() {
    let tree = nested_tuple();
    let tuple = ast::TuplePat::cast(tree.root()).unwrap();

    assert_eq!(kinds(tuple.pats()), [IDENT_PAT, WILDCARD_PAT, TUPLE_PAT]);

    let Some(ast::Pat::TuplePat(inner)) = tuple.pats().nth(2) else {
        panic!("third sub-pattern should be a tuple pattern");
    };
    let names: Vec<_> = inner
        .pats()
        .filter_map(|pat| match pat {
            ast::Pat::IdentPat(it) => it.name(),
            _ => None,
        })
        .map(|name| name.text())
        .collect();
    assert_eq!(names, ["b", "c"]);
}

#[test]
fn empty_tuple_pattern() {
    let tree = build(&node(TUPLE_PAT, [token(LEFT_PAREN, "("), token(RIGHT_PAREN, ")")]));
    let tuple = ast::TuplePat::cast(tree.root()).unwrap();

    assert_eq!(tuple.pats().count(), 0);
    assert_eq!(first_child_of::<ast::Pat<'_>>(tree.root()), None);
    expect![[r#"
        TUPLE_PAT@0..2
          LEFT_PAREN@0..1 "("
          RIGHT_PAREN@1..2 ")"
    "#]]
    .assert_eq(&tree.root().debug_dump());
}

#[test]
fn misplaced_kind_is_empty_not_error() {
    let tree = nested_tuple();
    assert_eq!(children_of::<ast::Item<'_>>(tree.root()).count(), 0);
    assert_eq!(descendants_of::<ast::FnItem<'_>>(tree.root()).count(), 0);
    assert_eq!(first_child_of::<ast::SourceFile<'_>>(tree.root()), None);
}

#[test]
fn children_follow_document_order() {
    let tree = nested_tuple();
    let root = tree.root();

    let children: Vec<ast::Pat<'_>> = children_of(root).collect();
    assert_eq!(children.len(), root.children().filter(|n| ast::Pat::can_cast(n.kind())).count());
    assert!(children.windows(2).all(|pair| {
        pair[0].syntax().text_range().end() <= pair[1].syntax().text_range().start()
    }));
    assert_eq!(first_child_of::<ast::Pat<'_>>(root), children.first().copied());
}

#[test]
fn wrapping_is_idempotent() {
    let tree = nested_tuple();
    let root = tree.root();

    let first = ast::TuplePat::cast(root).unwrap();
    let second = ast::TuplePat::cast(root).unwrap();
    assert_eq!(first, second);
    assert_eq!(hash_of(first), hash_of(second));
    assert_eq!(ast::Pat::cast(root), Some(ast::Pat::TuplePat(first)));
    assert_eq!(ast::TuplePat::from_syntax(root), first);

    let inner: ast::TuplePat<'_> = descendants_of(root).next().unwrap();
    assert_ne!(first, inner);
    assert_eq!(ast::IdentPat::cast(root), None);

    // Same shape, different tree.
    let other = nested_tuple();
    assert_ne!(ast::TuplePat::cast(other.root()), Some(first));
}

#[test]
fn unknown_kinds_are_skipped() {
    let tree = build(&node(
        TUPLE_PAT,
        [
            token(LEFT_PAREN, "("),
            ident_pat("a"),
            token(COMMA, ","),
            node(ERROR, [token(UNKNOWN, " ?")]),
            token(COMMA, ","),
            ident_pat(" b"),
            token(RIGHT_PAREN, ")"),
        ],
    ));
    let root = tree.root();

    assert_eq!(root.children().count(), 3);
    assert_eq!(kinds(children_of::<ast::Pat<'_>>(root)), [IDENT_PAT, IDENT_PAT]);
    assert_eq!(descendants_of::<ast::Name<'_>>(root).count(), 2);
}

#[test]
fn descendants_are_strict_and_preorder() {
    let tree = nested_tuple();
    let root = tree.root();

    let names: Vec<_> = descendants_of::<ast::Name<'_>>(root).map(|name| name.text()).collect();
    assert_eq!(names, ["a", "b", "c"]);

    let tuples: Vec<ast::TuplePat<'_>> = descendants_of(root).collect();
    assert_eq!(tuples.len(), 1);
    assert_eq!(tuples[0].syntax().text_trimmed(), "(b, c)");

    let preorder: Vec<_> = root
        .preorder()
        .filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
        .skip(1)
        .collect();
    assert_eq!(preorder, root.descendants().collect::<Vec<_>>());
}

#[test]
fn navigation() {
    let tree = nested_tuple();
    let root = tree.root();
    let name_b: ast::Name<'_> = descendants_of(root).nth(1).unwrap();
    let inner: ast::TuplePat<'_> = descendants_of(root).next().unwrap();

    assert_eq!(parent_of_type::<ast::TuplePat<'_>>(name_b.syntax()), Some(inner));
    assert_eq!(
        ancestors_of::<ast::TuplePat<'_>>(name_b.syntax()).collect::<Vec<_>>(),
        [inner, ast::TuplePat::cast(root).unwrap()]
    );
    assert_eq!(parent_of_type::<ast::TuplePat<'_>>(root), None);

    let paren = child_token(inner.syntax(), LEFT_PAREN).unwrap();
    assert_eq!(paren.text_trimmed(), "(");
    assert_eq!(paren.text(), " (");
    assert_eq!(child_token(inner.syntax(), SEMICOLON), None);
}

#[test]
fn literal_token_skips_trivia() {
    let tree = build(&node(LITERAL, [token(INT_NUMBER, "  42")]));
    let literal = ast::Literal::cast(tree.root()).unwrap();

    let int = literal.token().unwrap();
    assert_eq!(int.kind(), INT_NUMBER);
    assert_eq!(int.text_trimmed(), "42");
    assert!(matches!(literal.kind(), Some(ast::LiteralKind::Int(it)) if it == int));

    assert_eq!(child_token_in(tree.root(), &SyntaxSet::new([STRING, TRUE_KW])), None);
}

#[test]
fn token_navigation() {
    let tree = nested_tuple();
    let root = tree.root();
    let inner: ast::TuplePat<'_> = descendants_of(root).next().unwrap();

    let first = inner.syntax().first_token().unwrap();
    assert!(first.is_trivia());
    assert_eq!(first.prev_token().map(|t| t.kind()), Some(COMMA));
    assert_eq!(first.next_token().map(|t| t.kind()), Some(LEFT_PAREN));
    assert_eq!(inner.syntax().last_token().map(|t| t.kind()), Some(RIGHT_PAREN));

    let open = root.first_token().unwrap();
    assert_eq!(open.kind(), LEFT_PAREN);
    assert_eq!(open.prev_token(), None);
    assert_eq!(open.parent(), root);
}

#[test]
fn preorder_skip_subtree() {
    let tree = nested_tuple();
    let mut entered = Vec::new();
    let mut preorder = tree.root().preorder();

    while let Some(event) = preorder.next() {
        if let WalkEvent::Enter(node) = event {
            entered.push(node.kind());
            if node.kind() == TUPLE_PAT && node.parent().is_some() {
                preorder.skip_subtree();
            }
        }
    }

    assert_eq!(entered, [TUPLE_PAT, IDENT_PAT, NAME, WILDCARD_PAT, TUPLE_PAT]);
}

#[test]
fn offsets_and_ranges() {
    let tree = nested_tuple();
    let root = tree.root();
    let inner: ast::TuplePat<'_> = descendants_of(root).next().unwrap();

    assert_eq!(inner.syntax().text_range(), TextRange::new(6.into(), 13.into()));
    assert_eq!(inner.syntax().trimmed_range(), TextRange::new(7.into(), 13.into()));

    let at = root.token_at_offset(8.into());
    assert_eq!(at.clone().left_biased().map(|t| t.kind()), Some(LEFT_PAREN));
    assert_eq!(at.right_biased().map(|t| t.kind()), Some(IDENT));

    let b = TextRange::new(8.into(), 9.into());
    assert_eq!(covering_node_of::<ast::Pat<'_>>(root, b).map(|p| p.syntax().text_trimmed()), Some("b"));
    assert_eq!(
        covering_node_of::<ast::TuplePat<'_>>(root, TextRange::new(8.into(), 12.into())),
        Some(inner)
    );
    assert_eq!(covering_node_of::<ast::Pat<'_>>(root, TextRange::new(20.into(), 21.into())), None);

    let ptr = SyntaxNodePtr::new(inner.syntax());
    assert_eq!(ptr.to_node(root), inner.syntax());
    assert_eq!(ptr.try_to_node(inner.syntax()), None);
}

#[derive(Default)]
struct Recorder {
    calls: Vec<&'static str>,
}

impl<'a> Visitor<'a> for Recorder {
    fn visit_node(&mut self, node: SyntaxNode<'a>) {
        self.calls.push(node.kind().raw_name());
    }

    fn visit_pat(&mut self, _pat: ast::Pat<'a>) {
        self.calls.push("pat");
    }

    fn visit_ident_pat(&mut self, _pat: ast::IdentPat<'a>) {
        self.calls.push("ident_pat");
    }
}

impl<'a> AnyVisitor<'a> for Recorder {
    fn visit_any(&mut self, _node: SyntaxNode<'a>) {
        self.calls.push("any");
    }

    fn as_typed(&mut self) -> Option<&mut dyn Visitor<'a>> {
        Some(self)
    }
}

#[derive(Default)]
struct GenericOnly {
    seen: Vec<SyntaxKind>,
}

impl<'a> Visitor<'a> for GenericOnly {
    fn visit_node(&mut self, node: SyntaxNode<'a>) {
        self.seen.push(node.kind());
    }
}

#[derive(Default)]
struct Untyped {
    seen: Vec<SyntaxKind>,
}

impl<'a> AnyVisitor<'a> for Untyped {
    fn visit_any(&mut self, node: SyntaxNode<'a>) {
        self.seen.push(node.kind());
    }
}

#[test]
fn defaults_fall_through_to_category_then_generic() {
    let tree = nested_tuple();
    let mut recorder = Recorder::default();
    ast::walk(tree.root(), &mut recorder);

    assert_eq!(
        recorder.calls,
        ["pat", "ident_pat", "NAME", "pat", "pat", "ident_pat", "NAME", "ident_pat", "NAME"]
    );
}

#[test]
fn generic_only_visitor_sees_every_node() {
    let tree = build(&node(
        TUPLE_PAT,
        [token(LEFT_PAREN, "("), node(ERROR, [token(UNKNOWN, "?")]), token(RIGHT_PAREN, ")")],
    ));
    let mut visitor = GenericOnly::default();
    ast::walk(tree.root(), &mut visitor);
    assert_eq!(visitor.seen, [TUPLE_PAT, ERROR]);

    let tree = nested_tuple();
    let mut visitor = GenericOnly::default();
    ast::walk(tree.root(), &mut visitor);
    let expected: Vec<_> = std::iter::once(tree.root())
        .chain(tree.root().descendants())
        .map(|node| node.kind())
        .collect();
    assert_eq!(visitor.seen, expected);
}

#[test]
fn dispatch_is_deterministic() {
    let tree = nested_tuple();
    for node in tree.root().descendants() {
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        ast::dispatch(node, &mut first);
        ast::dispatch(node, &mut second);
        assert_eq!(first.calls.len(), 1);
        assert_eq!(first.calls, second.calls);
    }
}

#[test]
fn category_accept_reaches_concrete_method() {
    let tree = nested_tuple();
    let pats: Vec<ast::Pat<'_>> = descendants_of(tree.root()).collect();

    let mut recorder = Recorder::default();
    for pat in &pats {
        pat.accept(&mut recorder);
    }
    assert_eq!(recorder.calls, ["ident_pat", "pat", "pat", "ident_pat", "ident_pat"]);
}

#[test]
fn accept_any_uses_typed_capability_when_present() {
    let tree = nested_tuple();
    let pat: ast::IdentPat<'_> = descendants_of(tree.root()).next().unwrap();

    let mut untyped = Untyped::default();
    pat.accept_any(&mut untyped);
    assert_eq!(untyped.seen, [IDENT_PAT]);

    let mut typed = Recorder::default();
    pat.accept_any(&mut typed);
    ast::dispatch_any(tree.root(), &mut typed);
    ast::dispatch_any(tree.root(), &mut untyped);
    assert_eq!(typed.calls, ["ident_pat", "pat"]);
    assert_eq!(untyped.seen, [IDENT_PAT, TUPLE_PAT]);
}

//! Generic typed queries over the untyped tree.
//!
//! Every query is generic over the wanted wrapper kind and filters by
//! [`AstNode::cast`], so nodes of unknown or unwrapped kinds (such as `ERROR`)
//! are skipped silently. Asking for a kind the grammar never places under a
//! node yields an empty result, not an error.
//!
//! Sequences are lazy: nothing is wrapped before the caller pulls it, and
//! dropping the iterator stops the walk.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use text_size::TextRange;

use crate::ast::AstNode;
use crate::syntax::{Children, DescendantNodes};
use crate::{NodeOrToken, SyntaxKind, SyntaxNode, SyntaxSet, SyntaxToken};

/// Direct child nodes castable to `N`, in document order.
#[derive(Clone)]
pub struct AstChildren<'a, N> {
    inner: Children<'a>,
    _marker: PhantomData<N>,
}

impl<'a, N: AstNode<'a>> Iterator for AstChildren<'a, N> {
    type Item = N;

    #[inline]
    fn next(&mut self) -> Option<N> {
        self.inner.find_map(N::cast)
    }
}

impl<'a, N: AstNode<'a>> FusedIterator for AstChildren<'a, N> {}

/// Strict descendants castable to `N`, in pre-order.
#[derive(Clone)]
pub struct Descendants<'a, N> {
    inner: DescendantNodes<'a>,
    _marker: PhantomData<N>,
}

impl<'a, N: AstNode<'a>> Iterator for Descendants<'a, N> {
    type Item = N;

    #[inline]
    fn next(&mut self) -> Option<N> {
        self.inner.find_map(N::cast)
    }
}

impl<'a, N: AstNode<'a>> FusedIterator for Descendants<'a, N> {}

/// Direct children of `node` that are of kind `N`. Tokens are not children.
#[inline]
pub fn children_of<'a, N: AstNode<'a>>(node: SyntaxNode<'a>) -> AstChildren<'a, N> {
    AstChildren { inner: node.children(), _marker: PhantomData }
}

/// The first direct child of kind `N`.
#[inline]
pub fn first_child_of<'a, N: AstNode<'a>>(node: SyntaxNode<'a>) -> Option<N> {
    children_of(node).next()
}

/// Every node of kind `N` strictly below `node`, in pre-order.
#[inline]
pub fn descendants_of<'a, N: AstNode<'a>>(node: SyntaxNode<'a>) -> Descendants<'a, N> {
    Descendants { inner: node.descendants(), _marker: PhantomData }
}

/// Strict ancestors of kind `N`, nearest first.
#[inline]
pub fn ancestors_of<'a, N: AstNode<'a>>(node: SyntaxNode<'a>) -> impl Iterator<Item = N> + Clone {
    node.ancestors().skip(1).filter_map(N::cast)
}

/// The nearest strict ancestor of kind `N`.
#[inline]
pub fn parent_of_type<'a, N: AstNode<'a>>(node: SyntaxNode<'a>) -> Option<N> {
    ancestors_of(node).next()
}

/// The first direct token of `kind`.
#[inline]
pub fn child_token(node: SyntaxNode<'_>, kind: SyntaxKind) -> Option<SyntaxToken<'_>> {
    node.children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|token| token.kind() == kind)
}

/// The first direct token whose kind is in `kinds`.
#[inline]
pub fn child_token_in<'a>(node: SyntaxNode<'a>, kinds: &SyntaxSet) -> Option<SyntaxToken<'a>> {
    node.children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|token| kinds.contains(token.kind()))
}

/// The innermost node of kind `N` whose range covers `range`.
///
/// Returns `None` when `range` lies outside `root`.
pub fn covering_node_of<'a, N: AstNode<'a>>(root: SyntaxNode<'a>, range: TextRange) -> Option<N> {
    if !root.text_range().contains_range(range) {
        return None;
    }
    let start = match root.covering_element(range) {
        NodeOrToken::Node(node) => node,
        NodeOrToken::Token(token) => token.parent(),
    };
    start.ancestors().find_map(N::cast)
}

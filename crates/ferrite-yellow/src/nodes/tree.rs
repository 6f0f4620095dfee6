use super::node::{Child, Node};
use super::token::Token;

/// Flat storage behind a `SyntaxTree`.
#[derive(Debug)]
pub(crate) struct TreeInner {
    pub(crate) text: Box<str>,
    /// Always starts with a fake token.
    pub(crate) tokens: Box<[Token]>,
    /// Pre-order; index 0 is the root.
    pub(crate) nodes: Box<[Node]>,
    pub(crate) node_children: Box<[Child]>,
}

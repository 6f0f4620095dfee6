//! Lossless, immutable syntax tree with parent links, attached trivia and a
//! typed layer on top.
//!
//! The tree is built once and then navigated by index-based,
//! lifetime-guided handles without allocation or refcounting. Typed wrappers
//! ([`ast`]) are created on demand by the generic [`query`] functions.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod element;
mod nodes;
/// Generic typed queries over the untyped tree.
pub mod query;
mod registry;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::Builder;
pub use element::{NodeOrToken, TokenAtOffset};
/// Production names and categories.
pub use registry::{Category, KindRegistry, RegistryError};
/// Primary syntax tree API types and adapters.
pub use syntax::{
    Children, ChildrenWithTokens, DescendantNodes, Preorder, PreorderWithTokens, SyntaxElement,
    SyntaxNode, SyntaxNodePtr, SyntaxToken, SyntaxTree, TriviaIter, WalkEvent,
    WalkEventWithTokens,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{TriviaPiece, TriviaPieceKind};

#[cfg(test)]
mod tests;

//! Node storage and child slots.

use std::ops::Range;

use text_size::{TextRange, TextSize};

use super::tree::TreeInner;
use crate::{NodeOrToken, SyntaxKind, TokenAtOffset};

/// Raw node stored in the tree arena.
///
/// Nodes are stored in pre-order, so the descendants of a node occupy the
/// contiguous index range `index + 1..subtree_end`.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) kind: SyntaxKind,
    pub(crate) parent: Option<u32>,
    pub(crate) children: Range<u32>,
    /// Half-open range into the token arena, trivia included.
    pub(crate) tokens: Range<u32>,
    pub(crate) subtree_end: u32,
}

/// A direct child of a node: another node or a non-trivia token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Child {
    Node(u32),
    Token(u32),
}

impl TreeInner {
    #[inline]
    pub(crate) fn node(&self, index: u32) -> &Node {
        &self.nodes[index as usize]
    }

    #[inline]
    pub(crate) fn children(&self, index: u32) -> &[Child] {
        let range = &self.node(index).children;
        &self.node_children[range.start as usize..range.end as usize]
    }

    /// Returns the text range covered by the node, trivia included.
    ///
    /// A node without tokens is an empty range at the end of the previous
    /// token.
    #[inline]
    pub(crate) fn node_range(&self, index: u32) -> TextRange {
        let tokens = &self.node(index).tokens;
        let start = self.token_start(tokens.start);
        let end = if tokens.is_empty() { start } else { self.token(tokens.end - 1).end };
        TextRange::new(start, end)
    }

    /// Finds the raw token at the given offset within the node.
    pub(crate) fn token_at_offset(&self, index: u32, offset: TextSize) -> TokenAtOffset<u32> {
        let range = self.node(index).tokens.clone();
        let slice = &self.tokens[range.start as usize..range.end as usize];
        let position = slice.partition_point(|token| token.end <= offset);
        if position == slice.len() {
            return TokenAtOffset::None;
        }

        let token = range.start + position as u32;
        if self.token_start(token) > offset {
            return TokenAtOffset::None;
        }
        if position > 0 && self.token_start(token) == offset {
            TokenAtOffset::Between(token - 1, token)
        } else {
            TokenAtOffset::Single(token)
        }
    }

    /// Returns the smallest element of the subtree that fully covers `range`.
    pub(crate) fn covering_element(&self, index: u32, range: TextRange) -> NodeOrToken<u32, u32> {
        assert!(self.node_range(index).contains_range(range), "range is not inside the node");

        let Some(token) = self.token_at_offset(index, range.start()).right_biased() else {
            return NodeOrToken::Node(index);
        };
        if self.token_range(token).contains_range(range) {
            return NodeOrToken::Token(token);
        }

        let mut current = self.token(token).parent;
        while current != index {
            if self.node_range(current).contains_range(range) {
                break;
            }
            match self.node(current).parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        NodeOrToken::Node(current)
    }
}

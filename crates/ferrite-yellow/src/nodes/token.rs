//! Token storage and trivia attachment helpers.

use std::ops::Range;

use text_size::{TextRange, TextSize};

use super::tree::TreeInner;
use crate::SyntaxKind;

/// Raw token stored in the tree arena.
///
/// Only the end offset is stored; the start is the end of the previous token,
/// which is why the arena begins with a zero-length sentinel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Token {
    pub(crate) kind: SyntaxKind,
    pub(crate) attached_trivia: AttachedTrivia,
    pub(crate) end: TextSize,
    pub(crate) parent: u32,
}

/// Trivia attachment metadata. Run lengths are bounded like token indices.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AttachedTrivia {
    /// bit 0: has leading trivia, bit 1: has trailing trivia.
    flags: u8,
    /// Leading run for real tokens, trailing run for the first trailing
    /// trivia token.
    len: u32,
}

impl AttachedTrivia {
    pub(crate) const NONE: Self = Self { flags: 0, len: 0 };

    #[inline]
    pub(crate) fn new(
        has_leading_trivia: bool,
        has_trailing_trivia: bool,
        trivia_len: u32,
    ) -> Self {
        Self {
            flags: (u8::from(has_trailing_trivia) << 1) | u8::from(has_leading_trivia),
            len: trivia_len,
        }
    }

    #[inline]
    pub(crate) fn has_leading_trivia(self) -> bool {
        (self.flags & 0b01) != 0
    }

    #[inline]
    pub(crate) fn has_trailing_trivia(self) -> bool {
        (self.flags & 0b10) != 0
    }

    #[inline]
    pub(crate) fn trivia_len(self) -> u32 {
        self.len
    }
}

impl TreeInner {
    #[inline]
    pub(crate) fn token(&self, index: u32) -> &Token {
        &self.tokens[index as usize]
    }

    /// Start offset of a real token; index 0 is the sentinel and never asked.
    #[inline]
    pub(crate) fn token_start(&self, index: u32) -> TextSize {
        debug_assert!(index > 0, "the sentinel token has no start");
        self.tokens[index as usize - 1].end
    }

    #[inline]
    pub(crate) fn token_range(&self, index: u32) -> TextRange {
        TextRange::new(self.token_start(index), self.token(index).end)
    }

    #[inline]
    pub(crate) fn next_token(&self, index: u32) -> Option<u32> {
        let next = index + 1;
        ((next as usize) < self.tokens.len()).then_some(next)
    }

    /// Indices of the trivia tokens in front of `index`.
    #[inline]
    pub(crate) fn leading_trivia(&self, index: u32) -> Range<u32> {
        let attached = self.token(index).attached_trivia;
        if !attached.has_leading_trivia() {
            return index..index;
        }
        index - attached.trivia_len()..index
    }

    /// Indices of the trivia tokens behind `index`.
    #[inline]
    pub(crate) fn trailing_trivia(&self, index: u32) -> Range<u32> {
        let start = index + 1;
        if !self.token(index).attached_trivia.has_trailing_trivia() {
            return start..start;
        }
        let len = self.token(start).attached_trivia.trivia_len();
        start..start + len
    }
}

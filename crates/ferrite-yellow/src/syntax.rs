//! Handles into a built tree.
//!
//! A handle is a tree reference plus an arena index, so it is `Copy`, never
//! allocates, and compares by the node it points at.

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::ops::Range;

use text_size::{TextRange, TextSize};

use crate::nodes::{Child, TreeInner};
use crate::{NodeOrToken, SyntaxKind, TokenAtOffset};

/// A parsed source text and its node and token arenas.
pub struct SyntaxTree {
    pub(crate) tree: TreeInner,
}

impl SyntaxTree {
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: &self.tree, index: 0 }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.tree.text
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.text().len())
            .field("nodes", &self.tree.nodes.len())
            .finish_non_exhaustive()
    }
}

unsafe impl salsa::Update for SyntaxTree {
    unsafe fn maybe_update(old_pointer: *mut Self, new_value: Self) -> bool {
        let old_value = unsafe { &mut *old_pointer };
        if old_value.text() == new_value.text() {
            false
        } else {
            *old_value = new_value;
            true
        }
    }
}

/// A token of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a TreeInner,
    index: u32,
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.tree.token(self.index).kind
    }

    /// Range of the token together with its attached trivia.
    #[inline]
    pub fn text_range(self) -> TextRange {
        let first = self.tree.leading_trivia(self.index).start;
        let last = self.tree.trailing_trivia(self.index).end - 1;
        TextRange::new(self.tree.token_start(first), self.tree.token(last).end)
    }

    /// Range of the token itself.
    #[inline]
    pub fn trimmed_range(self) -> TextRange {
        self.tree.token_range(self.index)
    }

    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    #[inline]
    pub fn text_trimmed(self) -> &'a str {
        &self.tree.text[self.trimmed_range()]
    }

    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    /// The preceding token in the arena; trivia tokens are not skipped.
    pub fn prev_token(self) -> Option<Self> {
        let index = self.index.checked_sub(1).filter(|&index| index > 0)?;
        Some(Self { tree: self.tree, index })
    }

    /// The following token in the arena; trivia tokens are not skipped.
    #[inline]
    pub fn next_token(self) -> Option<Self> {
        Some(Self { tree: self.tree, index: self.tree.next_token(self.index)? })
    }

    #[inline]
    pub fn leading_trivia(self) -> TriviaIter<'a> {
        TriviaIter { tree: self.tree, tokens: self.tree.leading_trivia(self.index) }
    }

    #[inline]
    pub fn trailing_trivia(self) -> TriviaIter<'a> {
        TriviaIter { tree: self.tree, tokens: self.tree.trailing_trivia(self.index) }
    }

    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, index: self.tree.token(self.index).parent }
    }
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxToken<'_> {}

impl Hash for SyntaxToken<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.index.hash(state);
    }
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?} {:?}", self.kind().raw_name(), self.trimmed_range(), self.text_trimmed())
    }
}

/// Trivia attached to one side of a token.
#[derive(Clone)]
pub struct TriviaIter<'a> {
    tree: &'a TreeInner,
    tokens: Range<u32>,
}

impl<'a> Iterator for TriviaIter<'a> {
    type Item = SyntaxToken<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(SyntaxToken { tree: self.tree, index: self.tokens.next()? })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tokens.size_hint()
    }
}

impl ExactSizeIterator for TriviaIter<'_> {}

/// A node of a [`SyntaxTree`].
///
/// Equality and hashing go by tree and node index, so re-fetching a node
/// yields an equal handle.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a TreeInner,
    index: u32,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.tree.node(self.index).kind
    }

    /// First token of the node, which may be trivia.
    #[inline]
    pub fn first_token(self) -> Option<SyntaxToken<'a>> {
        let tokens = &self.tree.node(self.index).tokens;
        (!tokens.is_empty()).then(|| SyntaxToken { tree: self.tree, index: tokens.start })
    }

    /// Last token of the node, which may be trivia.
    pub fn last_token(self) -> Option<SyntaxToken<'a>> {
        let mut tokens = self.tree.node(self.index).tokens.clone();
        tokens.next_back().map(|index| SyntaxToken { tree: self.tree, index })
    }

    /// Range of the node, trivia of its first and last tokens included.
    #[inline]
    pub fn text_range(self) -> TextRange {
        self.tree.node_range(self.index)
    }

    /// Range from the first to the last non-trivia token. Empty at the
    /// node start when there is none.
    #[inline]
    pub fn trimmed_range(self) -> TextRange {
        non_trivia_range(self)
    }

    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    #[inline]
    pub fn text_trimmed(self) -> &'a str {
        &self.tree.text[self.trimmed_range()]
    }

    #[inline]
    pub fn parent(self) -> Option<Self> {
        Some(Self { tree: self.tree, index: self.tree.node(self.index).parent? })
    }

    /// `self`, then each parent up to the root.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    #[inline]
    pub fn children_with_tokens(self) -> ChildrenWithTokens<'a> {
        ChildrenWithTokens { tree: self.tree, children: self.tree.children(self.index).iter() }
    }

    /// Child nodes in document order. Tokens are skipped.
    #[inline]
    pub fn children(self) -> Children<'a> {
        Children { inner: self.children_with_tokens() }
    }

    /// Every node below `self` in pre-order. Nodes are stored in pre-order,
    /// so this is a walk over a contiguous index range.
    #[inline]
    pub fn descendants(self) -> DescendantNodes<'a> {
        let end = self.tree.node(self.index).subtree_end;
        DescendantNodes { tree: self.tree, indices: self.index + 1..end }
    }

    #[inline]
    pub fn token_at_offset(self, offset: TextSize) -> TokenAtOffset<SyntaxToken<'a>> {
        self.tree
            .token_at_offset(self.index, offset)
            .map(|index| SyntaxToken { tree: self.tree, index })
    }

    /// Smallest element whose range contains `range`.
    ///
    /// # Panics
    ///
    /// When `range` is not inside this node.
    #[inline]
    #[track_caller]
    pub fn covering_element(self, range: TextRange) -> SyntaxElement<'a> {
        match self.tree.covering_element(self.index, range) {
            NodeOrToken::Node(index) => NodeOrToken::Node(Self { tree: self.tree, index }),
            NodeOrToken::Token(index) => NodeOrToken::Token(SyntaxToken { tree: self.tree, index }),
        }
    }

    #[inline]
    pub fn preorder(self) -> Preorder<'a> {
        Preorder::new(self)
    }

    #[inline]
    pub fn preorder_with_tokens(self) -> PreorderWithTokens<'a> {
        PreorderWithTokens::new(self)
    }

    /// Renders the subtree as an indented `KIND@range` listing, trivia
    /// included, one element per line.
    pub fn debug_dump(self) -> String {
        let mut out = String::new();
        let mut indent = 0;
        for event in self.preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    _ = writeln!(
                        out,
                        "{:indent$}{}@{:?}",
                        "",
                        node.kind().raw_name(),
                        node.text_range()
                    );
                    indent += 2;
                }
                WalkEventWithTokens::LeaveNode(_) => indent -= 2,
                WalkEventWithTokens::Token(token) => {
                    let trivia = token.leading_trivia();
                    for piece in trivia.chain(std::iter::once(token)).chain(token.trailing_trivia())
                    {
                        _ = writeln!(out, "{:indent$}{piece:?}", "");
                    }
                }
            }
        }
        out
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl Hash for SyntaxNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.index.hash(state);
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.kind().raw_name(), self.text_range())
    }
}

pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl SyntaxElement<'_> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }
}

#[derive(Clone)]
pub struct ChildrenWithTokens<'a> {
    tree: &'a TreeInner,
    children: std::slice::Iter<'a, Child>,
}

impl<'a> ChildrenWithTokens<'a> {
    #[inline]
    fn map_child(&self, child: Child) -> SyntaxElement<'a> {
        let tree = self.tree;
        match child {
            Child::Node(index) => NodeOrToken::Node(SyntaxNode { tree, index }),
            Child::Token(index) => NodeOrToken::Token(SyntaxToken { tree, index }),
        }
    }
}

impl<'a> Iterator for ChildrenWithTokens<'a> {
    type Item = SyntaxElement<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let child = *self.children.next()?;
        Some(self.map_child(child))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

impl ExactSizeIterator for ChildrenWithTokens<'_> {}

#[derive(Clone)]
pub struct Children<'a> {
    inner: ChildrenWithTokens<'a>,
}

impl<'a> Iterator for Children<'a> {
    type Item = SyntaxNode<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(NodeOrToken::into_node)
    }
}

/// See [`SyntaxNode::descendants`].
#[derive(Clone)]
pub struct DescendantNodes<'a> {
    tree: &'a TreeInner,
    indices: Range<u32>,
}

impl<'a> Iterator for DescendantNodes<'a> {
    type Item = SyntaxNode<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(SyntaxNode { tree: self.tree, index: self.indices.next()? })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for DescendantNodes<'_> {}

#[derive(Clone)]
pub struct Preorder<'a> {
    inner: PreorderWithTokens<'a>,
}

impl<'a> Preorder<'a> {
    #[inline]
    fn new(start: SyntaxNode<'a>) -> Self {
        Self { inner: PreorderWithTokens::new(start) }
    }

    /// Do not descend into the node just entered. No `Leave` event is
    /// produced for it.
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|item| match item {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEvent<'a> {
    Enter(SyntaxNode<'a>),
    Leave(SyntaxNode<'a>),
}

#[derive(Clone)]
pub struct PreorderWithTokens<'a> {
    stack: Vec<(SyntaxNode<'a>, ChildrenWithTokens<'a>)>,
    root: Option<SyntaxNode<'a>>,
}

impl<'a> PreorderWithTokens<'a> {
    #[inline]
    fn new(start: SyntaxNode<'a>) -> Self {
        Self { stack: Vec::with_capacity(32), root: Some(start) }
    }

    /// See [`Preorder::skip_subtree`].
    ///
    /// # Panics
    ///
    /// Before the first event or after the walk has finished.
    #[track_caller]
    pub fn skip_subtree(&mut self) {
        let entered = self.stack.pop();
        assert!(entered.is_some(), "no entered node to skip");
    }
}

impl<'a> Iterator for PreorderWithTokens<'a> {
    type Item = WalkEventWithTokens<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active_node)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root, root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active_node.next() {
            Some(NodeOrToken::Node(child)) => {
                self.stack.push((child, child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(NodeOrToken::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited_node, _) = self.stack.pop()?;
                Some(WalkEventWithTokens::LeaveNode(exited_node))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEventWithTokens<'a> {
    EnterNode(SyntaxNode<'a>),
    LeaveNode(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

/// A node address that does not borrow the tree: kind plus trimmed range.
///
/// Resolving it against the root of a tree with the same text finds the same
/// node again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, salsa::Update)]
pub struct SyntaxNodePtr {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl SyntaxNodePtr {
    pub fn new(node: SyntaxNode<'_>) -> Self {
        Self { kind: node.kind(), range: non_trivia_range(node) }
    }

    /// `None` when `root` is not a root or has no such node.
    pub fn try_to_node<'a>(&self, root: SyntaxNode<'a>) -> Option<SyntaxNode<'a>> {
        if root.parent().is_some() || !root.text_range().contains_range(self.range) {
            return None;
        }

        let start_node = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent(),
        };

        start_node
            .ancestors()
            .find(|node| node.kind() == self.kind && non_trivia_range(*node) == self.range)
    }

    /// # Panics
    ///
    /// When `root` has no such node.
    #[track_caller]
    pub fn to_node<'a>(&self, root: SyntaxNode<'a>) -> SyntaxNode<'a> {
        self.try_to_node(root)
            .unwrap_or_else(|| panic!("`{:?}` does not point into the tree", self))
    }
}

fn non_trivia_range(node: SyntaxNode<'_>) -> TextRange {
    let tree = node.tree;
    let tokens = tree.node(node.index).tokens.clone();
    let mut non_trivia = tokens.filter(|&token| !tree.token(token).kind.is_trivia());
    match (non_trivia.next(), non_trivia.next_back()) {
        (Some(first), Some(last)) => {
            TextRange::new(tree.token_start(first), tree.token(last).end)
        }
        (Some(only), None) => tree.token_range(only),
        _ => TextRange::empty(node.text_range().start()),
    }
}

//! Incremental builder for the immutable syntax tree.

use text_size::TextSize;

use crate::nodes::{AttachedTrivia, Child, Node, Token, TreeInner};
use crate::{SyntaxKind, SyntaxTree, TriviaPiece, TriviaPieceKind};

/// Builds a `SyntaxTree` from a stream of start/token/finish calls.
///
/// Every token must be added inside an open node, nodes must be balanced, and
/// the token lengths must add up to the source text. Violations are
/// programming errors in the producer and panic.
pub struct Builder {
    nodes: Vec<Node>,
    node_children: Vec<Child>,
    tokens: Vec<Token>,
    text: Box<str>,

    node_children_pool: Vec<Vec<Child>>,
    opened: Vec<(u32, Vec<Child>)>,
    text_len: TextSize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_TREE_SIZE: usize = 1024;
const DEFAULT_CHILDREN_LEN: usize = 10;

impl Builder {
    /// Creates a new builder for `text`.
    ///
    /// The internal token buffer is seeded with a fake token at index 0 to make
    /// token ranges uniform.
    pub fn new(text: &str) -> Self {
        let mut tokens = Vec::with_capacity(DEFAULT_TREE_SIZE);
        tokens.push(Token {
            kind: SyntaxKind::TOMBSTONE,
            attached_trivia: AttachedTrivia::NONE,
            end: TextSize::new(0),
            parent: 0,
        });
        Self {
            nodes: Vec::with_capacity(DEFAULT_TREE_SIZE),
            node_children: Vec::with_capacity(DEFAULT_TREE_SIZE),
            tokens,
            text: text.into(),

            node_children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            text_len: TextSize::new(0),
        }
    }

    /// Retrieves a recycled node-children buffer or allocates a new one.
    fn new_node_children_vec(&mut self) -> Vec<Child> {
        self.node_children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN))
    }

    /// Returns the most recently opened node.
    #[track_caller]
    fn last_opened(&mut self) -> &mut (u32, Vec<Child>) {
        self.opened.last_mut().expect("no opened nodes?")
    }

    /// Starts a new node of the given kind.
    #[track_caller]
    pub fn start_node(&mut self, kind: SyntaxKind) {
        assert!(kind.is_node(), "`{}` is a token kind, not a node kind", kind.raw_name());
        let new_node = index(self.nodes.len());
        let parent = match self.opened.last_mut() {
            Some((parent, children)) => {
                children.push(Child::Node(new_node));
                Some(*parent)
            }
            None => {
                assert!(self.nodes.is_empty(), "a tree has exactly one root node");
                None
            }
        };
        let first_token = index(self.tokens.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: 0..0,
            tokens: first_token..first_token,
            subtree_end: new_node + 1,
        });
        let children = self.new_node_children_vec();
        self.opened.push((new_node, children));
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let (node, mut children) = self.opened.pop().expect("no opened nodes?");
        let children_start = index(self.node_children.len());
        self.node_children.append(&mut children);
        self.node_children_pool.push(children);

        let token_end = index(self.tokens.len());
        let subtree_end = index(self.nodes.len());
        let node = &mut self.nodes[node as usize];
        node.children = children_start..index(self.node_children.len());
        node.tokens.end = token_end;
        node.subtree_end = subtree_end;
    }

    /// Adds a token to the innermost open node. Every trivia piece becomes a
    /// trivia token of its own, placed before or after the token.
    #[track_caller]
    pub fn token(
        &mut self,
        leading: &[TriviaPiece],
        kind: SyntaxKind,
        text_len: TextSize,
        trailing: &[TriviaPiece],
    ) {
        assert!(!kind.is_node(), "`{}` is a node kind, not a token kind", kind.raw_name());
        let parent = self.last_opened().0;

        let text = &self.text;
        let text_len_so_far = &mut self.text_len;
        let mut push_text_len = |len| {
            *text_len_so_far += len;
            let end = usize::from(*text_len_so_far);
            assert!(
                end <= text.len() && text.is_char_boundary(end),
                "token lengths overrun the source text"
            );
            *text_len_so_far
        };

        self.tokens.extend(leading.iter().map(|piece| Token {
            kind: trivia_piece_kind(piece.kind),
            attached_trivia: AttachedTrivia::NONE,
            end: push_text_len(piece.len),
            parent,
        }));
        let token = index(self.tokens.len());
        self.tokens.push(Token {
            kind,
            attached_trivia: AttachedTrivia::new(
                !leading.is_empty(),
                !trailing.is_empty(),
                index(leading.len()),
            ),
            end: push_text_len(text_len),
            parent,
        });
        self.tokens.extend(trailing.iter().enumerate().map(|(i, piece)| Token {
            kind: trivia_piece_kind(piece.kind),
            // The first trailing piece records how many follow the token.
            attached_trivia: if i == 0 {
                AttachedTrivia::new(false, false, index(trailing.len()))
            } else {
                AttachedTrivia::NONE
            },
            end: push_text_len(piece.len),
            parent,
        }));

        self.last_opened().1.push(Child::Token(token));
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    #[track_caller]
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "unbalanced `start_node`/`finish_node` calls");
        assert!(!self.nodes.is_empty(), "a tree needs a root node");
        assert_eq!(
            usize::from(self.text_len),
            self.text.len(),
            "tokens must cover the whole source text"
        );

        let tree = TreeInner {
            text: std::mem::take(&mut self.text),
            tokens: std::mem::take(&mut self.tokens).into_boxed_slice(),
            nodes: std::mem::take(&mut self.nodes).into_boxed_slice(),
            node_children: std::mem::take(&mut self.node_children).into_boxed_slice(),
        };
        tracing::trace!(
            nodes = tree.nodes.len(),
            tokens = tree.tokens.len() - 1,
            "syntax tree built"
        );
        SyntaxTree { tree }
    }
}

#[inline]
#[track_caller]
fn index(len: usize) -> u32 {
    u32::try_from(len).expect("syntax tree is too large")
}

fn trivia_piece_kind(kind: TriviaPieceKind) -> SyntaxKind {
    match kind {
        TriviaPieceKind::Whitespace => SyntaxKind::WHITESPACE,
        TriviaPieceKind::Newline => SyntaxKind::NEWLINE,
        TriviaPieceKind::SingleLineComment => SyntaxKind::LINE_COMMENT,
    }
}

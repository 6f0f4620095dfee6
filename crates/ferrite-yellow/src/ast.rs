//! Typed views over untyped syntax nodes.
//!
//! A typed node is a `Copy` newtype around exactly one [`SyntaxNode`] whose
//! kind it accepts. Wrappers hold no state of their own: every accessor is a
//! [`query`](crate::query) over the underlying node, so wrapping the same node
//! twice yields equal values.

mod categories;
mod nodes;
mod visitor;

pub(crate) use categories::CATEGORIES;
pub use categories::{Expr, Item, Pat, Stmt, Type};
pub use nodes::*;
pub use visitor::{AnyVisitor, Visitor, dispatch, dispatch_any, walk};

use crate::{SyntaxKind, SyntaxNode};

/// Contract shared by every typed node, concrete or category.
pub trait AstNode<'a>: Copy {
    /// Returns `true` when nodes of `kind` can be viewed as `Self`.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// Views `syntax` as `Self`, or returns `None` on a kind mismatch.
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>;

    fn syntax(self) -> SyntaxNode<'a>;

    /// Calls the visitor method of this node's concrete production.
    fn accept<V: Visitor<'a> + ?Sized>(self, visitor: &mut V);

    /// Double dispatch through the untyped visitor protocol.
    ///
    /// Visitors that expose the typed capability are re-dispatched through
    /// [`AstNode::accept`]; all others receive the untyped node.
    fn accept_any(self, visitor: &mut dyn AnyVisitor<'a>) {
        if let Some(typed) = visitor.as_typed() {
            self.accept(typed);
            return;
        }
        visitor.visit_any(self.syntax());
    }
}

macro_rules! ast_node {
    ($(#[$attr:meta])* $name:ident($kind:ident) => $visit:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name<'a>(SyntaxNode<'a>);

        impl<'a> $name<'a> {
            /// Wraps a node already known to be of the right kind.
            #[inline]
            #[track_caller]
            pub fn from_syntax(syntax: SyntaxNode<'a>) -> Self {
                debug_assert_eq!(
                    syntax.kind(),
                    SyntaxKind::$kind,
                    concat!("`", stringify!($name), "` wraps only `", stringify!($kind), "` nodes"),
                );
                Self(syntax)
            }
        }

        impl<'a> AstNode<'a> for $name<'a> {
            #[inline]
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            #[inline]
            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                Self::can_cast(syntax.kind()).then_some(Self(syntax))
            }

            #[inline]
            fn syntax(self) -> SyntaxNode<'a> {
                self.0
            }

            #[inline]
            fn accept<V: Visitor<'a> + ?Sized>(self, visitor: &mut V) {
                visitor.$visit(self)
            }
        }
    };
}

use ast_node;

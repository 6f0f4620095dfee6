//! Polymorphic wrapper kinds.
//!
//! A category is a closed set of concrete productions. Each is an enum over
//! the concrete wrappers plus the `SyntaxSet` of its member kinds; a concrete
//! production belongs to at most one category.

use super::*;
use crate::{SyntaxKind, SyntaxNode, SyntaxSet};

macro_rules! ast_category {
    (
        $(#[$attr:meta])*
        $name:ident => $label:literal {
            $($variant:ident($kind:ident)),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name<'a> {
            $($variant($variant<'a>),)*
        }

        impl $name<'_> {
            /// Name of the category as understood by the registry.
            pub const NAME: &'static str = $label;

            /// Kinds of every member production.
            pub const KINDS: SyntaxSet = SyntaxSet::new([$(SyntaxKind::$kind),*]);
        }

        impl<'a> AstNode<'a> for $name<'a> {
            #[inline]
            fn can_cast(kind: SyntaxKind) -> bool {
                Self::KINDS.contains(kind)
            }

            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                match syntax.kind() {
                    $(SyntaxKind::$kind => Some(Self::$variant($variant::from_syntax(syntax))),)*
                    _ => None,
                }
            }

            fn syntax(self) -> SyntaxNode<'a> {
                match self {
                    $(Self::$variant(it) => it.syntax(),)*
                }
            }

            fn accept<V: Visitor<'a> + ?Sized>(self, visitor: &mut V) {
                match self {
                    $(Self::$variant(it) => it.accept(visitor),)*
                }
            }
        }

        $(
            impl<'a> From<$variant<'a>> for $name<'a> {
                #[inline]
                fn from(node: $variant<'a>) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

ast_category! {
    /// Any pattern.
    Pat => "Pat" {
        IdentPat(IDENT_PAT),
        WildcardPat(WILDCARD_PAT),
        TuplePat(TUPLE_PAT),
        RefPat(REF_PAT),
        LiteralPat(LITERAL_PAT),
        RestPat(REST_PAT),
    }
}

ast_category! {
    /// Any item that may appear in a file or an inline module.
    Item => "Item" {
        FnItem(FN_ITEM),
        StructItem(STRUCT_ITEM),
        ConstItem(CONST_ITEM),
        UseItem(USE_ITEM),
        ModItem(MOD_ITEM),
    }
}

ast_category! {
    Expr => "Expr" {
        Literal(LITERAL),
        PathExpr(PATH_EXPR),
        TupleExpr(TUPLE_EXPR),
        ParenExpr(PAREN_EXPR),
        BinaryExpr(BINARY_EXPR),
        CallExpr(CALL_EXPR),
        RefExpr(REF_EXPR),
        BlockExpr(BLOCK_EXPR),
    }
}

ast_category! {
    Type => "Type" {
        PathType(PATH_TYPE),
        TupleType(TUPLE_TYPE),
        RefType(REF_TYPE),
    }
}

ast_category! {
    Stmt => "Stmt" {
        LetStmt(LET_STMT),
        ExprStmt(EXPR_STMT),
    }
}

impl<'a> Item<'a> {
    /// The declared name; `use` items have none.
    pub fn name(self) -> Option<Name<'a>> {
        match self {
            Self::FnItem(it) => it.name(),
            Self::StructItem(it) => it.name(),
            Self::ConstItem(it) => it.name(),
            Self::ModItem(it) => it.name(),
            Self::UseItem(_) => None,
        }
    }

    pub fn visibility(self) -> Option<Visibility<'a>> {
        match self {
            Self::FnItem(it) => it.visibility(),
            Self::StructItem(it) => it.visibility(),
            Self::ConstItem(it) => it.visibility(),
            Self::UseItem(it) => it.visibility(),
            Self::ModItem(it) => it.visibility(),
        }
    }
}

/// Every category, in registry order.
pub(crate) const CATEGORIES: [(&str, SyntaxSet); 5] = [
    (Pat::NAME, Pat::KINDS),
    (Item::NAME, Item::KINDS),
    (Expr::NAME, Expr::KINDS),
    (Type::NAME, Type::KINDS),
    (Stmt::NAME, Stmt::KINDS),
];

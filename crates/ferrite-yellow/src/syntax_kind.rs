macro_rules! syntax_kinds {
    (
        tokens { $($token:ident),* $(,)? }
        nodes { $($node:ident => $production:literal),* $(,)? }
    ) => {
        /// Tag of every token and node in the tree.
        ///
        /// Token kinds come first, node kinds (grammar productions) after them,
        /// so `kind as u16` is stable for the lifetime of the process.
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($token,)*
            $($node,)*
        }

        impl SyntaxKind {
            /// Every node kind, in declaration order.
            pub const NODES: &'static [Self] = &[$(Self::$node),*];

            /// Every token kind, in declaration order.
            pub const TOKENS: &'static [Self] = &[$(Self::$token),*];

            /// The `SCREAMING_CASE` name of the kind.
            pub const fn raw_name(self) -> &'static str {
                match self {
                    $(Self::$token => stringify!($token),)*
                    $(Self::$node => stringify!($node),)*
                }
            }

            /// The grammar production name of a node kind, `None` for tokens.
            pub const fn production_name(self) -> Option<&'static str> {
                match self {
                    $(Self::$node => Some($production),)*
                    _ => None,
                }
            }
        }
    };
}

syntax_kinds! {
    tokens {
        LEFT_PAREN,
        RIGHT_PAREN,
        LEFT_BRACKET,
        RIGHT_BRACKET,
        LEFT_BRACE,
        RIGHT_BRACE,
        COMMA,
        SEMICOLON,
        COLON,
        COLON2,
        EQ,
        DOT,
        DOT2,
        AMP,
        POUND,
        BANG,
        ARROW,
        UNDERSCORE,
        BINARY_OPERATOR,

        FN_KW,
        LET_KW,
        MUT_KW,
        REF_KW,
        STRUCT_KW,
        CONST_KW,
        USE_KW,
        MOD_KW,
        PUB_KW,
        TRUE_KW,
        FALSE_KW,

        IDENT,
        INT_NUMBER,
        FLOAT_NUMBER,
        STRING,

        WHITESPACE,
        NEWLINE,
        LINE_COMMENT,

        UNKNOWN,
        EOF,
        TOMBSTONE,
    }
    nodes {
        SOURCE_FILE => "SourceFile",
        ATTR => "Attr",
        VISIBILITY => "Visibility",
        FN_ITEM => "FnItem",
        STRUCT_ITEM => "StructItem",
        CONST_ITEM => "ConstItem",
        USE_ITEM => "UseItem",
        MOD_ITEM => "ModItem",
        ITEM_LIST => "ItemList",
        NAME => "Name",
        NAME_REF => "NameRef",
        PATH => "Path",
        PARAM_LIST => "ParamList",
        PARAM => "Param",
        RET_TYPE => "RetType",
        FIELD_LIST => "FieldList",
        FIELD => "Field",
        BLOCK_EXPR => "BlockExpr",
        LET_STMT => "LetStmt",
        EXPR_STMT => "ExprStmt",
        IDENT_PAT => "IdentPat",
        WILDCARD_PAT => "WildcardPat",
        TUPLE_PAT => "TuplePat",
        REF_PAT => "RefPat",
        LITERAL_PAT => "LiteralPat",
        REST_PAT => "RestPat",
        PATH_TYPE => "PathType",
        TUPLE_TYPE => "TupleType",
        REF_TYPE => "RefType",
        LITERAL => "Literal",
        PATH_EXPR => "PathExpr",
        TUPLE_EXPR => "TupleExpr",
        PAREN_EXPR => "ParenExpr",
        BINARY_EXPR => "BinaryExpr",
        CALL_EXPR => "CallExpr",
        ARG_LIST => "ArgList",
        REF_EXPR => "RefExpr",
        ERROR => "Error",
    }
}

impl SyntaxKind {
    /// Returns `true` for whitespace, newlines and comments.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::LINE_COMMENT)
    }

    /// Returns `true` for keyword tokens.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::FN_KW
                | Self::LET_KW
                | Self::MUT_KW
                | Self::REF_KW
                | Self::STRUCT_KW
                | Self::CONST_KW
                | Self::USE_KW
                | Self::MOD_KW
                | Self::PUB_KW
                | Self::TRUE_KW
                | Self::FALSE_KW
        )
    }

    /// Returns `true` for grammar productions (as opposed to tokens).
    #[inline]
    pub const fn is_node(self) -> bool {
        self as u16 >= Self::SOURCE_FILE as u16
    }

    /// Inverse of `kind as u16`.
    pub fn from_raw(raw: u16) -> Option<Self> {
        let raw = usize::from(raw);
        match raw.checked_sub(Self::TOKENS.len()) {
            None => Some(Self::TOKENS[raw]),
            Some(node) => Self::NODES.get(node).copied(),
        }
    }

    /// Maps an identifier to its keyword kind.
    pub fn from_keyword(ident: &str) -> Option<Self> {
        let kind = match ident {
            "fn" => Self::FN_KW,
            "let" => Self::LET_KW,
            "mut" => Self::MUT_KW,
            "ref" => Self::REF_KW,
            "struct" => Self::STRUCT_KW,
            "const" => Self::CONST_KW,
            "use" => Self::USE_KW,
            "mod" => Self::MOD_KW,
            "pub" => Self::PUB_KW,
            "true" => Self::TRUE_KW,
            "false" => Self::FALSE_KW,
            _ => return None,
        };
        Some(kind)
    }
}

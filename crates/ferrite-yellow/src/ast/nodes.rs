//! Concrete wrappers, one per grammar production.

use super::{AstNode, Expr, Item, Pat, Stmt, Type, Visitor, ast_node};
use crate::query::{AstChildren, child_token, child_token_in, children_of, first_child_of};
use crate::{SyntaxKind, SyntaxNode, SyntaxSet, SyntaxToken};

ast_node! {
    /// Root of a parsed file.
    SourceFile(SOURCE_FILE) => visit_source_file
}

impl<'a> SourceFile<'a> {
    pub fn attrs(self) -> AstChildren<'a, Attr<'a>> {
        children_of(self.0)
    }

    pub fn items(self) -> AstChildren<'a, Item<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    /// `#[path]` attribute in front of an item or field.
    Attr(ATTR) => visit_attr
}

impl<'a> Attr<'a> {
    pub fn path(self) -> Option<Path<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    Visibility(VISIBILITY) => visit_visibility
}

impl<'a> Visibility<'a> {
    pub fn pub_token(self) -> Option<SyntaxToken<'a>> {
        child_token(self.0, SyntaxKind::PUB_KW)
    }
}

ast_node! {
    FnItem(FN_ITEM) => visit_fn_item
}

impl<'a> FnItem<'a> {
    pub fn attrs(self) -> AstChildren<'a, Attr<'a>> {
        children_of(self.0)
    }

    pub fn visibility(self) -> Option<Visibility<'a>> {
        first_child_of(self.0)
    }

    pub fn name(self) -> Option<Name<'a>> {
        first_child_of(self.0)
    }

    pub fn param_list(self) -> Option<ParamList<'a>> {
        first_child_of(self.0)
    }

    pub fn ret_type(self) -> Option<RetType<'a>> {
        first_child_of(self.0)
    }

    pub fn body(self) -> Option<BlockExpr<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    StructItem(STRUCT_ITEM) => visit_struct_item
}

impl<'a> StructItem<'a> {
    pub fn attrs(self) -> AstChildren<'a, Attr<'a>> {
        children_of(self.0)
    }

    pub fn visibility(self) -> Option<Visibility<'a>> {
        first_child_of(self.0)
    }

    pub fn name(self) -> Option<Name<'a>> {
        first_child_of(self.0)
    }

    pub fn field_list(self) -> Option<FieldList<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    ConstItem(CONST_ITEM) => visit_const_item
}

impl<'a> ConstItem<'a> {
    pub fn attrs(self) -> AstChildren<'a, Attr<'a>> {
        children_of(self.0)
    }

    pub fn visibility(self) -> Option<Visibility<'a>> {
        first_child_of(self.0)
    }

    pub fn name(self) -> Option<Name<'a>> {
        first_child_of(self.0)
    }

    pub fn ty(self) -> Option<Type<'a>> {
        first_child_of(self.0)
    }

    pub fn body(self) -> Option<Expr<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    /// `use a::b;`
    UseItem(USE_ITEM) => visit_use_item
}

impl<'a> UseItem<'a> {
    pub fn attrs(self) -> AstChildren<'a, Attr<'a>> {
        children_of(self.0)
    }

    pub fn visibility(self) -> Option<Visibility<'a>> {
        first_child_of(self.0)
    }

    pub fn path(self) -> Option<Path<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    /// `mod name;` or `mod name { ... }`
    ModItem(MOD_ITEM) => visit_mod_item
}

impl<'a> ModItem<'a> {
    pub fn attrs(self) -> AstChildren<'a, Attr<'a>> {
        children_of(self.0)
    }

    pub fn visibility(self) -> Option<Visibility<'a>> {
        first_child_of(self.0)
    }

    pub fn name(self) -> Option<Name<'a>> {
        first_child_of(self.0)
    }

    /// `None` for an out-of-line module.
    pub fn item_list(self) -> Option<ItemList<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    ItemList(ITEM_LIST) => visit_item_list
}

impl<'a> ItemList<'a> {
    pub fn items(self) -> AstChildren<'a, Item<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    /// Identifier introducing a binding or an item.
    Name(NAME) => visit_name
}

impl<'a> Name<'a> {
    pub fn ident_token(self) -> Option<SyntaxToken<'a>> {
        child_token(self.0, SyntaxKind::IDENT)
    }

    pub fn text(self) -> &'a str {
        self.0.text_trimmed()
    }
}

ast_node! {
    /// Identifier referring to something declared elsewhere.
    NameRef(NAME_REF) => visit_name_ref
}

impl<'a> NameRef<'a> {
    pub fn ident_token(self) -> Option<SyntaxToken<'a>> {
        child_token(self.0, SyntaxKind::IDENT)
    }

    pub fn text(self) -> &'a str {
        self.0.text_trimmed()
    }
}

ast_node! {
    /// `a::b::c`, a flat list of segments.
    Path(PATH) => visit_path
}

impl<'a> Path<'a> {
    pub fn segments(self) -> AstChildren<'a, NameRef<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    ParamList(PARAM_LIST) => visit_param_list
}

impl<'a> ParamList<'a> {
    pub fn params(self) -> AstChildren<'a, Param<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    Param(PARAM) => visit_param
}

impl<'a> Param<'a> {
    pub fn pat(self) -> Option<Pat<'a>> {
        first_child_of(self.0)
    }

    pub fn ty(self) -> Option<Type<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    RetType(RET_TYPE) => visit_ret_type
}

impl<'a> RetType<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    FieldList(FIELD_LIST) => visit_field_list
}

impl<'a> FieldList<'a> {
    pub fn fields(self) -> AstChildren<'a, Field<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    Field(FIELD) => visit_field
}

impl<'a> Field<'a> {
    pub fn attrs(self) -> AstChildren<'a, Attr<'a>> {
        children_of(self.0)
    }

    pub fn visibility(self) -> Option<Visibility<'a>> {
        first_child_of(self.0)
    }

    pub fn name(self) -> Option<Name<'a>> {
        first_child_of(self.0)
    }

    pub fn ty(self) -> Option<Type<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    BlockExpr(BLOCK_EXPR) => visit_block_expr
}

impl<'a> BlockExpr<'a> {
    pub fn stmts(self) -> AstChildren<'a, Stmt<'a>> {
        children_of(self.0)
    }

    /// The trailing expression without a semicolon, if any.
    pub fn tail_expr(self) -> Option<Expr<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    /// `let pat: Type = init;`
    LetStmt(LET_STMT) => visit_let_stmt
}

impl<'a> LetStmt<'a> {
    pub fn pat(self) -> Option<Pat<'a>> {
        first_child_of(self.0)
    }

    pub fn ty(self) -> Option<Type<'a>> {
        first_child_of(self.0)
    }

    pub fn initializer(self) -> Option<Expr<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    ExprStmt(EXPR_STMT) => visit_expr_stmt
}

impl<'a> ExprStmt<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        first_child_of(self.0)
    }

    pub fn has_semicolon(self) -> bool {
        child_token(self.0, SyntaxKind::SEMICOLON).is_some()
    }
}

ast_node! {
    /// `ref mut name`
    IdentPat(IDENT_PAT) => visit_ident_pat
}

impl<'a> IdentPat<'a> {
    pub fn name(self) -> Option<Name<'a>> {
        first_child_of(self.0)
    }

    pub fn is_ref(self) -> bool {
        child_token(self.0, SyntaxKind::REF_KW).is_some()
    }

    pub fn is_mut(self) -> bool {
        child_token(self.0, SyntaxKind::MUT_KW).is_some()
    }
}

ast_node! {
    /// `_`
    WildcardPat(WILDCARD_PAT) => visit_wildcard_pat
}

ast_node! {
    /// `(a, _, (b, c))`
    TuplePat(TUPLE_PAT) => visit_tuple_pat
}

impl<'a> TuplePat<'a> {
    /// Sub-patterns in document order; separators are tokens and never show
    /// up here.
    pub fn pats(self) -> AstChildren<'a, Pat<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    /// `&pat` or `&mut pat`
    RefPat(REF_PAT) => visit_ref_pat
}

impl<'a> RefPat<'a> {
    pub fn pat(self) -> Option<Pat<'a>> {
        first_child_of(self.0)
    }

    pub fn is_mut(self) -> bool {
        child_token(self.0, SyntaxKind::MUT_KW).is_some()
    }
}

ast_node! {
    LiteralPat(LITERAL_PAT) => visit_literal_pat
}

impl<'a> LiteralPat<'a> {
    pub fn literal(self) -> Option<Literal<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    /// `..`
    RestPat(REST_PAT) => visit_rest_pat
}

ast_node! {
    PathType(PATH_TYPE) => visit_path_type
}

impl<'a> PathType<'a> {
    pub fn path(self) -> Option<Path<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    TupleType(TUPLE_TYPE) => visit_tuple_type
}

impl<'a> TupleType<'a> {
    pub fn fields(self) -> AstChildren<'a, Type<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    RefType(REF_TYPE) => visit_ref_type
}

impl<'a> RefType<'a> {
    pub fn is_mut(self) -> bool {
        child_token(self.0, SyntaxKind::MUT_KW).is_some()
    }

    pub fn ty(self) -> Option<Type<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    Literal(LITERAL) => visit_literal
}

/// Kind of the token carried by a [`Literal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind<'a> {
    Int(SyntaxToken<'a>),
    Float(SyntaxToken<'a>),
    String(SyntaxToken<'a>),
    Bool(bool),
}

const LITERAL_TOKENS: SyntaxSet = SyntaxSet::new([
    SyntaxKind::INT_NUMBER,
    SyntaxKind::FLOAT_NUMBER,
    SyntaxKind::STRING,
    SyntaxKind::TRUE_KW,
    SyntaxKind::FALSE_KW,
]);

impl<'a> Literal<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        child_token_in(self.0, &LITERAL_TOKENS)
    }

    pub fn kind(self) -> Option<LiteralKind<'a>> {
        let token = self.token()?;
        let kind = match token.kind() {
            SyntaxKind::INT_NUMBER => LiteralKind::Int(token),
            SyntaxKind::FLOAT_NUMBER => LiteralKind::Float(token),
            SyntaxKind::STRING => LiteralKind::String(token),
            SyntaxKind::TRUE_KW => LiteralKind::Bool(true),
            SyntaxKind::FALSE_KW => LiteralKind::Bool(false),
            _ => return None,
        };
        Some(kind)
    }
}

ast_node! {
    PathExpr(PATH_EXPR) => visit_path_expr
}

impl<'a> PathExpr<'a> {
    pub fn path(self) -> Option<Path<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    /// `(a, b)`; a single element needs a trailing comma.
    TupleExpr(TUPLE_EXPR) => visit_tuple_expr
}

impl<'a> TupleExpr<'a> {
    pub fn fields(self) -> AstChildren<'a, Expr<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    ParenExpr(PAREN_EXPR) => visit_paren_expr
}

impl<'a> ParenExpr<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    BinaryExpr(BINARY_EXPR) => visit_binary_expr
}

impl<'a> BinaryExpr<'a> {
    pub fn lhs(self) -> Option<Expr<'a>> {
        first_child_of(self.0)
    }

    pub fn op_token(self) -> Option<SyntaxToken<'a>> {
        child_token(self.0, SyntaxKind::BINARY_OPERATOR)
    }

    /// The right operand. `None` when the operand is missing, even if the
    /// left one is present.
    pub fn rhs(self) -> Option<Expr<'a>> {
        let op = self.op_token()?.trimmed_range().end();
        children_of::<Expr<'a>>(self.0).find(|expr| expr.syntax().trimmed_range().start() >= op)
    }
}

ast_node! {
    CallExpr(CALL_EXPR) => visit_call_expr
}

impl<'a> CallExpr<'a> {
    pub fn callee(self) -> Option<Expr<'a>> {
        first_child_of(self.0)
    }

    pub fn arg_list(self) -> Option<ArgList<'a>> {
        first_child_of(self.0)
    }
}

ast_node! {
    ArgList(ARG_LIST) => visit_arg_list
}

impl<'a> ArgList<'a> {
    pub fn args(self) -> AstChildren<'a, Expr<'a>> {
        children_of(self.0)
    }
}

ast_node! {
    /// `&expr` or `&mut expr`
    RefExpr(REF_EXPR) => visit_ref_expr
}

impl<'a> RefExpr<'a> {
    pub fn is_mut(self) -> bool {
        child_token(self.0, SyntaxKind::MUT_KW).is_some()
    }

    pub fn expr(self) -> Option<Expr<'a>> {
        first_child_of(self.0)
    }
}

/// Wraps `syntax` into the concrete wrapper of its kind and hands it to
/// `visitor`; kinds without a wrapper go to [`Visitor::visit_node`].
pub(super) fn dispatch_concrete<'a, V: Visitor<'a> + ?Sized>(node: SyntaxNode<'a>, visitor: &mut V) {
    use SyntaxKind::*;

    match node.kind() {
        SOURCE_FILE => visitor.visit_source_file(SourceFile(node)),
        ATTR => visitor.visit_attr(Attr(node)),
        VISIBILITY => visitor.visit_visibility(Visibility(node)),
        FN_ITEM => visitor.visit_fn_item(FnItem(node)),
        STRUCT_ITEM => visitor.visit_struct_item(StructItem(node)),
        CONST_ITEM => visitor.visit_const_item(ConstItem(node)),
        USE_ITEM => visitor.visit_use_item(UseItem(node)),
        MOD_ITEM => visitor.visit_mod_item(ModItem(node)),
        ITEM_LIST => visitor.visit_item_list(ItemList(node)),
        NAME => visitor.visit_name(Name(node)),
        NAME_REF => visitor.visit_name_ref(NameRef(node)),
        PATH => visitor.visit_path(Path(node)),
        PARAM_LIST => visitor.visit_param_list(ParamList(node)),
        PARAM => visitor.visit_param(Param(node)),
        RET_TYPE => visitor.visit_ret_type(RetType(node)),
        FIELD_LIST => visitor.visit_field_list(FieldList(node)),
        FIELD => visitor.visit_field(Field(node)),
        BLOCK_EXPR => visitor.visit_block_expr(BlockExpr(node)),
        LET_STMT => visitor.visit_let_stmt(LetStmt(node)),
        EXPR_STMT => visitor.visit_expr_stmt(ExprStmt(node)),
        IDENT_PAT => visitor.visit_ident_pat(IdentPat(node)),
        WILDCARD_PAT => visitor.visit_wildcard_pat(WildcardPat(node)),
        TUPLE_PAT => visitor.visit_tuple_pat(TuplePat(node)),
        REF_PAT => visitor.visit_ref_pat(RefPat(node)),
        LITERAL_PAT => visitor.visit_literal_pat(LiteralPat(node)),
        REST_PAT => visitor.visit_rest_pat(RestPat(node)),
        PATH_TYPE => visitor.visit_path_type(PathType(node)),
        TUPLE_TYPE => visitor.visit_tuple_type(TupleType(node)),
        REF_TYPE => visitor.visit_ref_type(RefType(node)),
        LITERAL => visitor.visit_literal(Literal(node)),
        PATH_EXPR => visitor.visit_path_expr(PathExpr(node)),
        TUPLE_EXPR => visitor.visit_tuple_expr(TupleExpr(node)),
        PAREN_EXPR => visitor.visit_paren_expr(ParenExpr(node)),
        BINARY_EXPR => visitor.visit_binary_expr(BinaryExpr(node)),
        CALL_EXPR => visitor.visit_call_expr(CallExpr(node)),
        ARG_LIST => visitor.visit_arg_list(ArgList(node)),
        REF_EXPR => visitor.visit_ref_expr(RefExpr(node)),
        _ => visitor.visit_node(node),
    }
}

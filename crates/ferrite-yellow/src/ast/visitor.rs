//! Two-tier visitor dispatch.
//!
//! [`AnyVisitor`] is the untyped base protocol. [`Visitor`] is the typed
//! capability: one method per concrete production, one per category, and a
//! generic [`Visitor::visit_node`] fallback. Every default forwards one level
//! up (concrete, then category, then generic), so a visitor that overrides
//! only `visit_node` still sees every node.

use super::nodes::dispatch_concrete;
use super::*;
use crate::{SyntaxNode, WalkEvent};

/// Typed visitor over concrete productions and categories.
pub trait Visitor<'a> {
    /// Generic fallback for every node.
    fn visit_node(&mut self, _node: SyntaxNode<'a>) {}

    fn visit_item(&mut self, item: Item<'a>) {
        self.visit_node(item.syntax());
    }

    fn visit_pat(&mut self, pat: Pat<'a>) {
        self.visit_node(pat.syntax());
    }

    fn visit_expr(&mut self, expr: Expr<'a>) {
        self.visit_node(expr.syntax());
    }

    fn visit_type(&mut self, ty: Type<'a>) {
        self.visit_node(ty.syntax());
    }

    fn visit_stmt(&mut self, stmt: Stmt<'a>) {
        self.visit_node(stmt.syntax());
    }

    fn visit_source_file(&mut self, node: SourceFile<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_attr(&mut self, node: Attr<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_visibility(&mut self, node: Visibility<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_fn_item(&mut self, node: FnItem<'a>) {
        self.visit_item(node.into());
    }

    fn visit_struct_item(&mut self, node: StructItem<'a>) {
        self.visit_item(node.into());
    }

    fn visit_const_item(&mut self, node: ConstItem<'a>) {
        self.visit_item(node.into());
    }

    fn visit_use_item(&mut self, node: UseItem<'a>) {
        self.visit_item(node.into());
    }

    fn visit_mod_item(&mut self, node: ModItem<'a>) {
        self.visit_item(node.into());
    }

    fn visit_item_list(&mut self, node: ItemList<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_name(&mut self, node: Name<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_name_ref(&mut self, node: NameRef<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_path(&mut self, node: Path<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_param_list(&mut self, node: ParamList<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_param(&mut self, node: Param<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_ret_type(&mut self, node: RetType<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_field_list(&mut self, node: FieldList<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_field(&mut self, node: Field<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_block_expr(&mut self, node: BlockExpr<'a>) {
        self.visit_expr(node.into());
    }

    fn visit_let_stmt(&mut self, node: LetStmt<'a>) {
        self.visit_stmt(node.into());
    }

    fn visit_expr_stmt(&mut self, node: ExprStmt<'a>) {
        self.visit_stmt(node.into());
    }

    fn visit_ident_pat(&mut self, node: IdentPat<'a>) {
        self.visit_pat(node.into());
    }

    fn visit_wildcard_pat(&mut self, node: WildcardPat<'a>) {
        self.visit_pat(node.into());
    }

    fn visit_tuple_pat(&mut self, node: TuplePat<'a>) {
        self.visit_pat(node.into());
    }

    fn visit_ref_pat(&mut self, node: RefPat<'a>) {
        self.visit_pat(node.into());
    }

    fn visit_literal_pat(&mut self, node: LiteralPat<'a>) {
        self.visit_pat(node.into());
    }

    fn visit_rest_pat(&mut self, node: RestPat<'a>) {
        self.visit_pat(node.into());
    }

    fn visit_path_type(&mut self, node: PathType<'a>) {
        self.visit_type(node.into());
    }

    fn visit_tuple_type(&mut self, node: TupleType<'a>) {
        self.visit_type(node.into());
    }

    fn visit_ref_type(&mut self, node: RefType<'a>) {
        self.visit_type(node.into());
    }

    fn visit_literal(&mut self, node: Literal<'a>) {
        self.visit_expr(node.into());
    }

    fn visit_path_expr(&mut self, node: PathExpr<'a>) {
        self.visit_expr(node.into());
    }

    fn visit_tuple_expr(&mut self, node: TupleExpr<'a>) {
        self.visit_expr(node.into());
    }

    fn visit_paren_expr(&mut self, node: ParenExpr<'a>) {
        self.visit_expr(node.into());
    }

    fn visit_binary_expr(&mut self, node: BinaryExpr<'a>) {
        self.visit_expr(node.into());
    }

    fn visit_call_expr(&mut self, node: CallExpr<'a>) {
        self.visit_expr(node.into());
    }

    fn visit_arg_list(&mut self, node: ArgList<'a>) {
        self.visit_node(node.syntax());
    }

    fn visit_ref_expr(&mut self, node: RefExpr<'a>) {
        self.visit_expr(node.into());
    }
}

/// Untyped visitor protocol every visitor can implement.
pub trait AnyVisitor<'a> {
    fn visit_any(&mut self, node: SyntaxNode<'a>);

    /// Capability test: visitors that also implement [`Visitor`] return
    /// themselves here to receive typed calls.
    fn as_typed(&mut self) -> Option<&mut dyn Visitor<'a>> {
        None
    }
}

/// Wraps `node` into the wrapper of its production and calls the matching
/// visitor method. Kinds without a wrapper go to [`Visitor::visit_node`].
pub fn dispatch<'a, V: Visitor<'a> + ?Sized>(node: SyntaxNode<'a>, visitor: &mut V) {
    dispatch_concrete(node, visitor);
}

/// Untyped counterpart of [`dispatch`].
pub fn dispatch_any<'a>(node: SyntaxNode<'a>, visitor: &mut dyn AnyVisitor<'a>) {
    if let Some(typed) = visitor.as_typed() {
        dispatch(node, typed);
        return;
    }
    visitor.visit_any(node);
}

/// Dispatches every node of the subtree rooted at `root`, in pre-order.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(root: SyntaxNode<'a>, visitor: &mut V) {
    for event in root.preorder() {
        if let WalkEvent::Enter(node) = event {
            dispatch(node, visitor);
        }
    }
}

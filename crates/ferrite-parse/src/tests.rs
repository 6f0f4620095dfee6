use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;
use ferrite_yellow::SyntaxKind::{self, *};
use ferrite_yellow::ast::{self, AstNode, Visitor};
use ferrite_yellow::query::{child_token, children_of, descendants_of, first_child_of};

use crate::{Parse, factory, parse};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "rs" {
                    let expected = path.with_extension("txt");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

#[test]
fn parse_test_data() {
    let test_cases = TestCase::list();
    assert!(!test_cases.is_empty());

    for case in test_cases {
        let parse = parse(&case.text);
        assert_eq!(parse.syntax_node().text(), case.text, "{}", case.input.display());
        expect_file![&case.expected].assert_eq(&parse.debug_dump());
    }
}

fn messages(parse: &Parse) -> Vec<&str> {
    parse.errors().iter().map(|error| error.message()).collect()
}

fn kinds<'a>(nodes: impl IntoIterator<Item = impl AstNode<'a>>) -> Vec<SyntaxKind> {
    nodes.into_iter().map(|node| node.syntax().kind()).collect()
}

fn first<'a, N: AstNode<'a>>(parse: &'a Parse) -> N {
    descendants_of(parse.syntax_node()).next().expect("no node of the requested kind")
}

#[test]
fn lossless() {
    let inputs = [
        "",
        "\n\n// only a comment\n",
        "fn f( {",
        "struct S { a: , }\n#[",
        "fn f() { let (a,, b) = &mut ; } ) }",
        "mod m { use a::; const C = 1 }",
        "fn f() -> { \"unterminated }",
    ];

    for input in inputs {
        let parse = parse(input);
        assert_eq!(parse.syntax_node().text(), input);
        assert_eq!(parse.syntax_node().kind(), SOURCE_FILE);
    }
}

#[test]
fn tuple_pattern_sub_patterns() {
    let parse = parse("fn f() { let (a, _, (b, c)) = t; }");
    assert!(!parse.has_errors());

    let stmt: ast::LetStmt<'_> = first(&parse);
    let Some(ast::Pat::TuplePat(tuple)) = stmt.pat() else { panic!("expected a tuple pattern") };
    assert_eq!(kinds(tuple.pats()), [IDENT_PAT, WILDCARD_PAT, TUPLE_PAT]);
    assert_eq!(children_of::<ast::Item<'_>>(tuple.syntax()).count(), 0);

    let names: Vec<_> = descendants_of::<ast::IdentPat<'_>>(tuple.syntax())
        .filter_map(|pat| pat.name())
        .map(|name| name.text())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn empty_tuple_pattern() {
    let parse = parse("fn f() { let () = t; }");
    let tuple: ast::TuplePat<'_> = first(&parse);
    assert_eq!(tuple.pats().count(), 0);
    assert!(!parse.has_errors());
}

#[test]
fn pattern_forms() {
    let parse = parse("fn f() { let (ref mut a, &mut b, .., 1, _) = t; }");
    assert!(!parse.has_errors(), "{:?}", messages(&parse));

    let tuple: ast::TuplePat<'_> = first(&parse);
    assert_eq!(kinds(tuple.pats()), [IDENT_PAT, REF_PAT, REST_PAT, LITERAL_PAT, WILDCARD_PAT]);

    let ident: ast::IdentPat<'_> = first(&parse);
    assert!(ident.is_ref() && ident.is_mut());

    let ref_pat: ast::RefPat<'_> = first(&parse);
    assert!(ref_pat.is_mut());
    assert!(matches!(ref_pat.pat(), Some(ast::Pat::IdentPat(_))));

    let literal: ast::LiteralPat<'_> = first(&parse);
    assert!(matches!(
        literal.literal().and_then(|it| it.kind()),
        Some(ast::LiteralKind::Int(_))
    ));
}

#[test]
fn error_nodes_are_skipped() {
    let parse = parse("fn f() { let (a,, b) = t; }");
    assert_eq!(messages(&parse), ["expected pattern"]);

    let tuple: ast::TuplePat<'_> = first(&parse);
    assert_eq!(tuple.syntax().children().count(), 3);
    assert_eq!(kinds(tuple.pats()), [IDENT_PAT, IDENT_PAT]);
}

#[test]
fn items() {
    let parse = parse(
        "#![allow]
#[test]
pub fn add(a: i32, &mut b: &T) -> (i32, u8) { a + b * 2 }
struct Point { pub x: i32, y: i32 }
const N: usize = 3;
use std::fmt;
mod inner { fn g() {} }
mod outer;
",
    );
    assert!(!parse.has_errors(), "{:?}", messages(&parse));

    let file = parse.source_file();
    assert_eq!(file.attrs().count(), 1);
    assert_eq!(kinds(file.items()), [FN_ITEM, STRUCT_ITEM, CONST_ITEM, USE_ITEM, MOD_ITEM, MOD_ITEM]);

    let names: Vec<_> = file.items().map(|item| item.name().map(|name| name.text())).collect();
    assert_eq!(names, [Some("add"), Some("Point"), Some("N"), None, Some("inner"), Some("outer")]);

    let Some(ast::Item::FnItem(add)) = file.items().next() else { panic!("expected a function") };
    assert!(add.visibility().is_some());
    let attr = add.attrs().next().and_then(|attr| attr.path());
    assert_eq!(attr.map(|path| path.syntax().text_trimmed()), Some("test"));

    let params: Vec<_> = add.param_list().unwrap().params().collect();
    assert_eq!(params.len(), 2);
    assert!(matches!(params[0].ty(), Some(ast::Type::PathType(_))));
    assert!(matches!(params[1].pat(), Some(ast::Pat::RefPat(_))));
    assert!(matches!(params[1].ty(), Some(ast::Type::RefType(ty)) if !ty.is_mut()));

    let Some(ast::Type::TupleType(ret)) = add.ret_type().and_then(|ret| ret.ty()) else {
        panic!("expected a tuple return type")
    };
    assert_eq!(ret.fields().count(), 2);

    let Some(ast::Expr::BinaryExpr(sum)) = add.body().and_then(|body| body.tail_expr()) else {
        panic!("expected a binary tail expression")
    };
    assert_eq!(sum.op_token().map(|op| op.text_trimmed()), Some("+"));
    assert!(matches!(sum.lhs(), Some(ast::Expr::PathExpr(_))));
    assert!(matches!(sum.rhs(), Some(ast::Expr::BinaryExpr(_))));

    let point: ast::StructItem<'_> = first(&parse);
    let fields: Vec<_> = point.field_list().unwrap().fields().collect();
    assert_eq!(fields.len(), 2);
    assert!(fields[0].visibility().is_some());
    assert!(fields[1].visibility().is_none());

    let constant: ast::ConstItem<'_> = first(&parse);
    assert!(matches!(constant.body(), Some(ast::Expr::Literal(_))));

    let use_item: ast::UseItem<'_> = first(&parse);
    let segments: Vec<_> =
        use_item.path().unwrap().segments().map(|segment| segment.text()).collect();
    assert_eq!(segments, ["std", "fmt"]);

    let modules: Vec<ast::ModItem<'_>> = descendants_of(parse.syntax_node()).collect();
    assert_eq!(modules[0].item_list().map(|list| list.items().count()), Some(1));
    assert!(modules[1].item_list().is_none());
}

#[test]
fn statements_and_tail() {
    let parse = parse("fn f() { let x: u8 = g(1, (2,), ()); x; {} h() }");
    assert!(!parse.has_errors(), "{:?}", messages(&parse));

    let block: ast::BlockExpr<'_> = descendants_of(parse.syntax_node()).next().unwrap();
    assert_eq!(kinds(block.stmts()), [LET_STMT, EXPR_STMT, EXPR_STMT]);
    assert!(matches!(block.tail_expr(), Some(ast::Expr::CallExpr(_))));

    let has_semicolon: Vec<_> =
        children_of::<ast::ExprStmt<'_>>(block.syntax()).map(|stmt| stmt.has_semicolon()).collect();
    assert_eq!(has_semicolon, [true, false]);

    let stmt: ast::LetStmt<'_> = first(&parse);
    assert!(matches!(stmt.ty(), Some(ast::Type::PathType(_))));
    let Some(ast::Expr::CallExpr(call)) = stmt.initializer() else { panic!("expected a call") };
    assert_eq!(kinds(call.arg_list().unwrap().args()), [LITERAL, TUPLE_EXPR, TUPLE_EXPR]);
    assert_eq!(call.callee().map(|callee| callee.syntax().text_trimmed()), Some("g"));
}

#[test]
fn binary_operators_are_left_associative() {
    let parse = parse("fn f() { a - b - c == d }");
    let outer: ast::BinaryExpr<'_> = first(&parse);
    assert_eq!(outer.op_token().map(|op| op.text_trimmed()), Some("=="));

    let Some(ast::Expr::BinaryExpr(lhs)) = outer.lhs() else { panic!("expected `a - b - c`") };
    assert_eq!(lhs.syntax().text_trimmed(), "a - b - c");
    assert_eq!(lhs.rhs().map(|rhs| rhs.syntax().text_trimmed()), Some("c"));
    assert!(matches!(lhs.lhs(), Some(ast::Expr::BinaryExpr(it)) if it.syntax().text_trimmed() == "a - b"));
}

#[test]
fn missing_operand() {
    let parse = parse("fn f() { a + ; }");
    assert_eq!(messages(&parse), ["expected an expression"]);

    let binary: ast::BinaryExpr<'_> = first(&parse);
    assert!(binary.lhs().is_some());
    assert!(binary.rhs().is_none());
}

#[test]
fn recovery() {
    let missing_semicolon = parse("fn f() { a b }");
    assert_eq!(messages(&missing_semicolon), ["expected `;`"]);

    let stray = parse("fn f() {} ) struct S;");
    assert_eq!(messages(&stray), ["expected an item"]);
    assert_eq!(stray.source_file().items().count(), 2);
    assert_eq!(descendants_of::<ast::Item<'_>>(stray.syntax_node()).count(), 2);

    let unclosed = parse("fn f( {");
    assert_eq!(messages(&unclosed), ["expected `)`", "expected `}`"]);
    assert!(first::<ast::BlockExpr<'_>>(&unclosed).tail_expr().is_none());

    let lone_pub = parse("pub");
    assert_eq!(messages(&lone_pub), ["expected an item"]);
    let children: Vec<_> = lone_pub.syntax_node().children().map(|node| node.kind()).collect();
    assert_eq!(children, [ERROR]);
}

#[test]
fn long_trivia_runs() {
    let blank_lines = format!("{}fn f() {{}}\n", "\n".repeat(20_000));
    let parse_blank = parse(&blank_lines);
    assert!(parse_blank.errors().is_empty());
    assert_eq!(parse_blank.syntax_node().text(), blank_lines);

    let function: ast::FnItem<'_> = first(&parse_blank);
    let fn_kw = child_token(function.syntax(), FN_KW).unwrap();
    assert!(fn_kw.leading_trivia().len() > u16::MAX as usize / 4);
    assert_eq!(u32::from(fn_kw.text_range().start()), 0);
    assert_eq!(u32::from(fn_kw.trimmed_range().start()), 20_000);

    let comments = format!("fn f() {{}}\n{}struct S;\n", "// c\n".repeat(9_000));
    let parse_comments = parse(&comments);
    assert!(parse_comments.errors().is_empty());
    assert_eq!(parse_comments.syntax_node().text(), comments);
    assert_eq!(kinds(parse_comments.source_file().items()), [FN_ITEM, STRUCT_ITEM]);

    let strukt: ast::StructItem<'_> = first(&parse_comments);
    assert_eq!(strukt.name().map(|name| name.text()), Some("S"));
}

#[derive(Default)]
struct Outline {
    lines: Vec<String>,
    depth: usize,
}

impl<'a> Visitor<'a> for Outline {
    fn visit_item(&mut self, item: ast::Item<'a>) {
        let name = item.name().map_or("_", |name| name.text());
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{} {name}", item.syntax().kind().raw_name()));

        if let ast::Item::ModItem(module) = item {
            if let Some(list) = module.item_list() {
                self.depth += 1;
                for item in list.items() {
                    item.accept(self);
                }
                self.depth -= 1;
            }
        }
    }
}

#[test]
fn visitor_over_parsed_items() {
    let parse = parse("fn a() {}\nmod m { struct S; mod n { const C: u8 = 1; } }\nuse x;");
    let mut outline = Outline::default();
    for item in parse.source_file().items() {
        item.accept(&mut outline);
    }

    assert_eq!(
        outline.lines,
        ["FN_ITEM a", "MOD_ITEM m", "  STRUCT_ITEM S", "  MOD_ITEM n", "    CONST_ITEM C", "USE_ITEM _"]
    );
}

#[test]
fn factory() {
    let expr = factory::expression("1 + 2").unwrap();
    assert_eq!(expr.kind(), BINARY_EXPR);
    assert!(expr.cast::<ast::BinaryExpr<'_>>().is_some());
    assert!(factory::expression("1 +").is_none());

    let stmt = factory::statement("let x = 1;").unwrap();
    assert_eq!(stmt.syntax().text_trimmed(), "let x = 1;");
    assert!(factory::statement("x").is_none());

    let fragment = factory::let_stmt("(a, b)", Some("t")).unwrap();
    let let_stmt: ast::LetStmt<'_> = fragment.cast().unwrap();
    assert!(matches!(let_stmt.pat(), Some(ast::Pat::TuplePat(tuple)) if tuple.pats().count() == 2));
    let uninit = factory::let_stmt("x", None).unwrap();
    assert!(uninit.cast::<ast::LetStmt<'_>>().unwrap().initializer().is_none());

    let pat = factory::pattern("(a, _)").unwrap();
    assert_eq!(pat.cast::<ast::TuplePat<'_>>().map(|tuple| tuple.pats().count()), Some(2));

    let use_item = factory::use_item("std::fmt").unwrap();
    let use_item: ast::UseItem<'_> = use_item.cast().unwrap();
    assert_eq!(use_item.path().map(|path| path.segments().count()), Some(2));

    let module = factory::mod_item("m", None).unwrap();
    assert!(module.cast::<ast::ModItem<'_>>().unwrap().item_list().is_none());
    let module = factory::mod_item("m", Some("fn f() {}")).unwrap();
    let list = module.cast::<ast::ModItem<'_>>().and_then(|it| it.item_list());
    assert_eq!(list.map(|list| list.items().count()), Some(1));

    let attr = factory::outer_attr("test").unwrap();
    assert_eq!(attr.syntax().text_trimmed(), "#[test]");

    let block = factory::block_expr("let x = 1; x").unwrap();
    let block: ast::BlockExpr<'_> = block.cast().unwrap();
    assert_eq!(block.stmts().count(), 1);
    assert!(block.tail_expr().is_some());

    let function = factory::fn_item("fn f() {}").unwrap();
    let item = first_child_of::<ast::Item<'_>>(function.parse().syntax_node());
    assert!(matches!(item, Some(ast::Item::FnItem(_))));
    assert!(factory::fn_item("struct S;").is_none());
}

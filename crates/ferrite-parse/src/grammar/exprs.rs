use ferrite_yellow::SyntaxKind::*;
use ferrite_yellow::SyntaxSet;

use super::{delimited, items, path, patterns, types};
use crate::parser::{CompletedMarker, Parser};

pub(crate) const LITERAL_FIRST: SyntaxSet =
    SyntaxSet::new([INT_NUMBER, FLOAT_NUMBER, STRING, TRUE_KW, FALSE_KW]);

pub(crate) const EXPR_FIRST: SyntaxSet =
    LITERAL_FIRST.union(&SyntaxSet::new([IDENT, LEFT_PAREN, LEFT_BRACE, AMP]));

/// Tokens an expression never swallows when it is missing.
const EXPR_RECOVERY: SyntaxSet = SyntaxSet::new([SEMICOLON, COMMA, RIGHT_PAREN, RIGHT_BRACKET]);

pub(crate) fn literal(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.at_set(&LITERAL_FIRST));
    let m = p.start();
    p.advance();
    m.complete(p, LITERAL)
}

pub(crate) fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    expr_bp(p, 1)
}

fn expr_bp(p: &mut Parser<'_>, min_bp: u8) -> Option<CompletedMarker> {
    let mut lhs = unary_expr(p)?;

    loop {
        let Some(bp) = binding_power(p) else { break };
        if bp < min_bp {
            break;
        }

        let m = lhs.precede(p);
        p.advance();
        expr_bp(p, bp + 1);
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

/// Left-associative binding power of the operator under the cursor.
fn binding_power(p: &Parser<'_>) -> Option<u8> {
    if !p.at(BINARY_OPERATOR) {
        return None;
    }

    let bp = match p.peek_text() {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "|" => 4,
        "^" => 5,
        "+" | "-" => 6,
        "*" | "/" | "%" => 7,
        _ => return None,
    };
    Some(bp)
}

fn unary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.peek_kind() {
        AMP => {
            let m = p.start();
            p.advance();
            p.eat(MUT_KW);
            unary_expr(p);
            Some(m.complete(p, REF_EXPR))
        }
        _ => postfix_expr(p),
    }
}

fn postfix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = primary_expr(p)?;

    while p.at(LEFT_PAREN) {
        let m = lhs.precede(p);
        arg_list(p);
        lhs = m.complete(p, CALL_EXPR);
    }

    Some(lhs)
}

fn arg_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        LEFT_PAREN,
        RIGHT_PAREN,
        COMMA,
        "expected expression",
        &EXPR_FIRST,
        |p| expr(p).is_some(),
    );
    m.complete(p, ARG_LIST);
}

fn primary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.peek_kind() {
        _ if p.at_set(&LITERAL_FIRST) => Some(literal(p)),
        IDENT => {
            let m = p.start();
            path(p);
            Some(m.complete(p, PATH_EXPR))
        }
        LEFT_PAREN => Some(paren_or_tuple_expr(p)),
        LEFT_BRACE => Some(block_expr(p)),
        _ => {
            p.error_recover("expected an expression", &EXPR_RECOVERY);
            None
        }
    }
}

/// `()`, `(a)`, `(a,)` and `(a, b)`.
fn paren_or_tuple_expr(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert_eq!(p.peek_kind(), LEFT_PAREN);
    let m = p.start();
    p.advance();

    if p.eat(RIGHT_PAREN) {
        return m.complete(p, TUPLE_EXPR);
    }

    expr(p);
    if !p.at(COMMA) {
        p.expect(RIGHT_PAREN);
        return m.complete(p, PAREN_EXPR);
    }

    while p.eat(COMMA) {
        if p.at(RIGHT_PAREN) || p.at(EOF) || expr(p).is_none() {
            break;
        }
    }
    p.expect(RIGHT_PAREN);
    m.complete(p, TUPLE_EXPR)
}

pub(crate) fn block_expr(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert_eq!(p.peek_kind(), LEFT_BRACE);
    let m = p.start();
    p.advance();

    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        stmt(p);
    }

    p.expect(RIGHT_BRACE);
    m.complete(p, BLOCK_EXPR)
}

/// A block, or an error when none starts here.
pub(crate) fn expect_block(p: &mut Parser<'_>) {
    if p.at(LEFT_BRACE) {
        block_expr(p);
    } else {
        p.error("expected a block");
    }
}

fn stmt(p: &mut Parser<'_>) {
    match p.peek_kind() {
        // Empty statement.
        SEMICOLON => p.advance(),
        LET_KW => let_stmt(p),
        _ if p.at_set(&items::ITEM_FIRST) => items::item(p),
        _ if !p.at_set(&EXPR_FIRST) => p.error_and_bump("expected a statement"),
        _ => {
            let Some(expr) = expr(p) else { return };

            if p.at(RIGHT_BRACE) {
                // Tail expression, stays unwrapped.
                return;
            }

            let is_block = expr.kind() == BLOCK_EXPR;
            let m = expr.precede(p);
            if !p.eat(SEMICOLON) && !is_block {
                p.error("expected `;`");
            }
            m.complete(p, EXPR_STMT);
        }
    }
}

fn let_stmt(p: &mut Parser<'_>) {
    debug_assert_eq!(p.peek_kind(), LET_KW);
    let m = p.start();
    p.advance();

    patterns::expect_pattern(p);
    if p.at(COLON) {
        types::ascription(p);
    }
    if p.eat(EQ) {
        expr(p);
    }

    p.expect(SEMICOLON);
    m.complete(p, LET_STMT);
}

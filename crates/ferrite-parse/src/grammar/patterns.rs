use ferrite_yellow::SyntaxKind::*;
use ferrite_yellow::SyntaxSet;

use super::{delimited, exprs, name};
use crate::parser::Parser;

pub(crate) const PAT_FIRST: SyntaxSet = SyntaxSet::new([
    IDENT,
    REF_KW,
    MUT_KW,
    UNDERSCORE,
    DOT2,
    AMP,
    LEFT_PAREN,
    INT_NUMBER,
    FLOAT_NUMBER,
    STRING,
    TRUE_KW,
    FALSE_KW,
]);

/// Parses a pattern if one starts here.
pub(crate) fn pattern(p: &mut Parser<'_>) -> bool {
    match p.peek_kind() {
        IDENT | REF_KW | MUT_KW => {
            let m = p.start();
            p.eat(REF_KW);
            p.eat(MUT_KW);
            name(p, &PAT_RECOVERY);
            m.complete(p, IDENT_PAT);
        }
        UNDERSCORE => {
            let m = p.start();
            p.advance();
            m.complete(p, WILDCARD_PAT);
        }
        DOT2 => {
            let m = p.start();
            p.advance();
            m.complete(p, REST_PAT);
        }
        AMP => {
            let m = p.start();
            p.advance();
            p.eat(MUT_KW);
            expect_pattern(p);
            m.complete(p, REF_PAT);
        }
        LEFT_PAREN => {
            let m = p.start();
            delimited(
                p,
                LEFT_PAREN,
                RIGHT_PAREN,
                COMMA,
                "expected pattern",
                &PAT_FIRST,
                pattern,
            );
            m.complete(p, TUPLE_PAT);
        }
        _ if p.at_set(&exprs::LITERAL_FIRST) => {
            let m = p.start();
            exprs::literal(p);
            m.complete(p, LITERAL_PAT);
        }
        _ => return false,
    }
    true
}

pub(crate) fn expect_pattern(p: &mut Parser<'_>) {
    if !pattern(p) {
        p.error_recover("expected pattern", &PAT_RECOVERY);
    }
}

const PAT_RECOVERY: SyntaxSet =
    SyntaxSet::new([COLON, EQ, COMMA, SEMICOLON, RIGHT_PAREN, LET_KW]);

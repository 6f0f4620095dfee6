use ferrite_yellow::SyntaxKind::*;
use ferrite_yellow::SyntaxSet;

use super::{delimited, path};
use crate::parser::Parser;

pub(crate) const TYPE_FIRST: SyntaxSet = SyntaxSet::new([IDENT, LEFT_PAREN, AMP]);

/// Parses a type if one starts here.
pub(crate) fn type_(p: &mut Parser<'_>) -> bool {
    match p.peek_kind() {
        IDENT => {
            let m = p.start();
            path(p);
            m.complete(p, PATH_TYPE);
        }
        LEFT_PAREN => {
            let m = p.start();
            delimited(
                p,
                LEFT_PAREN,
                RIGHT_PAREN,
                COMMA,
                "expected type",
                &TYPE_FIRST,
                type_,
            );
            m.complete(p, TUPLE_TYPE);
        }
        AMP => {
            let m = p.start();
            p.advance();
            p.eat(MUT_KW);
            expect_type(p);
            m.complete(p, REF_TYPE);
        }
        _ => return false,
    }
    true
}

pub(crate) fn expect_type(p: &mut Parser<'_>) {
    if !type_(p) {
        p.error("expected a type");
    }
}

pub(crate) fn ascription(p: &mut Parser<'_>) {
    debug_assert_eq!(p.peek_kind(), COLON);
    p.advance();
    expect_type(p);
}

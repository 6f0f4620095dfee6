use ferrite_yellow::SyntaxKind::{self, *};
use ferrite_yellow::SyntaxSet;

use crate::parser::{CompletedMarker, Parser};

pub(crate) mod exprs;
pub(crate) mod items;
pub(crate) mod patterns;
pub(crate) mod types;

pub(crate) fn name(p: &mut Parser<'_>, recovery: &SyntaxSet) {
    match p.peek_kind() {
        IDENT => {
            let m = p.start();
            p.advance();
            m.complete(p, NAME);
        }
        _ => p.error_recover("expected identifier", recovery),
    }
}

fn name_ref(p: &mut Parser<'_>) {
    debug_assert_eq!(p.peek_kind(), IDENT);
    let m = p.start();
    p.advance();
    m.complete(p, NAME_REF);
}

/// `a::b::c`
pub(crate) fn path(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    name_ref(p);
    while p.eat(COLON2) {
        if p.at(IDENT) {
            name_ref(p);
        } else {
            p.error("expected identifier");
            break;
        }
    }
    m.complete(p, PATH)
}

pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    unexpected_delim_message: &'static str,
    first_set: &SyntaxSet,
    mut parser: impl FnMut(&mut Parser<'_>) -> bool,
) {
    debug_assert_eq!(p.peek_kind(), bra);
    p.advance();

    while !p.at(ket) && !p.at(EOF) {
        if p.at(delim) {
            p.error_and_bump(unexpected_delim_message);
            continue;
        }

        if !parser(p) {
            break;
        }

        if !p.eat(delim) {
            if p.at_set(first_set) {
                p.expect(delim);
            } else {
                break;
            }
        }
    }

    p.expect(ket);
}

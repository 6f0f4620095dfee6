use ferrite_yellow::SyntaxKind::{self, *};
use ferrite_yellow::SyntaxSet;

use super::{delimited, exprs, name, path, patterns, types};
use crate::parser::{CompletedMarker, Marker, Parser};

pub(crate) const ITEM_FIRST: SyntaxSet =
    SyntaxSet::new([POUND, PUB_KW, FN_KW, STRUCT_KW, CONST_KW, USE_KW, MOD_KW]);

const ITEM_RECOVERY: SyntaxSet =
    ITEM_FIRST.union(&SyntaxSet::new([LEFT_PAREN, SEMICOLON, COLON, EQ, ARROW]));

const FIELD_FIRST: SyntaxSet = SyntaxSet::new([IDENT, PUB_KW, POUND]);

pub(crate) fn source_file(p: &mut Parser<'_>) {
    let m = p.start();

    // Inner attributes, up to the first outer one.
    while p.at(POUND) {
        let (attr, inner) = attr(p);
        if !inner {
            let item = attr.precede(p);
            item_rest(p, item, true);
            break;
        }
    }

    while !p.at(EOF) {
        item(p);
    }

    p.advance_eof();
    m.complete(p, SOURCE_FILE);
}

pub(crate) fn item(p: &mut Parser<'_>) {
    let m = p.start();
    item_rest(p, m, false);
}

/// Parses the rest of an item whose marker is already open. `has_prefix` is
/// set when tokens were consumed under `m` already.
fn item_rest(p: &mut Parser<'_>, m: Marker, mut has_prefix: bool) {
    while p.at(POUND) {
        attr(p);
        has_prefix = true;
    }
    if p.at(PUB_KW) {
        let vis = p.start();
        p.advance();
        vis.complete(p, VISIBILITY);
        has_prefix = true;
    }

    let kind = match p.peek_kind() {
        FN_KW => fn_item(p),
        STRUCT_KW => struct_item(p),
        CONST_KW => const_item(p),
        USE_KW => use_item(p),
        MOD_KW => mod_item(p),
        _ if has_prefix => {
            p.error("expected an item");
            ERROR
        }
        SEMICOLON => {
            m.abandon(p);
            p.error_and_bump("expected item, found `;`");
            return;
        }
        _ => {
            m.abandon(p);
            p.error_and_bump("expected an item");
            return;
        }
    };
    m.complete(p, kind);
}

/// `#[path]` or `#![path]`; returns whether the attribute is an inner one.
fn attr(p: &mut Parser<'_>) -> (CompletedMarker, bool) {
    debug_assert_eq!(p.peek_kind(), POUND);
    let m = p.start();
    p.advance();
    let inner = p.eat(BANG);

    if p.eat(LEFT_BRACKET) {
        if p.at(IDENT) {
            path(p);
        } else {
            p.error("expected a path");
        }
        p.expect(RIGHT_BRACKET);
    } else {
        p.error("expected `[`");
    }

    (m.complete(p, ATTR), inner)
}

fn fn_item(p: &mut Parser<'_>) -> SyntaxKind {
    debug_assert_eq!(p.peek_kind(), FN_KW);
    p.advance();
    name(p, &ITEM_RECOVERY);

    if p.at(LEFT_PAREN) {
        param_list(p);
    } else {
        p.error("expected function parameters");
    }

    if p.at(ARROW) {
        let m = p.start();
        p.advance();
        types::expect_type(p);
        m.complete(p, RET_TYPE);
    }

    if !p.eat(SEMICOLON) {
        exprs::expect_block(p);
    }
    FN_ITEM
}

fn param_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(
        p,
        LEFT_PAREN,
        RIGHT_PAREN,
        COMMA,
        "expected parameter",
        &patterns::PAT_FIRST,
        param,
    );
    m.complete(p, PARAM_LIST);
}

fn param(p: &mut Parser<'_>) -> bool {
    if !p.at_set(&patterns::PAT_FIRST) {
        return false;
    }

    let m = p.start();
    patterns::pattern(p);

    if p.at(COLON) {
        types::ascription(p);
    } else {
        p.error("missing type for function parameter");
    }

    m.complete(p, PARAM);
    true
}

fn struct_item(p: &mut Parser<'_>) -> SyntaxKind {
    debug_assert_eq!(p.peek_kind(), STRUCT_KW);
    p.advance();
    name(p, &ITEM_RECOVERY);

    match p.peek_kind() {
        LEFT_BRACE => field_list(p),
        SEMICOLON => p.advance(),
        _ => p.error("expected `{` or `;`"),
    }
    STRUCT_ITEM
}

fn field_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LEFT_BRACE, RIGHT_BRACE, COMMA, "expected field", &FIELD_FIRST, field);
    m.complete(p, FIELD_LIST);
}

fn field(p: &mut Parser<'_>) -> bool {
    if !p.at_set(&FIELD_FIRST) {
        return false;
    }

    let m = p.start();
    while p.at(POUND) {
        attr(p);
    }
    if p.at(PUB_KW) {
        let vis = p.start();
        p.advance();
        vis.complete(p, VISIBILITY);
    }
    name(p, &SyntaxSet::new([COLON, COMMA]));

    if p.at(COLON) {
        types::ascription(p);
    } else {
        p.error("missing type for field");
    }

    m.complete(p, FIELD);
    true
}

fn const_item(p: &mut Parser<'_>) -> SyntaxKind {
    debug_assert_eq!(p.peek_kind(), CONST_KW);
    p.advance();
    name(p, &ITEM_RECOVERY);

    if p.at(COLON) {
        types::ascription(p);
    } else {
        p.error("missing type for `const` item");
    }
    if p.eat(EQ) {
        exprs::expr(p);
    }

    p.expect(SEMICOLON);
    CONST_ITEM
}

fn use_item(p: &mut Parser<'_>) -> SyntaxKind {
    debug_assert_eq!(p.peek_kind(), USE_KW);
    p.advance();

    if p.at(IDENT) {
        path(p);
    } else {
        p.error("expected a path");
    }

    p.expect(SEMICOLON);
    USE_ITEM
}

fn mod_item(p: &mut Parser<'_>) -> SyntaxKind {
    debug_assert_eq!(p.peek_kind(), MOD_KW);
    p.advance();
    name(p, &ITEM_RECOVERY);

    if p.at(LEFT_BRACE) {
        let m = p.start();
        p.advance();
        while !p.at(RIGHT_BRACE) && !p.at(EOF) {
            item(p);
        }
        p.expect(RIGHT_BRACE);
        m.complete(p, ITEM_LIST);
    } else {
        p.expect(SEMICOLON);
    }
    MOD_ITEM
}

//! Lexer for the Rust subset understood by the parser.
//!
//! Every token carries its trivia: leading trivia is everything between the
//! previous token's trailing trivia and the token itself, trailing trivia runs
//! up to (not including) the next newline. Concatenating all tokens with their
//! trivia reproduces the input exactly.

mod cursor;

use cursor::Cursor;
pub use ferrite_yellow::SyntaxKind;
use ferrite_yellow::SyntaxKind::*;
use ferrite_yellow::{TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub leading: Vec<TriviaPiece>,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: Vec<TriviaPiece>,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: Vec::new(),
        trailing: Vec::new(),
    };

    /// Range of the token with its trivia.
    pub fn full_range(&self) -> TextRange {
        let leading: TextSize = self.leading.iter().map(|piece| piece.len).sum();
        let trailing: TextSize = self.trailing.iter().map(|piece| piece.len).sum();
        TextRange::new(self.kind_range.start() - leading, self.kind_range.end() + trailing)
    }
}

/// One-token lookahead lexer. After the input is exhausted it keeps returning
/// `EOF` tokens.
pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    current: Token,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokenizer = Self { text, cursor: Cursor::new(text), current: Token::EOF };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let len = self.cursor.pos_within_token();
        TextRange::at(self.offset() - len, len)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    /// Returns the current token and scans the next one.
    pub fn next_token(&mut self) -> Token {
        let leading = self.trivia(false);
        let (kind, kind_range) = self.syntax_kind();
        let trailing = if kind == EOF { Vec::new() } else { self.trivia(true) };

        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn trivia(&mut self, trailing: bool) -> Vec<TriviaPiece> {
        let mut pieces = Vec::new();
        loop {
            let kind = match self.cursor.peek() {
                _ if self.cursor.is_eof() => break,
                '\n' if trailing => break,
                '\n' => {
                    self.cursor.advance();
                    TriviaPieceKind::Newline
                }
                '\r' if self.cursor.second() == '\n' => {
                    if trailing {
                        break;
                    }
                    self.cursor.advance();
                    self.cursor.advance();
                    TriviaPieceKind::Newline
                }
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n' && c != '\r');
                    TriviaPieceKind::SingleLineComment
                }
                c if c.is_whitespace() => {
                    self.cursor.advance_while(|c| {
                        c.is_whitespace() && c != '\n' && c != '\r'
                    });
                    // A lone `\r` is plain whitespace.
                    if self.cursor.pos_within_token() == TextSize::new(0) {
                        self.cursor.advance();
                    }
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
        pieces
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        if self.cursor.is_eof() {
            return (EOF, TextRange::empty(self.offset()));
        }

        let kind = match self.cursor.advance() {
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            ';' => SEMICOLON,
            '#' => POUND,
            ':' if self.cursor.eat(':') => COLON2,
            ':' => COLON,
            '.' if self.cursor.eat('.') => DOT2,
            '.' => DOT,
            '=' if self.cursor.eat('=') => BINARY_OPERATOR,
            '=' => EQ,
            '!' if self.cursor.eat('=') => BINARY_OPERATOR,
            '!' => BANG,
            '-' if self.cursor.eat('>') => ARROW,
            '&' if self.cursor.eat('&') => BINARY_OPERATOR,
            '&' => AMP,
            '|' => {
                self.cursor.eat('|');
                BINARY_OPERATOR
            }
            '<' | '>' => {
                self.cursor.eat('=');
                BINARY_OPERATOR
            }
            '+' | '-' | '*' | '/' | '%' | '^' => BINARY_OPERATOR,
            '"' => self.string(),
            first_char @ '0'..='9' => self.number(first_char),
            c if is_ident_start(c) => {
                self.cursor.advance_while(is_ident_continue);

                match self.text() {
                    "_" => UNDERSCORE,
                    ident => SyntaxKind::from_keyword(ident).unwrap_or(IDENT),
                }
            }
            _ => UNKNOWN,
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    fn string(&mut self) -> SyntaxKind {
        while !self.cursor.is_eof() {
            match self.cursor.advance() {
                '"' => break,
                '\\' => {
                    self.cursor.advance();
                }
                _ => {}
            }
        }
        STRING
    }

    fn number(&mut self, c: char) -> SyntaxKind {
        if c == '0' {
            match self.cursor.peek() {
                'b' | 'o' => {
                    self.cursor.advance();
                    self.digits(false);
                }
                'x' => {
                    self.cursor.advance();
                    self.digits(true);
                }
                '0'..='9' | '_' | '.' | 'e' | 'E' => {
                    self.digits(false);
                }
                _ => return INT_NUMBER,
            }
        } else {
            self.digits(false);
        }

        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.digits(false);
            self.float_exponent();
            return FLOAT_NUMBER;
        }

        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.float_exponent();
            return FLOAT_NUMBER;
        }

        INT_NUMBER
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '_' | '0'..='9' => {
                    self.cursor.advance();
                }
                'a'..='f' | 'A'..='F' if allow_hex => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn float_exponent(&mut self) {
        if self.cursor.eat('e') || self.cursor.eat('E') {
            if !self.cursor.eat('-') {
                self.cursor.eat('+');
            }
            self.digits(false);
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields every token up to, but not including, `EOF`.
    fn next(&mut self) -> Option<Token> {
        (self.peek().kind != EOF).then(|| self.next_token())
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

//! The lexer: turns a source buffer into a stream of [`Token`]s.
//!
//! Unlike a plain `Iterator`-based scanner, the parser needs one token of
//! lookahead beyond the current token to decide things like whether `(`
//! starts a call or a parenthesized expression continuation. [`Lexer`]
//! exposes that directly as `peek(0)`/`peek(1)` plus `eat()`, backed by a
//! two-slot cache, rather than making every caller juggle its own
//! lookahead buffer.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

const LOOKAHEAD: usize = 2;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    cache: [Option<Token<'a>>; LOOKAHEAD],
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), cache: [None, None] }
    }

    /// The token `k` positions ahead of the current one (`k` is 0 or 1).
    ///
    /// # Panics
    ///
    /// Panics if `k >= 2`; the parser never needs more than one token of
    /// lookahead beyond the current token.
    pub fn peek(&mut self, k: usize) -> Token<'a> {
        assert!(k < LOOKAHEAD, "lexer only supports {LOOKAHEAD}-token lookahead");
        self.fill_to(k);
        self.cache[k].expect("just filled")
    }

    /// Consumes and returns the current token, advancing the cache.
    pub fn eat(&mut self) -> Token<'a> {
        self.fill_to(0);
        let token = self.cache[0].take().expect("just filled");
        self.cache[0] = self.cache[1].take();
        token
    }

    fn fill_to(&mut self, k: usize) {
        for slot in 0..=k {
            if self.cache[slot].is_none() {
                self.cache[slot] = Some(self.scan_token());
            }
        }
    }

    fn scan_token(&mut self) -> Token<'a> {
        self.skip_trivia();

        if let Some(unclosed) = self.try_scan_block_comment_tail() {
            return unclosed;
        }

        let start = self.cursor.position();
        let (line, column) = (self.cursor.line(), self.cursor.column());
        let c = self.cursor.current();

        if c == 0 {
            return self.make(TokenKind::Eof, start, line, column);
        }

        if is_ident_start(c) {
            return self.scan_identifier(start, line, column);
        }
        if c.is_ascii_digit() {
            return self.scan_number(start, line, column);
        }
        if c == b'"' {
            return self.scan_string(start, line, column);
        }

        self.scan_operator(start, line, column)
    }

    /// Skips whitespace and line comments. Block comments are handled
    /// separately by [`try_scan_block_comment_tail`] so an unterminated one
    /// can still produce a token instead of silently consuming to EOF.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' => self.cursor.advance(),
                b'/' if self.cursor.byte_at(1) == b'/' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
                        self.cursor.advance();
                    }
                }
                b'/' if self.cursor.byte_at(1) == b'*' => break,
                _ => break,
            }
        }
    }

    /// If positioned at `/*`, consumes the block comment. Returns
    /// `Some(token)` only when the comment runs off the end of input
    /// unterminated; a properly closed comment is trivia and this resumes
    /// normal scanning (via a recursive call to pick up what follows).
    fn try_scan_block_comment_tail(&mut self) -> Option<Token<'a>> {
        if !(self.cursor.current() == b'/' && self.cursor.byte_at(1) == b'*') {
            return None;
        }
        let start = self.cursor.position();
        let (line, column) = (self.cursor.line(), self.cursor.column());
        self.cursor.advance();
        self.cursor.advance();
        while !self.cursor.is_at_end() && !(self.cursor.current() == b'*' && self.cursor.byte_at(1) == b'/') {
            self.cursor.advance();
        }
        if self.cursor.is_at_end() {
            return Some(self.make(TokenKind::UnclosedComment, start, line, column));
        }
        self.cursor.advance();
        self.cursor.advance();
        Some(self.scan_token())
    }

    fn scan_identifier(&mut self, start: usize, line: u32, column: u32) -> Token<'a> {
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.make(kind, start, line, column)
    }

    fn scan_number(&mut self, start: usize, line: u32, column: u32) -> Token<'a> {
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }
        let mut kind = TokenKind::IntLiteral;
        if self.cursor.current() == b'.' && self.cursor.byte_at(1).is_ascii_digit() {
            kind = TokenKind::DoubleLiteral;
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        self.make(kind, start, line, column)
    }

    fn scan_string(&mut self, start: usize, line: u32, column: u32) -> Token<'a> {
        self.cursor.advance(); // opening quote
        while !self.cursor.is_at_end() && self.cursor.current() != b'"' {
            self.cursor.advance();
        }
        if self.cursor.is_at_end() {
            return self.make(TokenKind::UnclosedString, start, line, column);
        }
        self.cursor.advance(); // closing quote
        self.make(TokenKind::StringLiteral, start, line, column)
    }

    fn scan_operator(&mut self, start: usize, line: u32, column: u32) -> Token<'a> {
        let c = self.cursor.current();
        let next = self.cursor.byte_at(1);

        let two_char = match (c, next) {
            (b'+', b'+') => Some(TokenKind::PlusPlus),
            (b'-', b'-') => Some(TokenKind::MinusMinus),
            (b'=', b'=') => Some(TokenKind::EqEq),
            (b'!', b'=') => Some(TokenKind::NotEq),
            (b'<', b'=') => Some(TokenKind::Le),
            (b'>', b'=') => Some(TokenKind::Ge),
            (b'&', b'&') => Some(TokenKind::AndAnd),
            (b'|', b'|') => Some(TokenKind::OrOr),
            _ => None,
        };
        if let Some(kind) = two_char {
            self.cursor.advance();
            self.cursor.advance();
            return self.make(kind, start, line, column);
        }

        let one_char = match c {
            b'+' => Some(TokenKind::Plus),
            b'-' => Some(TokenKind::Minus),
            b'*' => Some(TokenKind::Star),
            b'/' => Some(TokenKind::Slash),
            b'%' => Some(TokenKind::Percent),
            b'=' => Some(TokenKind::Eq),
            b'<' => Some(TokenKind::Lt),
            b'>' => Some(TokenKind::Gt),
            b'!' => Some(TokenKind::Bang),
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b'{' => Some(TokenKind::LBrace),
            b'}' => Some(TokenKind::RBrace),
            b',' => Some(TokenKind::Comma),
            b';' => Some(TokenKind::Semicolon),
            b'.' | b'[' | b']' => Some(TokenKind::Other(c)),
            _ => None,
        };

        match one_char {
            Some(kind) => {
                self.cursor.advance();
                self.make(kind, start, line, column)
            }
            None => {
                self.cursor.advance();
                self.make(TokenKind::Error, start, line, column)
            }
        }
    }

    fn make(&self, kind: TokenKind, start: usize, line: u32, column: u32) -> Token<'a> {
        let text = self.cursor.slice_from(start);
        Token::new(kind, text, cc_util::Span::new(start, self.cursor.position(), line, column))
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.eat();
            let done = token.kind.is_eof();
            out.push(token.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(
            kinds("if else while void int char double return"),
            vec![
                TokenKind::KwIf,
                TokenKind::KwElse,
                TokenKind::KwWhile,
                TokenKind::KwVoid,
                TokenKind::KwInt,
                TokenKind::KwChar,
                TokenKind::KwDouble,
                TokenKind::KwReturn,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn two_char_operators_beat_one_char() {
        assert_eq!(
            kinds("++ -- == != <= >= && ||"),
            vec![
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn int_vs_double_literal() {
        let mut lexer = Lexer::new("123 4.5 6.");
        assert_eq!(lexer.eat().kind, TokenKind::IntLiteral);
        assert_eq!(lexer.eat().kind, TokenKind::DoubleLiteral);
        // "6." has no digit after the dot, so it stays an int literal
        // followed by a separate '.' punctuator.
        assert_eq!(lexer.eat().kind, TokenKind::IntLiteral);
        assert_eq!(lexer.eat().kind, TokenKind::Other(b'.'));
    }

    #[test]
    fn unterminated_block_comment_is_its_own_token() {
        let mut lexer = Lexer::new("/* never closed");
        assert_eq!(lexer.eat().kind, TokenKind::UnclosedComment);
    }

    #[test]
    fn unterminated_string_is_its_own_token() {
        let mut lexer = Lexer::new("\"never closed");
        assert_eq!(lexer.eat().kind, TokenKind::UnclosedString);
    }

    #[test]
    fn unrecognized_byte_is_error() {
        let mut lexer = Lexer::new("@");
        assert_eq!(lexer.eat().kind, TokenKind::Error);
    }

    #[test]
    fn bare_ampersand_and_pipe_are_errors_not_other() {
        // `&&`/`||` are recognized operators, but a lone `&` or `|` isn't in
        // the grammar's single-char punctuator set, unlike `.`, `[`, `]`.
        let mut lexer = Lexer::new("&");
        assert_eq!(lexer.eat().kind, TokenKind::Error);
        let mut lexer = Lexer::new("|");
        assert_eq!(lexer.eat().kind, TokenKind::Error);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("int x");
        assert_eq!(lexer.peek(0).kind, TokenKind::KwInt);
        assert_eq!(lexer.peek(1).kind, TokenKind::Identifier);
        assert_eq!(lexer.peek(0).kind, TokenKind::KwInt);
        assert_eq!(lexer.eat().kind, TokenKind::KwInt);
        assert_eq!(lexer.eat().kind, TokenKind::Identifier);
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        let mut lexer = Lexer::new("1 // comment\n2");
        assert_eq!(lexer.eat().kind, TokenKind::IntLiteral);
        assert_eq!(lexer.eat().kind, TokenKind::IntLiteral);
    }

    #[test]
    fn roundtrip_reproduces_source_bytes() {
        let source = "int main ( void ) { return 0 ; } // trailing\n";
        let mut lexer = Lexer::new(source);
        let mut rebuilt = String::new();
        let mut last_end = 0usize;
        loop {
            let token = lexer.eat();
            rebuilt.push_str(&source[last_end..token.span.start]);
            rebuilt.push_str(token.text);
            last_end = token.span.end;
            if token.kind.is_eof() {
                break;
            }
        }
        rebuilt.push_str(&source[last_end..]);
        assert_eq!(rebuilt, source);
    }
}

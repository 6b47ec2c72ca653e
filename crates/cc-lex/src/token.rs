//! Token kinds and the token type itself.

use cc_util::Span;

/// The lexical class of a token.
///
/// ASCII punctuators and operators that are a single character wide are
/// collapsed to one variant each, mirroring the convention that a token's
/// kind is "just the character" for the single-byte case and a distinct tag
/// for anything longer. There's no behavioral difference in Rust between
/// that and a `u32`-coded kind, but it keeps the mapping from source text to
/// kind obvious at a glance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Error,
    Identifier,

    KwVoid,
    KwChar,
    KwInt,
    KwDouble,
    KwReturn,
    KwIf,
    KwElse,
    KwWhile,

    IntLiteral,
    DoubleLiteral,
    StringLiteral,

    UnclosedComment,
    UnclosedString,

    PlusPlus,
    MinusMinus,
    EqEq,
    NotEq,
    Le,
    Ge,
    AndAnd,
    OrOr,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    Lt,
    Gt,
    Bang,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,

    /// A single ASCII punctuator this language's grammar has no use for
    /// (`.`, `[`, `]`) but that the lexer still recognizes rather than
    /// rejecting outright. Carries the byte itself, same as the
    /// grammar-significant punctuators above would if they weren't broken
    /// out into their own named variants. Bare `&`/`|` (only meaningful as
    /// `&&`/`||`) are not in this set — they fall through to `Error`.
    Other(u8),
}

impl TokenKind {
    /// Looks up the keyword kind for `text`, if any.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        Some(match text {
            "void" => TokenKind::KwVoid,
            "char" => TokenKind::KwChar,
            "int" => TokenKind::KwInt,
            "double" => TokenKind::KwDouble,
            "return" => TokenKind::KwReturn,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "while" => TokenKind::KwWhile,
            _ => return None,
        })
    }

    pub fn is_eof(self) -> bool {
        matches!(self, TokenKind::Eof)
    }
}

/// A single lexical token: its kind, the exact source slice it came from,
/// and the position that slice starts at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }
}

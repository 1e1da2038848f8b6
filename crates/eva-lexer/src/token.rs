//! Token definitions for the Eva lexer.

use logos::Logos;
use std::fmt;

/// Represents a token in Eva source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// The different kinds of tokens in an s-expression source.
///
/// Eva has no keywords at the lexical level: `begin`, `var`, `if` and
/// friends are ordinary symbols that the lowerer recognizes by name.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r";[^\n]*")]
pub enum TokenKind {
    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[regex(r"-?[0-9]+", priority = 10)]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    // Identifiers plus the operator characters, so `+`, `!=` and `->`
    // all lex as plain symbols.
    #[regex(r"[a-zA-Z_+*/%<>=!-][a-zA-Z0-9_+*/%<>=!-]*")]
    Symbol,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Symbol => write!(f, "symbol"),
        }
    }
}

//! Lexical analysis for the Eva language.
//!
//! This crate tokenizes Eva s-expression source into a stream of tokens.

mod token;

pub use token::{Token, TokenKind};

use eva_core::{Error, Result, Span};
use logos::Logos;

/// Tokenizes Eva source code into a vector of tokens.
///
/// # Errors
/// Returns an error if the source contains an invalid token.
///
/// # Examples
/// ```
/// use eva_lexer::tokenize;
///
/// let tokens = tokenize("(var x 42)").unwrap();
/// assert_eq!(tokens.len(), 5);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        let kind = result
            .map_err(|()| Error::Lexer(format!("Invalid token '{}'", lexer.slice()), span))?;

        let text = lexer.slice().to_string();

        tokens.push((Token { kind, text }, span));
    }

    Ok(tokens)
}

//! Parser for the Eva language.
//!
//! This crate turns token streams into s-expression ASTs.

pub mod ast;

mod parser;

pub use ast::Expr;
pub use parser::Parser;

use eva_core::{Error, Result, Span};
use eva_lexer::Token;

/// Parses a slice of tokens into a single Eva expression.
///
/// Trailing tokens after the first complete expression are a syntax error;
/// the driver always wraps a program in one top-level `(begin ...)`, so a
/// well-formed input is exactly one expression.
///
/// # Errors
/// Returns an error if the token stream contains syntax errors.
///
/// # Examples
/// ```
/// use eva_lexer::tokenize;
/// use eva_parser::parse;
///
/// let tokens = tokenize("(begin (var x 42) x)").unwrap();
/// let ast = parse(&tokens).unwrap();
/// ```
pub fn parse(tokens: &[(Token, Span)]) -> Result<Expr> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;

    if !parser.is_at_end() {
        return Err(Error::Parser(
            format!("Unexpected '{}' after expression", parser.peek().0.text),
            parser.current_span(),
        ));
    }

    Ok(expr)
}

/// Parses a slice of tokens into a sequence of top-level expressions.
///
/// # Errors
/// Returns an error if the token stream contains syntax errors.
pub fn parse_program(tokens: &[(Token, Span)]) -> Result<Vec<Expr>> {
    Parser::new(tokens).parse_program()
}

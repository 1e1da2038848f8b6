//! Core parser structure and helper methods.

use crate::ast::Expr;
use eva_core::{Error, Result, Span};
use eva_lexer::{Token, TokenKind};

/// Parser for Eva s-expression token streams.
pub struct Parser<'a> {
    tokens: &'a [(Token, Span)],
    current: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given token stream.
    #[must_use]
    pub fn new(tokens: &'a [(Token, Span)]) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parses a whole program as a sequence of expressions.
    pub fn parse_program(&mut self) -> Result<Vec<Expr>> {
        let mut exprs = Vec::new();

        while !self.is_at_end() {
            exprs.push(self.parse_expr()?);
        }

        Ok(exprs)
    }

    /// Parses a single expression.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        if self.is_at_end() {
            return Err(Error::Parser(
                "Unexpected end of input".to_string(),
                self.current_span(),
            ));
        }

        let (token, span) = self.peek().clone();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = token.text.parse::<i32>().map_err(|_| {
                    Error::Parser(format!("Number literal '{}' out of range", token.text), span)
                })?;
                Ok(Expr::Number(value))
            }
            TokenKind::String => {
                self.advance();
                // Strip the surrounding quotes; escapes stay textual.
                let inner = &token.text[1..token.text.len() - 1];
                Ok(Expr::Str(inner.to_string()))
            }
            TokenKind::Symbol => {
                self.advance();
                Ok(Expr::Symbol(token.text))
            }
            TokenKind::LeftParen => self.parse_list(),
            TokenKind::RightParen => {
                Err(Error::Parser("Unexpected ')'".to_string(), span))
            }
        }
    }

    fn parse_list(&mut self) -> Result<Expr> {
        let open_span = self.expect(TokenKind::LeftParen)?;
        let mut items = Vec::new();

        while !self.check(TokenKind::RightParen) {
            if self.is_at_end() {
                return Err(Error::Parser(
                    "Unclosed '('".to_string(),
                    open_span,
                ));
            }
            items.push(self.parse_expr()?);
        }

        self.expect(TokenKind::RightParen)?;

        Ok(Expr::List(items))
    }

    // ==================== Helper Methods ====================

    pub(crate) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> &(Token, Span) {
        if self.is_at_end() {
            &self.tokens[self.tokens.len() - 1]
        } else {
            &self.tokens[self.current]
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().0.kind == kind
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Span> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(Error::Parser(
                format!("Expected '{}', found '{}'", kind, self.peek().0.text),
                self.current_span(),
            ))
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        if self.tokens.is_empty() {
            Span::new(0, 0)
        } else if self.is_at_end() {
            self.tokens[self.tokens.len() - 1].1
        } else {
            self.tokens[self.current].1
        }
    }
}

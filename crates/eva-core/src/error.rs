//! Error types and result aliases for the Eva compiler.

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main error type for the Eva compiler.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lexer error: {0}")]
    #[diagnostic(code(eva::lexer))]
    Lexer(String, #[label("here")] Span),

    #[error("Parser error: {0}")]
    #[diagnostic(code(eva::parser))]
    Parser(String, #[label("here")] Span),

    #[error("Variable \"{0}\" is not defined")]
    #[diagnostic(code(eva::unbound_name))]
    UnboundName(String),

    #[error("Malformed form: {0}")]
    #[diagnostic(code(eva::malformed_form))]
    MalformedForm(String),

    #[error("Code generation error: {0}")]
    #[diagnostic(code(eva::codegen))]
    Codegen(String),

    #[error("IR verification failed: {0}")]
    #[diagnostic(code(eva::verifier))]
    Verifier(String),
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start..span.end)
    }
}

/// Result type alias using the Eva Error type.
pub type Result<T> = std::result::Result<T, Error>;

//! Compilation pipeline stages.

use anyhow::Result;
use eva_core::Span;
use eva_lexer::{tokenize, Token};
use eva_parser::{parse, Expr};
use miette::NamedSource;

/// Wraps a program in its implicit top-level `begin` block, so every
/// compilation unit lowers as a single expression.
#[must_use]
pub fn wrap_program(source: &str) -> String {
    format!("(begin {source})")
}

/// Runs lexical analysis on (already wrapped) source code.
///
/// # Errors
/// Returns an error if lexical analysis fails.
pub fn lex(source: &str) -> Result<Vec<(Token, Span)>> {
    tokenize(source).map_err(|e| {
        let report = miette::Report::new(e)
            .with_source_code(NamedSource::new("program.eva", source.to_string()));
        eprintln!("{report:?}");
        anyhow::anyhow!("Lexical analysis failed")
    })
}

/// Parses tokens into the program's AST.
///
/// # Errors
/// Returns an error if parsing fails.
pub fn parse_tokens(tokens: &[(Token, Span)], source: &str) -> Result<Expr> {
    parse(tokens).map_err(|e| {
        let report = miette::Report::new(e)
            .with_source_code(NamedSource::new("program.eva", source.to_string()));
        eprintln!("{report:?}");
        anyhow::anyhow!("Parsing failed")
    })
}

/// Lowers the AST into the textual form of its LLVM module.
///
/// # Errors
/// Returns an error if lowering or IR verification fails.
pub fn lower(ast: &Expr, source: &str) -> Result<String> {
    eva_llvm::compile(ast).map_err(|e| {
        let report = miette::Report::new(e)
            .with_source_code(NamedSource::new("program.eva", source.to_string()));
        eprintln!("{report:?}");
        anyhow::anyhow!("Lowering failed")
    })
}

/// Runs the complete compilation pipeline and returns the textual IR.
///
/// # Errors
/// Returns an error if any stage fails.
pub fn build_pipeline(source: &str) -> Result<String> {
    let wrapped = wrap_program(source);
    let tokens = lex(&wrapped)?;
    let ast = parse_tokens(&tokens, &wrapped)?;
    lower(&ast, &wrapped)
}

/// Runs the complete compilation pipeline for checking (no output).
///
/// # Errors
/// Returns an error if any stage fails.
pub fn check_pipeline(source: &str) -> Result<()> {
    let _ir = build_pipeline(source)?;
    Ok(())
}

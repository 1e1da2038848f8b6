//! Tests for the Eva lexer.

use eva_lexer::{tokenize, TokenKind};

#[test]
fn test_tokenize_nested_lists() {
    let tokens = tokenize("(begin (var x 10) (set x 20))").unwrap();

    let parens = tokens
        .iter()
        .filter(|(t, _)| matches!(t.kind, TokenKind::LeftParen | TokenKind::RightParen))
        .count();
    assert_eq!(parens, 6);
}

#[test]
fn test_tokenize_string_literal() {
    let tokens = tokenize(r#"(printf "X: %d\n" x)"#).unwrap();

    assert_eq!(tokens.len(), 5);
    assert!(matches!(tokens[2].0.kind, TokenKind::String));
    assert_eq!(tokens[2].0.text, r#""X: %d\n""#);
}

#[test]
fn test_tokenize_operator_symbols() {
    for op in ["+", "-", "*", "/", "==", "!=", "<", "<=", ">", ">=", "->"] {
        let tokens = tokenize(op).unwrap();
        assert_eq!(tokens.len(), 1, "operator {op}");
        assert!(matches!(tokens[0].0.kind, TokenKind::Symbol));
        assert_eq!(tokens[0].0.text, op);
    }
}

#[test]
fn test_tokenize_skips_line_comments() {
    let source = "; greeting\n(printf \"hi\")";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens.len(), 4);
    assert!(matches!(tokens[0].0.kind, TokenKind::LeftParen));
}

#[test]
fn test_tokenize_spans_are_byte_ranges() {
    let tokens = tokenize("(var x 1)").unwrap();

    let (_, span) = &tokens[1];
    assert_eq!(span.start, 1);
    assert_eq!(span.end, 4);
}

#[test]
fn test_tokenize_rejects_invalid_input() {
    assert!(tokenize("(var x #)").is_err());
}

#[test]
fn test_tokenize_typed_declaration() {
    let tokens = tokenize("(var (s string) \"hello\")").unwrap();

    assert_eq!(tokens.len(), 8);
    assert!(matches!(tokens[4].0.kind, TokenKind::Symbol));
    assert_eq!(tokens[4].0.text, "string");
}

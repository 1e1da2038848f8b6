//! Abstract Syntax Tree (AST) definitions for Eva.

use std::fmt;

/// A parsed Eva expression.
///
/// Eva source is made of s-expressions, so the whole syntax fits in four
/// shapes. Compound forms (`begin`, `var`, `if`, ...) are `List`s whose head
/// is a `Symbol`; the lowerer dispatches on that head.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// 32-bit signed integer literal.
    Number(i32),

    /// String literal with surrounding quotes stripped. Escape sequences
    /// stay textual (`\n` is a backslash followed by `n`); they are decoded
    /// when the string is interned as a global.
    Str(String),

    /// An identifier, an operator, or the literals `true`/`false`.
    Symbol(String),

    /// An ordered sequence of subexpressions.
    List(Vec<Expr>),
}

impl Expr {
    /// Returns the symbol text when this expression is a `Symbol`.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the element list when this expression is a `List`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

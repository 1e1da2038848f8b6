//! Source type annotations and their LLVM counterparts.
//!
//! Eva has two declarable primitive types: `number` (`i32`) and `string`
//! (pointer to byte). Untyped declarations default to `number`.

use eva_core::{Error, Result};
use eva_parser::Expr;
use inkwell::context::Context;
use inkwell::types::BasicTypeEnum;
use inkwell::AddressSpace;

/// Maps a source type name to its LLVM type.
///
/// Unknown names silently fall back to `i32`, the `number` default.
pub(crate) fn resolve<'ctx>(context: &'ctx Context, name: &str) -> BasicTypeEnum<'ctx> {
    match name {
        "string" => context.ptr_type(AddressSpace::default()).into(),
        _ => context.i32_type().into(),
    }
}

/// Extracts the variable name from a declarator.
///
/// A declarator is either a bare symbol (`x`) or a `(name type)` pair
/// (`(s string)`).
pub(crate) fn declared_name(decl: &Expr) -> Result<&str> {
    match decl {
        Expr::Symbol(name) => Ok(name),
        Expr::List(items) => match items.first() {
            Some(Expr::Symbol(name)) => Ok(name),
            _ => Err(Error::MalformedForm(format!("Invalid declarator '{decl}'"))),
        },
        _ => Err(Error::MalformedForm(format!("Invalid declarator '{decl}'"))),
    }
}

/// Extracts the declared LLVM type from a declarator; bare symbols default
/// to `number`.
pub(crate) fn declared_type<'ctx>(
    context: &'ctx Context,
    decl: &Expr,
) -> Result<BasicTypeEnum<'ctx>> {
    match decl {
        Expr::Symbol(_) => Ok(context.i32_type().into()),
        Expr::List(items) => match items.as_slice() {
            [Expr::Symbol(_), Expr::Symbol(annotation)] => Ok(resolve(context, annotation)),
            _ => Err(Error::MalformedForm(format!("Invalid declarator '{decl}'"))),
        },
        _ => Err(Error::MalformedForm(format!("Invalid declarator '{decl}'"))),
    }
}

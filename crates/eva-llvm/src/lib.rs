//! LLVM IR lowering for the Eva language.
//!
//! The entry point is [`AstLowering`], which walks a parsed s-expression
//! tree and emits a verifier-clean LLVM module through [inkwell]. Programs
//! compile into a `main` function returning `i32`; nested `def` forms become
//! additional module-level functions.
//!
//! # Example
//!
//! ```no_run
//! use eva_lexer::tokenize;
//! use eva_parser::parse;
//!
//! let tokens = tokenize("(begin (printf \"%d\\n\" 42))").unwrap();
//! let ast = parse(&tokens).unwrap();
//! let ir = eva_llvm::compile(&ast).unwrap();
//! assert!(ir.contains("@printf"));
//! ```

mod env;
mod lowering;
mod types;

pub use env::{Binding, Environment};
pub use lowering::AstLowering;

use eva_core::Result;
use eva_parser::Expr;
use inkwell::context::Context;

/// Compiles one Eva program into the textual form of its LLVM module.
///
/// # Errors
/// Returns an error if lowering fails or the module does not verify.
pub fn compile(ast: &Expr) -> Result<String> {
    let context = Context::create();
    let mut lowering = AstLowering::new(&context);
    lowering.lower_program(ast)?;
    Ok(lowering.print_ir())
}

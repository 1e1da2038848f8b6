//! Implementation of the `eva build` command.

use crate::compiler::Compiler;
use anyhow::Result;
use std::path::Path;

/// Executes the `build` command: compile, print the module, persist it.
///
/// # Errors
/// Returns an error if the program cannot be compiled or written.
pub fn execute(file: &Path, output: &Path) -> Result<()> {
    let compiler = Compiler::new(file.to_path_buf());
    let _ = compiler.build(output)?;

    Ok(())
}

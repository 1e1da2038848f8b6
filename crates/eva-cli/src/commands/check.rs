//! Implementation of the `eva check` command.

use crate::compiler::Compiler;
use anyhow::Result;
use std::path::Path;

/// Executes the `check` command: run the pipeline, write nothing.
///
/// # Errors
/// Returns an error if the program contains errors.
pub fn execute(file: &Path) -> Result<()> {
    let compiler = Compiler::new(file.to_path_buf());
    let _ = compiler.check()?;

    Ok(())
}

//! Compiler driver implementation.
//!
//! Pipeline: Source → Lexer → Parser → AST → LLVM lowering → textual IR

use crate::pipeline;
use crate::utils::print_status;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Compiler driver for a single Eva program.
pub struct Compiler {
    source_path: PathBuf,
}

impl Compiler {
    /// Creates a driver for the given source file.
    #[must_use]
    pub fn new(source_path: PathBuf) -> Self {
        Self { source_path }
    }

    /// Compiles the program, prints the module to stdout, and persists the
    /// textual IR to `output`.
    ///
    /// # Errors
    /// Returns an error if compilation fails at any stage or the output
    /// file cannot be written.
    pub fn build(&self, output: &Path) -> Result<Duration> {
        let start = Instant::now();
        print_status("Compiling", &self.source_path);

        let source = self.read_source()?;
        let ir = pipeline::build_pipeline(&source)?;

        println!("{ir}");
        fs::write(output, &ir)
            .with_context(|| format!("Failed to write {}", output.display()))?;

        let duration = start.elapsed();
        self.print_build_success(output, duration);

        Ok(duration)
    }

    /// Checks the program for errors without writing output.
    ///
    /// # Errors
    /// Returns an error if the program contains errors.
    pub fn check(&self) -> Result<Duration> {
        let start = Instant::now();
        print_status("Checking", &self.source_path);

        let source = self.read_source()?;
        pipeline::check_pipeline(&source)?;

        let duration = start.elapsed();
        self.print_check_success(duration);

        Ok(duration)
    }

    /// Compiles a source string straight to textual IR, the way `build`
    /// would, without touching the filesystem.
    ///
    /// # Errors
    /// Returns an error if compilation fails at any stage.
    pub fn compile_source(source: &str) -> Result<String> {
        pipeline::build_pipeline(source)
    }

    /// Returns the source file this driver compiles.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn read_source(&self) -> Result<String> {
        fs::read_to_string(&self.source_path)
            .with_context(|| format!("Failed to read {}", self.source_path.display()))
    }

    fn print_build_success(&self, output: &Path, duration: Duration) {
        use colored::Colorize;
        eprintln!(
            "    {} module written to {} in {:.2}s",
            "Finished".green().bold(),
            output.display(),
            duration.as_secs_f64()
        );
    }

    fn print_check_success(&self, duration: Duration) {
        use colored::Colorize;
        eprintln!(
            "    {} program checked successfully in {:.2}s",
            "Finished".green().bold(),
            duration.as_secs_f64()
        );
    }
}

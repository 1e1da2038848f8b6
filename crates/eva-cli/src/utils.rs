//! Small helpers for the command-line interface.

use colored::Colorize;
use std::path::Path;

/// Prints a cargo-style status line. Status goes to stderr so stdout stays
/// a clean IR stream for piping.
pub fn print_status(action: &str, path: &Path) {
    eprintln!("{:>12} {}", action.green().bold(), path.display());
}

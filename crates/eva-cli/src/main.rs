//! Command-line interface for the Eva compiler.

mod commands;
mod compiler;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eva")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a program and write its LLVM module
    #[command(visible_alias = "b")]
    Build {
        /// Source file to compile
        file: PathBuf,

        /// Where to persist the textual IR
        #[arg(short, long, default_value = "out.ll")]
        output: PathBuf,
    },

    /// Check a program for errors without writing output
    Check {
        /// Source file to check
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { file, output } => commands::build::execute(&file, &output),
        Commands::Check { file } => commands::check::execute(&file),
    }
}

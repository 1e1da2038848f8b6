//! Tests for the CLI driver.

use eva_cli::Compiler;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_compile_source_emits_main() {
    let ir = Compiler::compile_source("(printf \"%d\\n\" 42)").unwrap();

    assert!(ir.contains("define i32 @main()"));
    assert!(ir.contains("@printf"));
}

#[test]
fn test_build_writes_module_file() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("main.eva");
    fs::write(&source_path, "(var x 1) (printf \"%d\" x)").unwrap();

    let output = dir.path().join("out.ll");
    let compiler = Compiler::new(source_path);
    compiler.build(&output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("define i32 @main()"));
    assert!(written.contains("ret i32 0"));
}

#[test]
fn test_check_accepts_valid_program() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("main.eva");
    fs::write(&source_path, "(def square (x) (* x x)) (printf \"%d\" (square 3))").unwrap();

    assert!(Compiler::new(source_path).check().is_ok());
}

#[test]
fn test_check_reports_unbound_names() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("main.eva");
    fs::write(&source_path, "(printf \"%d\" missing)").unwrap();

    assert!(Compiler::new(source_path).check().is_err());
}

#[test]
fn test_compile_source_rejects_syntax_errors() {
    assert!(Compiler::compile_source("(var x 1").is_err());
}

#[test]
fn test_build_fails_on_missing_file() {
    let dir = TempDir::new().unwrap();
    let compiler = Compiler::new(dir.path().join("nope.eva"));

    assert!(compiler.build(&dir.path().join("out.ll")).is_err());
}

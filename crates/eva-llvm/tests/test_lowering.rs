//! Tests for AST-to-LLVM lowering.
//!
//! Programs are compiled the way the driver compiles them (wrapped in one
//! top-level `begin`) and assertions are made on the printed module text.

use eva_core::Error;
use eva_lexer::tokenize;
use eva_parser::parse;

fn compile(source: &str) -> String {
    try_compile(source).unwrap()
}

fn try_compile(source: &str) -> Result<String, Error> {
    let wrapped = format!("(begin {source})");
    let tokens = tokenize(&wrapped).unwrap();
    let ast = parse(&tokens).unwrap();
    eva_llvm::compile(&ast)
}

/// The first line of the given instruction's enclosing module text that
/// contains all the needles, or a panic naming the missing one.
fn line_with<'a>(ir: &'a str, needles: &[&str]) -> &'a str {
    ir.lines()
        .find(|line| needles.iter().all(|needle| line.contains(needle)))
        .unwrap_or_else(|| panic!("no line containing {needles:?} in:\n{ir}"))
}

#[test]
fn test_number_literal() {
    let ir = compile("(printf \"%d\" 42)");
    assert!(ir.contains("i32 42"));
}

#[test]
fn test_boolean_literals_are_i1() {
    let ir = compile("(printf \"True: %d\\n\" true)");

    assert!(ir.contains("i1 true"));
    // The interned format string has its newline decoded and a trailing NUL.
    assert!(ir.contains("c\"True: %d\\0A\\00\""));
}

#[test]
fn test_string_interned_as_private_global() {
    let ir = compile("(printf \"hello\")");
    line_with(&ir, &["@str", "private", "constant", "c\"hello\\00\""]);
}

#[test]
fn test_printf_declared_variadic() {
    let ir = compile("(printf \"%d\" 1)");

    assert!(ir.contains("declare i32 @printf(ptr, ...)"));
    line_with(&ir, &["call i32 (ptr, ...) @printf"]);
}

#[test]
fn test_var_allocates_loads_and_adds() {
    let ir = compile("(var z 32) (var x (+ z 11)) (printf \"X: %d\\n\" x)");

    line_with(&ir, &["%z = alloca i32"]);
    line_with(&ir, &["%x = alloca i32"]);
    line_with(&ir, &["load i32, ptr %z"]);
    line_with(&ir, &["add i32", "11"]);
    line_with(&ir, &["store i32", "ptr %x"]);
}

#[test]
fn test_allocas_stay_in_entry_block() {
    let ir = compile(
        "(var x 10) \
         (while (> x 0) \
           (begin (var y x) (set x (- x 1))))",
    );

    // Both slots must be allocated upstream of the loop blocks.
    let loop_start = ir.find("cond:").unwrap();
    let last_alloca = ir.rfind("alloca").unwrap();
    assert!(last_alloca < loop_start, "alloca emitted outside entry:\n{ir}");
}

#[test]
fn test_typed_string_variable() {
    let ir = compile("(var (s string) \"hi\") (printf s)");

    line_with(&ir, &["%s = alloca ptr"]);
    line_with(&ir, &["load ptr, ptr %s"]);
}

#[test]
fn test_if_joins_through_phi() {
    let ir = compile("(var x 1) (printf \"%d\" (if (== x 1) 10 20))");

    line_with(&ir, &["icmp eq i32"]);
    line_with(&ir, &["br i1", "%then", "%else"]);
    line_with(&ir, &["phi i32", "[ 10, %then ]", "[ 20, %else ]"]);
}

#[test]
fn test_nested_if_feeds_outer_phi_from_inner_join() {
    let ir = compile(
        "(var x 39) \
         (if (!= x 42) \
             (if (> x 42) (set x 300) (set x 200)) \
             (set x 100)) \
         (printf \"X: %d\\n\" x)",
    );

    // Two joins, one per `if`.
    assert_eq!(ir.matches("phi i32").count(), 2);

    // The outer join's then-edge comes from the inner join block, not from
    // the block the outer branch originally targeted.
    line_with(&ir, &["phi i32", "%ifend1 ]", "%else ]"]);
}

#[test]
fn test_comparisons_use_unsigned_predicates() {
    let ir = compile(
        "(var x 1) \
         (printf \"%d%d%d%d\" (< x 2) (<= x 2) (> x 0) (>= x 0))",
    );

    assert!(ir.contains("icmp ult i32"));
    assert!(ir.contains("icmp ule i32"));
    assert!(ir.contains("icmp ugt i32"));
    assert!(ir.contains("icmp uge i32"));
}

#[test]
fn test_arithmetic_operators() {
    let ir = compile("(printf \"%d\" (/ (* (- 9 3) 4) (+ 1 1)))");

    assert!(ir.contains("sub i32"));
    assert!(ir.contains("mul i32"));
    assert!(ir.contains("sdiv i32"));
    assert!(ir.contains("add i32"));
}

#[test]
fn test_while_loop_structure() {
    let ir = compile(
        "(var x 10) \
         (while (> x 0) \
           (begin (set x (- x 1)) (printf \"%d \" x)))",
    );

    assert!(ir.contains("cond:"));
    assert!(ir.contains("body:"));
    assert!(ir.contains("loopend:"));
    line_with(&ir, &["icmp ugt i32"]);
    // Back-edge into the condition block.
    assert!(ir.matches("br label %cond").count() >= 2);
}

#[test]
fn test_def_emits_function_with_param_slots() {
    let ir = compile(
        "(def square (x) (* x x)) \
         (def sum ((a number) (b number)) -> number (+ a b)) \
         (printf \"%d\\n\" (+ (square 2) (sum 2 3)))",
    );

    assert!(ir.contains("define i32 @square(i32 %x)"));
    assert!(ir.contains("define i32 @sum(i32 %a, i32 %b)"));
    // Arguments are copied into entry-block slots.
    line_with(&ir, &["store i32 %x,"]);
    line_with(&ir, &["call i32 @square(i32 2)"]);
    line_with(&ir, &["call i32 @sum(i32 2, i32 3)"]);
}

#[test]
fn test_def_supports_recursion() {
    let ir = compile(
        "(def fact ((n number)) -> number \
           (if (== n 0) 1 (* n (fact (- n 1))))) \
         (printf \"%d\\n\" (fact 5))",
    );

    assert!(ir.contains("define i32 @fact(i32 %n)"));
    line_with(&ir, &["call i32 @fact(", "tmpsub"]);
}

#[test]
fn test_var_shadows_predeclared_global() {
    let ir = compile("(var VERSION 43) (printf \"Version: %d\\n\" VERSION)");

    line_with(&ir, &["@VERSION = global i32 44"]);
    line_with(&ir, &["%VERSION = alloca i32"]);
    // The read goes through the local slot, not the module global.
    assert!(ir.contains("load i32, ptr %VERSION"));
    assert!(!ir.contains("load i32, ptr @VERSION"));
}

#[test]
fn test_global_read_without_shadow() {
    let ir = compile("(printf \"Version: %d\\n\" VERSION)");
    line_with(&ir, &["load i32, ptr @VERSION"]);
}

#[test]
fn test_begin_scopes_shadow_and_restore() {
    let ir = compile(
        "(var x 1) \
         (begin (var x 2) (printf \"%d\" x)) \
         (printf \"%d\" x)",
    );

    line_with(&ir, &["%x = alloca i32"]);
    line_with(&ir, &["%x1 = alloca i32"]);

    // Inner read resolves to the inner slot, outer read to the outer slot.
    let inner_load = ir.find("load i32, ptr %x1").unwrap();
    let outer_load = ir.find("load i32, ptr %x, align").unwrap();
    assert!(inner_load < outer_load);
}

#[test]
fn test_main_returns_zero() {
    let ir = compile("(printf \"%d\" 1)");

    assert!(ir.contains("define i32 @main()"));
    assert!(ir.contains("ret i32 0"));
}

#[test]
fn test_unbound_name_is_fatal() {
    assert!(matches!(
        try_compile("(printf \"%d\" nope)"),
        Err(Error::UnboundName(name)) if name == "nope"
    ));
}

#[test]
fn test_unbound_call_target_is_fatal() {
    assert!(matches!(
        try_compile("(nope 1 2)"),
        Err(Error::UnboundName(_))
    ));
}

#[test]
fn test_calling_a_variable_is_rejected() {
    assert!(matches!(
        try_compile("(var f 1) (f 2)"),
        Err(Error::Codegen(_))
    ));
}

#[test]
fn test_malformed_forms_are_fatal() {
    for source in [
        "(var x)",
        "(set x)",
        "(if true 1)",
        "(while (> 1 0))",
        "(def f)",
        "(+ 1)",
        "((1 2) 3)",
    ] {
        assert!(
            matches!(try_compile(source), Err(Error::MalformedForm(_))),
            "expected MalformedForm for {source}"
        );
    }
}

#[test]
fn test_set_to_unbound_name_is_fatal() {
    assert!(matches!(
        try_compile("(set nope 1)"),
        Err(Error::UnboundName(_))
    ));
}

#[test]
fn test_unknown_type_annotation_defaults_to_i32() {
    let ir = compile("(var (x banana) 1) (printf \"%d\" x)");
    line_with(&ir, &["%x = alloca i32"]);
}

//! Integration tests for end-to-end compilation.
//!
//! These tests drive the complete pipeline from source code through lexing,
//! parsing, scope building, definition checking, type evaluation and the
//! tree dump, plus the `ltc` binary itself.

use std::{fs, path::PathBuf, process::Command};

use lettuce::{
    ast::statements::Decl, compile_source, lexer::lexer::tokenize, lexer::tokens::TokenKind,
    printer::dump, render_error,
};

const PROGRAM: &str = "\
# Sums the integers below a bound.
of [Int, Int] -> Int fun sum_below(n, acc) =
    if n < 1 then acc else sum_below(n - 1, acc + n);

of [[Int] -> Int, Int] -> Int fun twice(f, x) = f(f(x));
of [Int] -> Int fun double(x) = x * 2;

of Int var bound = 10;
of Int var total = sum_below(bound, 0);
of Bool var big = twice(double, total) > 100;
of String var label = if big then \"big\" else \"small\";
";

fn write_source(name: &str, source: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("lettuce_tests");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_compile_program() {
    let compilation = compile_source(PROGRAM).unwrap();

    let names: Vec<&str> = compilation
        .program
        .declarations
        .iter()
        .map(|decl| decl.name().text())
        .collect();
    assert_eq!(
        names,
        vec!["sum_below", "twice", "double", "bound", "total", "big", "label"]
    );

    let Decl::Var(label) = &compilation.program.declarations[6] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(compilation.types.format(label.init.ty.unwrap()), "String");
}

#[test]
fn test_tokenize_program() {
    let tokens = tokenize(PROGRAM);

    assert_eq!(tokens.first().unwrap().kind, TokenKind::Of);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
    assert!(tokens.iter().all(|token| token.kind != TokenKind::Invalid));
}

#[test]
fn test_dump_program() {
    let compilation = compile_source(PROGRAM).unwrap();
    let output = dump(&compilation.program, &compilation.types);

    assert!(output.starts_with("Program\n\tFunction declaration: sum_below\n\t\tParams: n acc\n"));
    assert!(output.contains("\t\tSignature: [[Int] -> Int, Int] -> Int\n"));
    assert!(output.contains("Comparison: > :: Bool"));
    assert_eq!(output, dump(&compilation.program, &compilation.types));
}

#[test]
fn test_parse_errors_are_all_reported() {
    let diagnostics = compile_source("of Int var a = ; of Int var b = 1 var c = 2;").unwrap_err();

    assert_eq!(
        diagnostics.names(),
        vec!["ParsePrimaryError", "ParseTokenError", "ParseProgramError"]
    );
}

#[test]
fn test_semantic_error_rendering() {
    let source = "of [] -> Int fun f() = {\n    missing;\n};";
    let diagnostics = compile_source(source).unwrap_err();
    let error = diagnostics.iter().next().unwrap();

    let rendered = render_error(error, source, "bad.lt");
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines[0],
        "Error: UndefinedSymbolError (Local `missing` must be declared before it is used)"
    );
    assert_eq!(
        lines[1],
        "-> bad.lt: use of undefined symbol \"missing\" at line 2, column 5"
    );
    assert_eq!(lines[3], "2 | missing;");
    assert_eq!(lines[4], "  | ^");
}

#[test]
fn test_binary_success() {
    let path = write_source("ok.lt", PROGRAM);
    let output = Command::new(env!("CARGO_BIN_EXE_ltc"))
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Program\n"));
}

#[test]
fn test_binary_reports_errors() {
    let path = write_source("bad.lt", "of Int var a = true;");
    let output = Command::new(env!("CARGO_BIN_EXE_ltc"))
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("VarDeclInitTypeMismatchError"));
}

#[test]
fn test_binary_missing_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_ltc"))
        .arg("/nonexistent/lettuce/source.lt")
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_binary_hides_compound_errors() {
    let path = write_source("nested.lt", "fun f() = { { 1 +; }; 2; };");
    let output = Command::new(env!("CARGO_BIN_EXE_ltc"))
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("ParsePrimaryError"));
    assert!(stderr.contains("ParseProgramError"));
    assert!(!stderr.contains("ParseCompoundError"));
}

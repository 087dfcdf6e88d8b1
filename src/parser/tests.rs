//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Operator precedence and associativity
//! - Call chains
//! - Declarations and type signatures
//! - Blocks and if-expressions
//! - Error recovery and reporting

use crate::{
    ast::{
        ast::Program,
        expressions::{Expr, ExprKind},
        statements::{Decl, StmtKind},
        types::TypeArena,
    },
    errors::errors::{Diagnostics, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::parse;

fn parse_ok(source: &str) -> (Program, TypeArena) {
    let mut types = TypeArena::new();
    let program = parse(source, &mut types).expect("program should parse");
    (program, types)
}

fn parse_err(source: &str) -> Diagnostics {
    let mut types = TypeArena::new();
    parse(source, &mut types).expect_err("program should not parse")
}

/// Renders an expression as an s-expression.
fn shape(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Comparison { op, lhs, rhs } | ExprKind::Binary { op, lhs, rhs } => {
            format!("({} {} {})", op, shape(lhs), shape(rhs))
        }
        ExprKind::Unary { op, operand } => format!("({} {})", op, shape(operand)),
        ExprKind::Call { callee, args } => format!(
            "call({}; {})",
            shape(callee),
            args.iter().map(shape).collect::<Vec<String>>().join(", ")
        ),
        ExprKind::Block { stmts } => format!("{{{} stmts}}", stmts.len()),
        ExprKind::If { else_branch, .. } => match else_branch {
            Some(_) => String::from("if-else"),
            None => String::from("if"),
        },
        ExprKind::Literal(token) | ExprKind::VarAccess(token) => token.to_string(),
        ExprKind::Return(value) => format!("return {}", shape(value)),
        ExprKind::Yield(value) => format!("yield {}", shape(value)),
    }
}

fn init_shape(source: &str) -> String {
    let (program, _) = parse_ok(source);
    match &program.declarations[0] {
        Decl::Var(decl) => shape(&decl.init),
        Decl::Fun(decl) => shape(&decl.body),
    }
}

#[test]
fn test_parse_precedence() {
    assert_eq!(init_shape("var x = (1 + 2) * 3 / 7;"), "(/ (* (+ 1 2) 3) 7)");
    assert_eq!(init_shape("var x = 1 + 2 * 3;"), "(+ 1 (* 2 3))");
}

#[test]
fn test_parse_left_associativity() {
    assert_eq!(init_shape("var x = 1 - 2 - 3;"), "(- (- 1 2) 3)");
    assert_eq!(init_shape("var x = 8 / 4 / 2;"), "(/ (/ 8 4) 2)");
}

#[test]
fn test_parse_comparison_levels() {
    assert_eq!(init_shape("var x = 1 + 2 < 3 == true;"), "(== (< (+ 1 2) 3) true)");
    assert_eq!(init_shape("var x = a != b > c;"), "(!= a (> b c))");
}

#[test]
fn test_parse_comparison_builds_comparison_node() {
    let (program, _) = parse_ok("var x = 1 < 2;");
    let Decl::Var(decl) = &program.declarations[0] else {
        panic!("expected a variable declaration");
    };

    assert!(matches!(decl.init.kind, ExprKind::Comparison { .. }));
}

#[test]
fn test_parse_unary() {
    assert_eq!(init_shape("var x = -f(1) * 2;"), "(* (- call(f; 1)) 2)");
    assert_eq!(init_shape("var x = !!true;"), "(! (! true))");
    assert_eq!(init_shape("var x = - - 3;"), "(- (- 3))");
}

#[test]
fn test_parse_call_chain() {
    assert_eq!(
        init_shape("var x = (5 + 4)(kek)(lol + 4, 12)(hh);"),
        "call(call(call((+ 5 4); kek); (+ lol 4), 12); hh)"
    );
    assert_eq!(init_shape("var x = f();"), "call(f; )");
}

#[test]
fn test_parse_literals() {
    assert_eq!(init_shape("var x = \"hello world\";"), "\"hello world\"");
    assert_eq!(init_shape("var x = false;"), "false");
    assert_eq!(init_shape("var x = 42;"), "42");
}

#[test]
fn test_parse_var_declaration() {
    let (program, types) = parse_ok("of *Int var ptr = p;");
    let Decl::Var(decl) = &program.declarations[0] else {
        panic!("expected a variable declaration");
    };

    assert_eq!(decl.name.text(), "ptr");
    assert_eq!(types.format(decl.signature.unwrap()), "*Int");
    assert_eq!(decl.end.offset, 19);
    assert_eq!(decl.location.offset, 0);
}

#[test]
fn test_parse_untyped_declarations() {
    let (program, _) = parse_ok("var a = 1; fun f() = a;");

    assert_eq!(program.declarations.len(), 2);
    assert!(matches!(&program.declarations[0], Decl::Var(decl) if decl.signature.is_none()));
    assert!(matches!(&program.declarations[1], Decl::Fun(decl) if decl.signature.is_none() && decl.params.is_empty()));
}

#[test]
fn test_parse_function_declaration() {
    let (program, types) = parse_ok("of [Int, *Bool] -> Unit fun f(a, b) = { a; };");
    let Decl::Fun(decl) = &program.declarations[0] else {
        panic!("expected a function declaration");
    };

    let params: Vec<&str> = decl.params.iter().map(|p| p.text()).collect();
    assert_eq!(params, vec!["a", "b"]);
    assert_eq!(types.format(decl.signature.unwrap()), "[Int, *Bool] -> Unit");
    assert!(matches!(&decl.body.kind, ExprKind::Block { stmts } if stmts.len() == 1));
}

#[test]
fn test_parse_nullary_function_type() {
    let (program, types) = parse_ok("of [] -> [String] -> Int fun make() = g;");
    let Decl::Fun(decl) = &program.declarations[0] else {
        panic!("expected a function declaration");
    };

    assert_eq!(types.format(decl.signature.unwrap()), "[] -> [String] -> Int");
}

#[test]
fn test_parse_block_statements() {
    let (program, _) = parse_ok("fun f(x) = { of Int var y = 1; x = y; x; return x; };");
    let Decl::Fun(decl) = &program.declarations[0] else {
        panic!("expected a function declaration");
    };
    let ExprKind::Block { stmts } = &decl.body.kind else {
        panic!("expected a block body");
    };

    assert_eq!(stmts.len(), 4);
    assert!(matches!(&stmts[0].kind, StmtKind::Decl(Decl::Var(_))));
    assert!(matches!(&stmts[1].kind, StmtKind::Assignment { target, .. } if target.as_identifier().is_some()));
    assert!(matches!(&stmts[2].kind, StmtKind::Expr(_)));
    assert!(matches!(&stmts[3].kind, StmtKind::Expr(Expr { kind: ExprKind::Return(_), .. })));
}

#[test]
fn test_parse_empty_block() {
    assert_eq!(init_shape("var x = {};"), "{0 stmts}");
}

#[test]
fn test_parse_if_else() {
    assert_eq!(init_shape("var x = if a then 1 else 2;"), "if-else");
    assert_eq!(init_shape("var x = if a < b then f(a) else b;"), "if-else");
}

#[test]
fn test_parse_if_without_else() {
    assert_eq!(init_shape("var x = if a then 1;"), "if");
}

#[test]
fn test_parse_return_and_yield() {
    assert_eq!(init_shape("var x = return 1 + 2;"), "return (+ 1 2)");
    assert_eq!(init_shape("var x = yield y;"), "yield y");
}

#[test]
fn test_binary_location_is_operator() {
    let (program, _) = parse_ok("var x = 1 + 2;");
    let Decl::Var(decl) = &program.declarations[0] else {
        panic!("expected a variable declaration");
    };

    assert_eq!(decl.init.location.offset, 10);
}

#[test]
fn test_recovery_continues_after_error() {
    let diagnostics = parse_err("var a = 1 +; var b = 2; var c = ;");

    assert_eq!(
        diagnostics.names(),
        vec!["ParsePrimaryError", "ParsePrimaryError", "ParseProgramError"]
    );

    let last = diagnostics.iter().last().unwrap();
    assert_eq!(last.get_kind(), &ErrorImpl::ParseProgramError { errors: 2 });
}

#[test]
fn test_missing_semicolon() {
    let diagnostics = parse_err("var a = 1 var b = 2;");

    assert_eq!(diagnostics.names(), vec!["ParseTokenError", "ParseProgramError"]);
    assert!(matches!(
        diagnostics.iter().next().unwrap().get_kind(),
        ErrorImpl::ParseTokenError { expected: TokenKind::Semicolon, .. }
    ));
}

#[test]
fn test_top_level_expression_is_not_a_declaration() {
    let diagnostics = parse_err("1 + 2; var a = 1;");

    assert_eq!(diagnostics.names(), vec!["ParseDeclarationError", "ParseProgramError"]);
}

#[test]
fn test_signature_without_declaration() {
    let diagnostics = parse_err("of Int 5;");

    assert_eq!(diagnostics.names(), vec!["ParseDeclarationError", "ParseProgramError"]);
}

#[test]
fn test_bad_type() {
    let diagnostics = parse_err("of Foo var a = 1;");

    assert_eq!(diagnostics.names(), vec!["ParseTypeError", "ParseProgramError"]);
}

#[test]
fn test_function_signature_must_be_function_type() {
    let diagnostics = parse_err("of Int fun f(a) = a;");

    assert_eq!(diagnostics.names(), vec!["FnDeclSignatureError", "ParseProgramError"]);
}

#[test]
fn test_function_signature_arity_mismatch() {
    let diagnostics = parse_err("of [Int] -> Int fun f(a, b) = a;");

    assert_eq!(
        diagnostics.names(),
        vec!["FnDeclArgsCountMismatchError", "ParseProgramError"]
    );
    assert_eq!(
        diagnostics.iter().next().unwrap().get_kind(),
        &ErrorImpl::FnDeclArgsCountMismatchError {
            function: String::from("f"),
            expected: 1,
            received: 2,
        }
    );
}

#[test]
fn test_non_lvalue_assignment_is_recoverable() {
    let diagnostics = parse_err("fun f() = { 1 + 2 = 3; x = 4; };");

    assert_eq!(
        diagnostics.names(),
        vec!["ParseNonLvalueError", "ParseCompoundError", "ParseProgramError"]
    );
}

#[test]
fn test_nested_block_recovery() {
    let diagnostics = parse_err("fun f() = { { 1 +; }; 2; }; var ok = 1; var bad = ;");

    assert_eq!(
        diagnostics.names(),
        vec![
            "ParsePrimaryError",
            "ParseCompoundError",
            "ParseCompoundError",
            "ParsePrimaryError",
            "ParseProgramError"
        ]
    );
}

#[test]
fn test_compound_error_points_at_open_brace() {
    let diagnostics = parse_err("fun f() = { 1 +; };");
    let compound = diagnostics.iter().nth(1).unwrap();

    assert_eq!(compound.get_error_name(), "ParseCompoundError");
    assert_eq!(compound.get_location().offset, 10);
}

#[test]
fn test_unclosed_block() {
    let diagnostics = parse_err("fun f() = { 1;");

    assert_eq!(diagnostics.names(), vec!["ParseTokenError", "ParseProgramError"]);
    assert!(matches!(
        diagnostics.iter().next().unwrap().get_kind(),
        ErrorImpl::ParseTokenError { expected: TokenKind::CloseCurly, .. }
    ));
}

#[test]
fn test_lexical_error_is_reported_and_recovered() {
    let diagnostics = parse_err("var a = @; var b = 1;");

    assert_eq!(diagnostics.names(), vec!["UnrecognisedToken", "ParseProgramError"]);
}

#[test]
fn test_stray_close_curly_at_top_level() {
    let diagnostics = parse_err("} var a = 1;");

    assert_eq!(diagnostics.names(), vec!["ParseDeclarationError", "ParseProgramError"]);
}

#[test]
fn test_recovery_skips_braced_body() {
    let diagnostics = parse_err("of [Int] -> Int fun f(a, b) = { a; b; }; var ok = 1;");

    assert_eq!(
        diagnostics.names(),
        vec!["FnDeclArgsCountMismatchError", "ParseProgramError"]
    );
}

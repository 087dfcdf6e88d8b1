//! Textual dump of a program.
//!
//! One line per node, children indented by one tab. Expressions that went
//! through type evaluation carry their type as a ` :: <type>` suffix.

use crate::ast::{
    ast::Program,
    expressions::{Expr, ExprKind},
    statements::{Decl, FunDecl, Stmt, StmtKind, VarDecl},
    types::TypeArena,
};

struct Printer<'a> {
    types: &'a TypeArena,
    out: String,
}

impl Printer<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn expr_line(&mut self, depth: usize, expr: &Expr, text: &str) {
        match expr.ty {
            Some(ty) => {
                let text = format!("{} :: {}", text, self.types.format(ty));
                self.line(depth, &text);
            }
            None => self.line(depth, text),
        }
    }

    fn program(&mut self, program: &Program) {
        self.line(0, "Program");
        for decl in &program.declarations {
            self.decl(1, decl);
        }
    }

    fn decl(&mut self, depth: usize, decl: &Decl) {
        match decl {
            Decl::Var(decl) => self.var_decl(depth, decl),
            Decl::Fun(decl) => self.fun_decl(depth, decl),
        }
    }

    fn var_decl(&mut self, depth: usize, decl: &VarDecl) {
        self.line(depth, &format!("Variable declaration: {}", decl.name.text()));
        if let Some(signature) = decl.signature {
            self.line(depth + 1, &format!("Signature: {}", self.types.format(signature)));
        }
        self.line(depth + 1, "Initializer:");
        self.expr(depth + 2, &decl.init);
    }

    fn fun_decl(&mut self, depth: usize, decl: &FunDecl) {
        self.line(depth, &format!("Function declaration: {}", decl.name.text()));

        let params: String = decl
            .params
            .iter()
            .map(|param| format!(" {}", param.text()))
            .collect();
        self.line(depth + 1, &format!("Params:{}", params));

        if let Some(signature) = decl.signature {
            self.line(depth + 1, &format!("Signature: {}", self.types.format(signature)));
        }
        self.line(depth + 1, "Body:");
        self.expr(depth + 2, &decl.body);
    }

    fn stmt(&mut self, depth: usize, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.line(depth, "Expression statement");
                self.expr(depth + 1, expr);
            }
            StmtKind::Assignment { target, value } => {
                self.line(depth, "Assignment");
                self.line(depth + 1, "Lvalue:");
                self.expr(depth + 2, target);
                self.line(depth + 1, "Assigned expression:");
                self.expr(depth + 2, value);
            }
            StmtKind::Decl(decl) => self.decl(depth, decl),
        }
    }

    fn operands(&mut self, depth: usize, lhs: &Expr, rhs: &Expr) {
        self.line(depth, "LHS:");
        self.expr(depth + 1, lhs);
        self.line(depth, "RHS:");
        self.expr(depth + 1, rhs);
    }

    fn expr(&mut self, depth: usize, expr: &Expr) {
        match &expr.kind {
            ExprKind::Comparison { op, lhs, rhs } => {
                self.expr_line(depth, expr, &format!("Comparison: {}", op));
                self.operands(depth + 1, lhs, rhs);
            }
            ExprKind::Binary { op, lhs, rhs } => {
                self.expr_line(depth, expr, &format!("Binary expression: {}", op));
                self.operands(depth + 1, lhs, rhs);
            }
            ExprKind::Unary { op, operand } => {
                self.expr_line(depth, expr, &format!("Unary expression: {}", op));
                self.expr(depth + 1, operand);
            }
            ExprKind::Call { callee, args } => {
                self.expr_line(depth, expr, "Function call");
                self.line(depth + 1, "Callable:");
                self.expr(depth + 2, callee);
                for (index, arg) in args.iter().enumerate() {
                    self.line(depth + 1, &format!("Arg {}:", index));
                    self.expr(depth + 2, arg);
                }
            }
            ExprKind::Block { stmts } => {
                self.expr_line(depth, expr, "Block expression");
                for (index, stmt) in stmts.iter().enumerate() {
                    self.line(depth + 1, &format!("Statement {}:", index));
                    self.stmt(depth + 2, stmt);
                }
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.expr_line(depth, expr, "If");
                self.line(depth + 1, "Condition:");
                self.expr(depth + 2, condition);
                self.line(depth + 1, "Then branch:");
                self.expr(depth + 2, then_branch);
                if let Some(else_branch) = else_branch {
                    self.line(depth + 1, "Else branch:");
                    self.expr(depth + 2, else_branch);
                }
            }
            ExprKind::Literal(token) => {
                self.expr_line(depth, expr, &format!("Literal expression: {}", token));
            }
            ExprKind::VarAccess(token) => {
                self.expr_line(depth, expr, &format!("Var access: {}", token.text()));
            }
            ExprKind::Return(value) => {
                self.expr_line(depth, expr, "Return");
                self.line(depth + 1, "Value:");
                self.expr(depth + 2, value);
            }
            ExprKind::Yield(value) => {
                self.expr_line(depth, expr, "Yield");
                self.line(depth + 1, "Value:");
                self.expr(depth + 2, value);
            }
        }
    }
}

/// Renders `program` as an indented tree. Reads the tree only.
pub fn dump(program: &Program, types: &TypeArena) -> String {
    let mut printer = Printer {
        types,
        out: String::new(),
    };
    printer.program(program);
    printer.out
}

#[cfg(test)]
mod tests {
    use crate::{ast::types::TypeArena, compile_source, parser::parser::parse};

    use super::dump;

    #[test]
    fn test_dump_untyped_program() {
        let mut types = TypeArena::new();
        let program = parse("of Int var x = (1 + 2) * 3;", &mut types).unwrap();

        let expected = "\
Program
\tVariable declaration: x
\t\tSignature: Int
\t\tInitializer:
\t\t\tBinary expression: *
\t\t\t\tLHS:
\t\t\t\t\tBinary expression: +
\t\t\t\t\t\tLHS:
\t\t\t\t\t\t\tLiteral expression: 1
\t\t\t\t\t\tRHS:
\t\t\t\t\t\t\tLiteral expression: 2
\t\t\t\tRHS:
\t\t\t\t\tLiteral expression: 3
";

        assert_eq!(dump(&program, &types), expected);
    }

    #[test]
    fn test_dump_typed_function() {
        let compilation = compile_source(
            "of [Int] -> Bool fun positive(n) = { if n > 0 then true else false; };",
        )
        .unwrap();

        let expected = "\
Program
\tFunction declaration: positive
\t\tParams: n
\t\tSignature: [Int] -> Bool
\t\tBody:
\t\t\tBlock expression :: Bool
\t\t\t\tStatement 0:
\t\t\t\t\tExpression statement
\t\t\t\t\t\tIf :: Bool
\t\t\t\t\t\t\tCondition:
\t\t\t\t\t\t\t\tComparison: > :: Bool
\t\t\t\t\t\t\t\t\tLHS:
\t\t\t\t\t\t\t\t\t\tLiteral expression: n :: Int
\t\t\t\t\t\t\t\t\tRHS:
\t\t\t\t\t\t\t\t\t\tLiteral expression: 0 :: Int
\t\t\t\t\t\t\tThen branch:
\t\t\t\t\t\t\t\tLiteral expression: true :: Bool
\t\t\t\t\t\t\tElse branch:
\t\t\t\t\t\t\t\tLiteral expression: false :: Bool
";

        assert_eq!(dump(&compilation.program, &compilation.types), expected);
    }

    #[test]
    fn test_dump_statements_and_calls() {
        let compilation = compile_source(
            "of [Int] -> Int fun f(x) = { x = -x; return f(x); };",
        )
        .unwrap();
        let output = dump(&compilation.program, &compilation.types);

        assert!(output.contains("\t\t\t\t\tAssignment\n\t\t\t\t\t\tLvalue:\n"));
        assert!(output.contains("Unary expression: - :: Int\n"));
        assert!(output.contains("Return :: Int\n"));
        assert!(output.contains("Function call :: Int\n"));
        assert!(output.contains("Callable:\n"));
        assert!(output.contains("Arg 0:\n"));
    }

    #[test]
    fn test_dump_is_idempotent() {
        let compilation = compile_source(
            "of String var s = \"hi\"; of [] -> String fun g() = { yield s; };",
        )
        .unwrap();

        let first = dump(&compilation.program, &compilation.types);
        let second = dump(&compilation.program, &compilation.types);

        assert_eq!(first, second);
        assert!(first.contains("Literal expression: \"hi\" :: String"));
        assert!(first.contains("Yield :: String"));
    }
}

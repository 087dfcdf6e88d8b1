//! Program root and generic traversal.
//!
//! Passes implement [`Visit`] (read-only) or [`VisitMut`] and override only
//! the node kinds they care about. Every default method forwards to the
//! matching `walk_*` function, which visits the node's children in source
//! order; an override calls the `walk_*` function itself to keep recursing.

use crate::{errors::errors::Error, scope::scope::ScopeId};

use super::{
    expressions::{Expr, ExprKind},
    statements::{Decl, FunDecl, Stmt, StmtKind, VarDecl},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub declarations: Vec<Decl>,
    /// Root scope, set by scope building.
    pub scope: Option<ScopeId>,
}

pub trait Visit {
    fn visit_program(&mut self, program: &Program) -> Result<(), Error> {
        walk_program(self, program)
    }

    fn visit_decl(&mut self, decl: &Decl) -> Result<(), Error> {
        walk_decl(self, decl)
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) -> Result<(), Error> {
        walk_var_decl(self, decl)
    }

    fn visit_fun_decl(&mut self, decl: &FunDecl) -> Result<(), Error> {
        walk_fun_decl(self, decl)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), Error> {
        walk_expr(self, expr)
    }
}

pub fn walk_program<V: Visit + ?Sized>(visitor: &mut V, program: &Program) -> Result<(), Error> {
    for decl in &program.declarations {
        visitor.visit_decl(decl)?;
    }

    Ok(())
}

pub fn walk_decl<V: Visit + ?Sized>(visitor: &mut V, decl: &Decl) -> Result<(), Error> {
    match decl {
        Decl::Var(decl) => visitor.visit_var_decl(decl),
        Decl::Fun(decl) => visitor.visit_fun_decl(decl),
    }
}

pub fn walk_var_decl<V: Visit + ?Sized>(visitor: &mut V, decl: &VarDecl) -> Result<(), Error> {
    visitor.visit_expr(&decl.init)
}

pub fn walk_fun_decl<V: Visit + ?Sized>(visitor: &mut V, decl: &FunDecl) -> Result<(), Error> {
    visitor.visit_expr(&decl.body)
}

pub fn walk_stmt<V: Visit + ?Sized>(visitor: &mut V, stmt: &Stmt) -> Result<(), Error> {
    match &stmt.kind {
        StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::Assignment { target, value } => {
            visitor.visit_expr(target)?;
            visitor.visit_expr(value)
        }
        StmtKind::Decl(decl) => visitor.visit_decl(decl),
    }
}

pub fn walk_expr<V: Visit + ?Sized>(visitor: &mut V, expr: &Expr) -> Result<(), Error> {
    match &expr.kind {
        ExprKind::Comparison { lhs, rhs, .. } | ExprKind::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs)?;
            visitor.visit_expr(rhs)
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee)?;
            for arg in args {
                visitor.visit_expr(arg)?;
            }
            Ok(())
        }
        ExprKind::Block { stmts } => {
            for stmt in stmts {
                visitor.visit_stmt(stmt)?;
            }
            Ok(())
        }
        ExprKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition)?;
            visitor.visit_expr(then_branch)?;
            match else_branch {
                Some(else_branch) => visitor.visit_expr(else_branch),
                None => Ok(()),
            }
        }
        ExprKind::Return(value) | ExprKind::Yield(value) => visitor.visit_expr(value),
        ExprKind::Literal(_) | ExprKind::VarAccess(_) => Ok(()),
    }
}

/// Mutable counterpart of [`Visit`], used by the passes that annotate nodes.
pub trait VisitMut {
    fn visit_program_mut(&mut self, program: &mut Program) -> Result<(), Error> {
        walk_program_mut(self, program)
    }

    fn visit_decl_mut(&mut self, decl: &mut Decl) -> Result<(), Error> {
        walk_decl_mut(self, decl)
    }

    fn visit_var_decl_mut(&mut self, decl: &mut VarDecl) -> Result<(), Error> {
        walk_var_decl_mut(self, decl)
    }

    fn visit_fun_decl_mut(&mut self, decl: &mut FunDecl) -> Result<(), Error> {
        walk_fun_decl_mut(self, decl)
    }

    fn visit_stmt_mut(&mut self, stmt: &mut Stmt) -> Result<(), Error> {
        walk_stmt_mut(self, stmt)
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) -> Result<(), Error> {
        walk_expr_mut(self, expr)
    }
}

pub fn walk_program_mut<V: VisitMut + ?Sized>(
    visitor: &mut V,
    program: &mut Program,
) -> Result<(), Error> {
    for decl in &mut program.declarations {
        visitor.visit_decl_mut(decl)?;
    }

    Ok(())
}

pub fn walk_decl_mut<V: VisitMut + ?Sized>(visitor: &mut V, decl: &mut Decl) -> Result<(), Error> {
    match decl {
        Decl::Var(decl) => visitor.visit_var_decl_mut(decl),
        Decl::Fun(decl) => visitor.visit_fun_decl_mut(decl),
    }
}

pub fn walk_var_decl_mut<V: VisitMut + ?Sized>(
    visitor: &mut V,
    decl: &mut VarDecl,
) -> Result<(), Error> {
    visitor.visit_expr_mut(&mut decl.init)
}

pub fn walk_fun_decl_mut<V: VisitMut + ?Sized>(
    visitor: &mut V,
    decl: &mut FunDecl,
) -> Result<(), Error> {
    visitor.visit_expr_mut(&mut decl.body)
}

pub fn walk_stmt_mut<V: VisitMut + ?Sized>(visitor: &mut V, stmt: &mut Stmt) -> Result<(), Error> {
    match &mut stmt.kind {
        StmtKind::Expr(expr) => visitor.visit_expr_mut(expr),
        StmtKind::Assignment { target, value } => {
            visitor.visit_expr_mut(target)?;
            visitor.visit_expr_mut(value)
        }
        StmtKind::Decl(decl) => visitor.visit_decl_mut(decl),
    }
}

pub fn walk_expr_mut<V: VisitMut + ?Sized>(visitor: &mut V, expr: &mut Expr) -> Result<(), Error> {
    match &mut expr.kind {
        ExprKind::Comparison { lhs, rhs, .. } | ExprKind::Binary { lhs, rhs, .. } => {
            visitor.visit_expr_mut(lhs)?;
            visitor.visit_expr_mut(rhs)
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr_mut(operand),
        ExprKind::Call { callee, args } => {
            visitor.visit_expr_mut(callee)?;
            for arg in args {
                visitor.visit_expr_mut(arg)?;
            }
            Ok(())
        }
        ExprKind::Block { stmts } => {
            for stmt in stmts {
                visitor.visit_stmt_mut(stmt)?;
            }
            Ok(())
        }
        ExprKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr_mut(condition)?;
            visitor.visit_expr_mut(then_branch)?;
            match else_branch {
                Some(else_branch) => visitor.visit_expr_mut(else_branch),
                None => Ok(()),
            }
        }
        ExprKind::Return(value) | ExprKind::Yield(value) => visitor.visit_expr_mut(value),
        ExprKind::Literal(_) | ExprKind::VarAccess(_) => Ok(()),
    }
}

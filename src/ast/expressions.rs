use crate::{
    lexer::tokens::Token,
    scope::scope::ScopeId,
    Location,
};

use super::{statements::Stmt, types::TypeId};

/// An expression node.
///
/// `scope` is filled by scope building and `ty` by type evaluation; both are
/// `None` straight out of the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,
    pub ty: Option<TypeId>,
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `==`, `!=`, `<`, `>`
    Comparison {
        op: Token,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `+`, `-`, `*`, `/`
    Binary {
        op: Token,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: Token,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Block {
        stmts: Vec<Stmt>,
    },
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    /// Number, string, boolean or identifier token.
    Literal(Token),
    VarAccess(Token),
    Return(Box<Expr>),
    Yield(Box<Expr>),
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Expr {
            kind,
            location,
            ty: None,
            scope: None,
        }
    }

    /// The identifier token if this expression names a symbol.
    pub fn as_identifier(&self) -> Option<&Token> {
        match &self.kind {
            ExprKind::Literal(token) if token.is_identifier() => Some(token),
            ExprKind::VarAccess(token) => Some(token),
            _ => None,
        }
    }
}

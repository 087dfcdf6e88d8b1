use crate::{lexer::tokens::Token, scope::scope::ScopeId, Location};

use super::{expressions::Expr, types::TypeId};

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub location: Location,
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    /// The parser only builds assignments whose target is an identifier.
    Assignment { target: Expr, value: Expr },
    Decl(Decl),
}

impl Stmt {
    pub fn new(kind: StmtKind, location: Location) -> Self {
        Stmt {
            kind,
            location,
            scope: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Fun(FunDecl),
}

impl Decl {
    pub fn name(&self) -> &Token {
        match self {
            Decl::Var(decl) => &decl.name,
            Decl::Fun(decl) => &decl.name,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Decl::Var(decl) => decl.location,
            Decl::Fun(decl) => decl.location,
        }
    }
}

/// `[of <type>] var <name> = <init>;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Token,
    pub signature: Option<TypeId>,
    pub init: Expr,
    /// Location of the `;` closing the initializer.
    pub end: Location,
    pub location: Location,
    pub scope: Option<ScopeId>,
}

/// `[of <type>] fun <name>(<params>) = <body>;`
#[derive(Debug, Clone, PartialEq)]
pub struct FunDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub signature: Option<TypeId>,
    pub body: Expr,
    pub location: Location,
    pub scope: Option<ScopeId>,
}

use crate::{
    ast::{
        ast::{walk_expr_mut, walk_program_mut, walk_stmt_mut, Program, VisitMut},
        expressions::{Expr, ExprKind},
        statements::{FunDecl, Stmt, VarDecl},
        types::{TypeArena, TypeId},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
    scope::scope::{ScopeId, ScopeTree, Symbol, SymbolKind},
    Location,
};

/// Creates the scope tree of a program and stamps every node with the scope
/// it lives in.
pub struct ScopeBuilder<'a> {
    scopes: &'a mut ScopeTree,
    types: &'a TypeArena,
    current: Option<ScopeId>,
    /// Declarations made while this is set are visible program-wide.
    global: bool,
}

impl<'a> ScopeBuilder<'a> {
    pub fn new(scopes: &'a mut ScopeTree, types: &'a TypeArena) -> Self {
        ScopeBuilder {
            scopes,
            types,
            current: None,
            global: true,
        }
    }

    fn current(&self) -> Result<ScopeId, Error> {
        self.current.ok_or_else(|| {
            Error::new(
                ErrorImpl::InternalError {
                    message: String::from("no scope is open"),
                },
                Location::default(),
            )
        })
    }

    fn declare(
        &mut self,
        kind: SymbolKind,
        name: &Token,
        visible_from: Location,
        global: bool,
        ty: Option<TypeId>,
    ) -> Result<(), Error> {
        let scope = self.current()?;
        let symbol = Symbol {
            kind,
            name: name.text().to_string(),
            location: name.location,
            visible_from,
            global,
            ty,
        };

        match self.scopes.add_symbol(scope, symbol) {
            Ok(_) => Ok(()),
            Err(_) => Err(Error::new(
                ErrorImpl::RedefinitionError {
                    symbol: name.text().to_string(),
                },
                name.location,
            )),
        }
    }

    /// Runs `body` inside a fresh child scope of the current one.
    fn with_child_scope<F>(&mut self, location: Location, body: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        let parent = self.current()?;
        let child = self.scopes.push_scope(location, Some(parent));

        self.current = Some(child);
        let result = body(self);
        self.current = Some(parent);

        result
    }
}

impl VisitMut for ScopeBuilder<'_> {
    fn visit_program_mut(&mut self, program: &mut Program) -> Result<(), Error> {
        let root = self.scopes.push_scope(Location::default(), None);
        program.scope = Some(root);
        self.current = Some(root);

        walk_program_mut(self, program)
    }

    fn visit_var_decl_mut(&mut self, decl: &mut VarDecl) -> Result<(), Error> {
        decl.scope = Some(self.current()?);

        // The initializer is walked before the name is bound.
        self.visit_expr_mut(&mut decl.init)?;

        self.declare(SymbolKind::Var, &decl.name, decl.end, self.global, decl.signature)
    }

    fn visit_fun_decl_mut(&mut self, decl: &mut FunDecl) -> Result<(), Error> {
        decl.scope = Some(self.current()?);

        self.declare(
            SymbolKind::Fn,
            &decl.name,
            decl.name.location,
            self.global,
            decl.signature,
        )?;

        let arguments: Vec<_> = decl
            .signature
            .and_then(|signature| self.types.as_function(signature))
            .map(|(arguments, _)| arguments.to_vec())
            .unwrap_or_default();

        let was_global = self.global;
        self.global = false;

        let result = self.with_child_scope(decl.name.location, |builder| {
            for (index, param) in decl.params.iter().enumerate() {
                builder.declare(
                    SymbolKind::Var,
                    param,
                    param.location,
                    false,
                    arguments.get(index).copied(),
                )?;
            }

            builder.visit_expr_mut(&mut decl.body)
        });

        self.global = was_global;
        result
    }

    fn visit_stmt_mut(&mut self, stmt: &mut Stmt) -> Result<(), Error> {
        stmt.scope = Some(self.current()?);
        walk_stmt_mut(self, stmt)
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) -> Result<(), Error> {
        expr.scope = Some(self.current()?);

        if let ExprKind::Block { .. } = expr.kind {
            let location = expr.location;
            return self.with_child_scope(location, |builder| walk_expr_mut(builder, expr));
        }

        walk_expr_mut(self, expr)
    }
}

/// Builds the scope tree of `program` into `scopes`.
///
/// The root scope is stored on the program. Fails on the first name bound
/// twice in the same scope.
#[tracing::instrument(skip_all, fields(declarations = program.declarations.len()))]
pub fn build_scopes(
    program: &mut Program,
    scopes: &mut ScopeTree,
    types: &TypeArena,
) -> Result<(), Error> {
    ScopeBuilder::new(scopes, types).visit_program_mut(program)
}

use crate::{
    ast::{
        ast::{walk_expr, walk_var_decl, Program, Visit},
        expressions::Expr,
        statements::VarDecl,
    },
    errors::errors::{Error, ErrorImpl},
    scope::scope::{ScopeTree, SymbolId},
};

/// Verifies that every identifier names a symbol visible where it is used.
pub struct DefinitionChecker<'a> {
    scopes: &'a ScopeTree,
    /// Variables whose initializer is being walked.
    initializing: Vec<SymbolId>,
}

impl<'a> DefinitionChecker<'a> {
    pub fn new(scopes: &'a ScopeTree) -> Self {
        DefinitionChecker {
            scopes,
            initializing: vec![],
        }
    }
}

impl Visit for DefinitionChecker<'_> {
    fn visit_var_decl(&mut self, decl: &VarDecl) -> Result<(), Error> {
        let symbol = decl
            .scope
            .and_then(|scope| self.scopes.lookup_local(scope, decl.name.text()));

        // Globals are visible everywhere except in their own initializer.
        if let Some(symbol) = symbol {
            self.initializing.push(symbol);
        }
        let result = walk_var_decl(self, decl);
        if symbol.is_some() {
            self.initializing.pop();
        }

        result
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), Error> {
        if let Some(token) = expr.as_identifier() {
            let scope = expr.scope.ok_or_else(|| {
                Error::new(
                    ErrorImpl::InternalError {
                        message: format!("identifier {:?} has no scope", token.text()),
                    },
                    token.location,
                )
            })?;

            let resolved = self
                .scopes
                .lookup(scope, token.text(), token.location)
                .filter(|symbol| !self.initializing.contains(symbol));

            if resolved.is_none() {
                return Err(Error::new(
                    ErrorImpl::UndefinedSymbolError {
                        symbol: token.text().to_string(),
                    },
                    token.location,
                ));
            }
        }

        walk_expr(self, expr)
    }
}

/// Fails on the first identifier that does not resolve.
///
/// Must run after scope building.
#[tracing::instrument(skip_all)]
pub fn check_definitions(program: &Program, scopes: &ScopeTree) -> Result<(), Error> {
    DefinitionChecker::new(scopes).visit_program(program)
}

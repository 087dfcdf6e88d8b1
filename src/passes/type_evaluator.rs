use std::collections::HashMap;

use crate::{
    ast::{
        ast::{walk_expr_mut, walk_fun_decl_mut, walk_stmt_mut, Program, VisitMut},
        expressions::{Expr, ExprKind},
        statements::{FunDecl, Stmt, StmtKind, VarDecl},
        types::{TypeArena, TypeId},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    scope::scope::{ScopeId, ScopeTree, SymbolId, SymbolKind},
    Location,
};

/// Computes the type of every expression bottom-up and checks the typing
/// rules of each construct.
pub struct TypeEvaluator<'a> {
    scopes: &'a ScopeTree,
    types: &'a TypeArena,
    /// Signature of the innermost function being evaluated.
    function_type: Option<TypeId>,
    /// Types of variables declared without a signature.
    inferred: HashMap<SymbolId, TypeId>,
}

fn internal(message: String, location: Location) -> Error {
    Error::new(ErrorImpl::InternalError { message }, location)
}

impl<'a> TypeEvaluator<'a> {
    pub fn new(scopes: &'a ScopeTree, types: &'a TypeArena) -> Self {
        TypeEvaluator {
            scopes,
            types,
            function_type: None,
            inferred: HashMap::new(),
        }
    }

    fn type_of(&self, expr: &Expr) -> Result<TypeId, Error> {
        expr.ty.ok_or_else(|| {
            internal(String::from("expression was not evaluated"), expr.location)
        })
    }

    fn resolve(&self, scope: Option<ScopeId>, token: &Token) -> Result<SymbolId, Error> {
        scope
            .and_then(|scope| self.scopes.lookup(scope, token.text(), token.location))
            .ok_or_else(|| {
                internal(
                    format!("identifier {:?} was not resolved", token.text()),
                    token.location,
                )
            })
    }

    fn symbol_type(&self, id: SymbolId, token: &Token) -> Result<TypeId, Error> {
        let symbol = self.scopes.symbol(id);

        symbol
            .ty
            .or_else(|| self.inferred.get(&id).copied())
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UntypedSymbolError {
                        symbol: symbol.name.clone(),
                    },
                    token.location,
                )
            })
    }

    fn expect_int(&self, operand: &Expr, location: Location) -> Result<(), Error> {
        if self.types.equals(self.type_of(operand)?, TypeArena::INT) {
            Ok(())
        } else {
            Err(Error::new(ErrorImpl::ArithmTypeError, location))
        }
    }

    /// Type of `expr`, whose children have already been evaluated.
    fn evaluate(&self, expr: &Expr) -> Result<TypeId, Error> {
        let location = expr.location;

        match &expr.kind {
            ExprKind::Comparison { lhs, rhs, .. } => {
                self.expect_int(lhs, location)?;
                self.expect_int(rhs, location)?;
                Ok(TypeArena::BOOL)
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                self.expect_int(lhs, location)?;
                self.expect_int(rhs, location)?;
                Ok(TypeArena::INT)
            }
            ExprKind::Unary { operand, .. } => {
                self.expect_int(operand, location)?;
                Ok(TypeArena::INT)
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition_type = self.type_of(condition)?;
                if !self.types.equals(condition_type, TypeArena::BOOL) {
                    return Err(Error::new(
                        ErrorImpl::IfConditionTypeError {
                            found: self.types.format(condition_type),
                        },
                        condition.location,
                    ));
                }

                let then_type = self.type_of(then_branch)?;
                match else_branch {
                    Some(else_branch) => {
                        let else_type = self.type_of(else_branch)?;
                        if !self.types.equals(then_type, else_type) {
                            return Err(Error::new(
                                ErrorImpl::IfBranchesTypeError {
                                    then_type: self.types.format(then_type),
                                    else_type: self.types.format(else_type),
                                },
                                location,
                            ));
                        }

                        Ok(then_type)
                    }
                    // No value when the condition is false.
                    None => Ok(TypeArena::UNIT),
                }
            }
            ExprKind::Block { stmts } => match stmts.last() {
                Some(Stmt {
                    kind: StmtKind::Expr(last),
                    ..
                }) => self.type_of(last),
                _ => Ok(TypeArena::UNIT),
            },
            ExprKind::Call { callee, args } => {
                let callee_type = self.type_of(callee)?;
                let (arguments, return_type) =
                    self.types.as_function(callee_type).ok_or_else(|| {
                        Error::new(
                            ErrorImpl::FnCallNonFuncTypeError {
                                found: self.types.format(callee_type),
                            },
                            callee.location,
                        )
                    })?;

                if arguments.len() != args.len() {
                    return Err(Error::new(
                        ErrorImpl::FnCallArgCountMismatchError {
                            expected: arguments.len(),
                            received: args.len(),
                        },
                        location,
                    ));
                }

                for (index, (expected, arg)) in arguments.iter().zip(args.iter()).enumerate() {
                    let received = self.type_of(arg)?;
                    if !self.types.equals(*expected, received) {
                        return Err(Error::new(
                            ErrorImpl::FnCallArgTypeMismatchError {
                                index,
                                expected: self.types.format(*expected),
                                received: self.types.format(received),
                            },
                            arg.location,
                        ));
                    }
                }

                Ok(return_type)
            }
            ExprKind::Literal(token) | ExprKind::VarAccess(token) => match token.kind {
                TokenKind::Number => Ok(TypeArena::INT),
                TokenKind::String => Ok(TypeArena::STRING),
                TokenKind::True | TokenKind::False => Ok(TypeArena::BOOL),
                TokenKind::Identifier => {
                    let symbol = self.resolve(expr.scope, token)?;
                    self.symbol_type(symbol, token)
                }
                _ => Err(internal(format!("{} is not a literal", token), location)),
            },
            ExprKind::Return(value) => {
                let function = self
                    .function_type
                    .ok_or_else(|| Error::new(ErrorImpl::ReturnOutsideFnError, location))?;
                let (_, expected) = self.types.as_function(function).ok_or_else(|| {
                    internal(String::from("function signature is not a function type"), location)
                })?;

                let received = self.type_of(value)?;
                if !self.types.equals(expected, received) {
                    return Err(Error::new(
                        ErrorImpl::WrongReturnTypeError {
                            expected: self.types.format(expected),
                            received: self.types.format(received),
                        },
                        location,
                    ));
                }

                Ok(received)
            }
            ExprKind::Yield(value) => self.type_of(value),
        }
    }

    fn check_assignment(&self, target: &Expr, value: &Expr) -> Result<(), Error> {
        let token = target
            .as_identifier()
            .ok_or_else(|| Error::new(ErrorImpl::BadAssignmentError, target.location))?;

        let id = self.resolve(target.scope, token)?;
        if self.scopes.symbol(id).kind != SymbolKind::Var {
            return Err(Error::new(
                ErrorImpl::NonVarAssignError {
                    symbol: token.text().to_string(),
                },
                target.location,
            ));
        }

        let expected = self.symbol_type(id, token)?;
        let received = self.type_of(value)?;
        if !self.types.equals(expected, received) {
            return Err(Error::new(
                ErrorImpl::AssignmentTypeMismatchError {
                    expected: self.types.format(expected),
                    received: self.types.format(received),
                },
                value.location,
            ));
        }

        Ok(())
    }
}

impl VisitMut for TypeEvaluator<'_> {
    fn visit_var_decl_mut(&mut self, decl: &mut VarDecl) -> Result<(), Error> {
        self.visit_expr_mut(&mut decl.init)?;
        let received = self.type_of(&decl.init)?;

        match decl.signature {
            Some(expected) => {
                if !self.types.equals(expected, received) {
                    return Err(Error::new(
                        ErrorImpl::VarDeclInitTypeMismatchError {
                            expected: self.types.format(expected),
                            received: self.types.format(received),
                        },
                        decl.init.location,
                    ));
                }
            }
            None => {
                let id = decl
                    .scope
                    .and_then(|scope| self.scopes.lookup_local(scope, decl.name.text()))
                    .ok_or_else(|| {
                        internal(
                            format!("variable {:?} was not declared", decl.name.text()),
                            decl.name.location,
                        )
                    })?;

                self.inferred.insert(id, received);
            }
        }

        Ok(())
    }

    fn visit_fun_decl_mut(&mut self, decl: &mut FunDecl) -> Result<(), Error> {
        let signature = decl.signature.ok_or_else(|| {
            Error::new(
                ErrorImpl::MissingSignatureError {
                    function: decl.name.text().to_string(),
                },
                decl.name.location,
            )
        })?;

        let enclosing = self.function_type.replace(signature);
        let result = walk_fun_decl_mut(self, decl);
        self.function_type = enclosing;

        result
    }

    fn visit_stmt_mut(&mut self, stmt: &mut Stmt) -> Result<(), Error> {
        walk_stmt_mut(self, stmt)?;

        if let StmtKind::Assignment { target, value } = &stmt.kind {
            self.check_assignment(target, value)?;
        }

        Ok(())
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) -> Result<(), Error> {
        walk_expr_mut(self, expr)?;

        let ty = self.evaluate(expr)?;
        expr.ty = Some(ty);

        Ok(())
    }
}

/// Annotates every expression of `program` with its type.
///
/// Must run after scope building and definition checking. Fails on the
/// first violated typing rule.
#[tracing::instrument(skip_all)]
pub fn evaluate_types(
    program: &mut Program,
    scopes: &ScopeTree,
    types: &TypeArena,
) -> Result<(), Error> {
    TypeEvaluator::new(scopes, types).visit_program_mut(program)
}

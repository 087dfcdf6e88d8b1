use crate::{
    ast::statements::{Decl, FunDecl, Stmt, StmtKind, VarDecl},
    ast::types::TypeId,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Location,
};

use super::{parser::Parser, types::parse_type};

/// An expression statement or an assignment, terminated by `;`.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;
    let location = expr.location;

    if parser.matches(TokenKind::Assignment) {
        if expr.as_identifier().is_none() {
            return Err(Error::new(ErrorImpl::ParseNonLvalueError, location));
        }

        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        return Ok(Stmt::new(
            StmtKind::Assignment {
                target: expr,
                value,
            },
            location,
        ));
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(StmtKind::Expr(expr), location))
}

/// Parses `{ ... }` and returns its statements with the location of the `{`.
///
/// Errors inside the block are reported and skipped; the block itself then
/// fails with `ParseCompoundError` once its `}` has been consumed.
pub fn parse_block(parser: &mut Parser) -> Result<(Vec<Stmt>, Location), Error> {
    let location = parser.expect(TokenKind::OpenCurly)?.location;

    parser.enter_block();
    let result = parse_block_body(parser, location);
    parser.exit_block();

    result.map(|stmts| (stmts, location))
}

fn parse_block_body(parser: &mut Parser, location: Location) -> Result<Vec<Stmt>, Error> {
    let mut stmts = vec![];
    let mut failed = false;

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly => {
                parser.advance();
                break;
            }
            TokenKind::EOF => {
                return Err(parser.unexpected(ErrorImpl::ParseTokenError {
                    expected: TokenKind::CloseCurly,
                    found: parser.current_token().to_string(),
                }))
            }
            _ => {}
        }

        let kind = parser.current_token_kind();
        let result = match parser.get_decl_lookup().get(&kind).copied() {
            Some(handler) => handler(parser).map(|decl| {
                let location = decl.location();
                Stmt::new(StmtKind::Decl(decl), location)
            }),
            None => parse_stmt(parser),
        };

        match result {
            Ok(stmt) => stmts.push(stmt),
            Err(error) => {
                failed = true;
                parser.report(error);
                parser.synchronize();
            }
        }
    }

    if failed {
        return Err(Error::new(ErrorImpl::ParseCompoundError, location));
    }

    Ok(stmts)
}

/// `[of <type>] var ...` or `[of <type>] fun ...`
pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let location = parser.current_token().location;

    let signature = if parser.matches(TokenKind::Of) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    match parser.current_token_kind() {
        TokenKind::Var => parse_var_decl(parser, signature, location).map(Decl::Var),
        TokenKind::Fun => parse_fun_decl(parser, signature, location).map(Decl::Fun),
        _ => Err(parser.unexpected(ErrorImpl::ParseDeclarationError {
            token: parser.current_token().to_string(),
        })),
    }
}

fn parse_var_decl(
    parser: &mut Parser,
    signature: Option<TypeId>,
    location: Location,
) -> Result<VarDecl, Error> {
    parser.expect(TokenKind::Var)?;
    let name = parser.expect(TokenKind::Identifier)?;

    parser.expect(TokenKind::Assignment)?;
    let init = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::Semicolon)?.location;

    Ok(VarDecl {
        name,
        signature,
        init,
        end,
        location,
        scope: None,
    })
}

fn parse_fun_decl(
    parser: &mut Parser,
    signature: Option<TypeId>,
    location: Location,
) -> Result<FunDecl, Error> {
    parser.expect(TokenKind::Fun)?;
    let name = parser.expect(TokenKind::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;
    let mut params = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            params.push(parser.expect(TokenKind::Identifier)?);

            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    if let Some(signature) = signature {
        let types = parser.types();

        match types.as_function(signature) {
            None => {
                return Err(Error::new(
                    ErrorImpl::FnDeclSignatureError {
                        function: name.text().to_string(),
                        signature: types.format(signature),
                    },
                    name.location,
                ))
            }
            Some((arguments, _)) if arguments.len() != params.len() => {
                return Err(Error::new(
                    ErrorImpl::FnDeclArgsCountMismatchError {
                        function: name.text().to_string(),
                        expected: arguments.len(),
                        received: params.len(),
                    },
                    name.location,
                ))
            }
            Some(_) => {}
        }
    }

    parser.expect(TokenKind::Assignment)?;
    let body = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(FunDecl {
        name,
        params,
        signature,
        body,
        location,
        scope: None,
    })
}

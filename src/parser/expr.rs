use crate::{
    ast::expressions::{Expr, ExprKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => {
            return Err(parser.unexpected(ErrorImpl::ParsePrimaryError {
                token: parser.current_token().to_string(),
            }))
        }
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the current level, fold it into lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = match parser.get_bp_lookup().get(&token_kind) {
            Some(next_bp) if *next_bp > bp => *next_bp,
            _ => break,
        };

        let led = match parser.get_led_lookup().get(&token_kind).copied() {
            Some(led) => led,
            None => break,
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number
        | TokenKind::String
        | TokenKind::Identifier
        | TokenKind::True
        | TokenKind::False => {
            let token = parser.advance();
            let location = token.location;
            Ok(Expr::new(ExprKind::Literal(token), location))
        }
        _ => Err(parser.unexpected(ErrorImpl::ParsePrimaryError {
            token: parser.current_token().to_string(),
        })),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;
    let location = operator_token.location;

    Ok(Expr::new(
        ExprKind::Binary {
            op: operator_token,
            lhs: Box::new(left),
            rhs: Box::new(right),
        },
        location,
    ))
}

pub fn parse_comparison_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;
    let location = operator_token.location;

    Ok(Expr::new(
        ExprKind::Comparison {
            op: operator_token,
            lhs: Box::new(left),
            rhs: Box::new(right),
        },
        location,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary)?;
    let location = operator_token.location;

    Ok(Expr::new(
        ExprKind::Unary {
            op: operator_token,
            operand: Box::new(operand),
        },
        location,
    ))
}

/// `callee(arg, ...)`, chained calls fold left.
pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expr(parser, BindingPower::Default)?);

            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let location = left.location;
    Ok(Expr::new(
        ExprKind::Call {
            callee: Box::new(left),
            args,
        },
        location,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_block_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let (stmts, location) = parse_block(parser)?;

    Ok(Expr::new(ExprKind::Block { stmts }, location))
}

/// `if <cond> then <expr> [else <expr>]`
pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let location = parser.expect(TokenKind::If)?.location;
    let condition = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Then)?;
    let then_branch = parse_expr(parser, BindingPower::Default)?;

    let else_branch = if parser.matches(TokenKind::Else) {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    } else {
        None
    };

    Ok(Expr::new(
        ExprKind::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
        },
        location,
    ))
}

pub fn parse_return_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let location = parser.expect(TokenKind::Return)?.location;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::new(ExprKind::Return(Box::new(value)), location))
}

pub fn parse_yield_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let location = parser.expect(TokenKind::Yield)?.location;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::new(ExprKind::Yield(Box::new(value)), location))
}

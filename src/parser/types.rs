//! Type parsing implementation.
//!
//! This module handles parsing of the type signatures that follow `of`.
//! It supports:
//!
//! - Primitive types (`Int`, `Bool`, `String`, `Unit`)
//! - Pointer types (`*T`)
//! - Function types (`[T, ...] -> R`)
//!
//! Every type is prefix-introduced, so only NUD handlers are needed. Parsed
//! types are allocated in the parser's type arena.

use std::collections::HashMap;

use crate::{
    ast::types::{Primitive, TypeId},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeId, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::TyInt, parse_primitive_type);
    parser.type_nud(TokenKind::TyBool, parse_primitive_type);
    parser.type_nud(TokenKind::TyString, parse_primitive_type);
    parser.type_nud(TokenKind::TyUnit, parse_primitive_type);
    parser.type_nud(TokenKind::Star, parse_pointer_type);
    parser.type_nud(TokenKind::OpenBracket, parse_function_type);
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let token_kind = parser.current_token_kind();

    match parser.get_type_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud(parser),
        None => Err(parser.unexpected(ErrorImpl::ParseTypeError {
            token: parser.current_token().to_string(),
        })),
    }
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let primitive = match parser.current_token_kind() {
        TokenKind::TyInt => Primitive::Int,
        TokenKind::TyBool => Primitive::Bool,
        TokenKind::TyString => Primitive::String,
        TokenKind::TyUnit => Primitive::Unit,
        _ => {
            return Err(parser.unexpected(ErrorImpl::ParseTypeError {
                token: parser.current_token().to_string(),
            }))
        }
    };

    parser.advance();
    Ok(parser.types().primitive(primitive))
}

/// `*T`
pub fn parse_pointer_type(parser: &mut Parser) -> Result<TypeId, Error> {
    parser.expect(TokenKind::Star)?;
    let underlying = parse_type(parser)?;

    Ok(parser.types().pointer(underlying))
}

/// `[T, ...] -> R`
pub fn parse_function_type(parser: &mut Parser) -> Result<TypeId, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseBracket {
        loop {
            arguments.push(parse_type(parser)?);

            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseBracket)?;
    parser.expect(TokenKind::Arrow)?;
    let return_type = parse_type(parser)?;

    Ok(parser.types().function(arguments, return_type))
}


//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program entry point.
//! The parser pulls tokens from the lexer on demand and maintains lookup
//! tables for:
//! - Declaration handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Errors are collected instead of aborting: a failed declaration or
//! statement is reported, the parser resynchronises and carries on.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{ast::Program, types::TypeArena},
    errors::errors::{Diagnostics, Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclHandler, DeclLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup,
    },
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    lexer: Lexer,
    /// Arena receiving the types read from signatures
    types: &'a mut TypeArena,
    /// Lookup table for declaration parsing handlers
    decl_lookup: DeclLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    diagnostics: Diagnostics,
    /// Number of blocks currently open
    block_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &str, types: &'a mut TypeArena) -> Self {
        Parser {
            lexer: Lexer::new(source),
            types,
            decl_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            diagnostics: Diagnostics::new(),
            block_depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.lexer.peek()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.lexer.peek().kind
    }

    /// Advances to the next token and returns the consumed one.
    pub fn advance(&mut self) -> Token {
        self.lexer.advance()
    }

    /// Consumes the current token iff it is of the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.matches(kind)
    }

    /// Builds the error for an unexpected current token.
    ///
    /// An `Invalid` token reports the lexical error it carries instead.
    pub fn unexpected(&self, error: ErrorImpl) -> Error {
        let token = self.current_token();

        match token.lexical_error() {
            Some(lexical) => Error::new(lexical.clone(), token.location),
            None => Error::new(error, token.location),
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<ErrorImpl>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        let error = error.unwrap_or_else(|| ErrorImpl::ParseTokenError {
            expected: expected_kind,
            found: self.current_token().to_string(),
        });

        Err(self.unexpected(error))
    }

    /// Expects a token of the specified kind with the default error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn types(&mut self) -> &mut TypeArena {
        &mut *self.types
    }

    pub fn report(&mut self, error: Error) {
        debug!(error = %error, "recovering from parse error");
        self.diagnostics.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn enter_block(&mut self) {
        self.block_depth += 1;
    }

    pub fn exit_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    /// Panic-mode recovery.
    ///
    /// Skips tokens until a `;` outside any nested braces has been consumed,
    /// the `}` closing the enclosing block is next, or the input ends.
    /// Braced groups met on the way are skipped whole.
    pub fn synchronize(&mut self) {
        let mut depth = 0usize;

        loop {
            match self.current_token_kind() {
                TokenKind::EOF => return,
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::CloseCurly if depth == 0 && self.block_depth > 0 => return,
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => depth = depth.saturating_sub(1),
                _ => {}
            }

            self.advance();
        }
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers carry no binding power: a token that is both prefix
    /// and infix (`-`, `(`) keeps the one given by [`Parser::led`].
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a declaration handler for a token.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }
}

/// Parses a source buffer into a [`Program`].
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses top-level declarations until
/// EOF. Every error met on the way is collected; if there was any, the
/// result holds all of them followed by a `ParseProgramError`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str, types: &mut TypeArena) -> Result<Program, Diagnostics> {
    let mut parser = Parser::new(source, types);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let mut declarations = vec![];

    while parser.has_tokens() {
        let kind = parser.current_token_kind();

        let result = match parser.get_decl_lookup().get(&kind).copied() {
            Some(handler) => handler(&mut parser),
            None => {
                let error = parser.unexpected(ErrorImpl::ParseDeclarationError {
                    token: parser.current_token().to_string(),
                });
                Err(error)
            }
        };

        match result {
            Ok(decl) => declarations.push(decl),
            Err(error) => {
                parser.report(error);
                parser.synchronize();
            }
        }
    }

    if parser.error_count() > 0 {
        let location = parser.current_token().location;
        let errors = parser.error_count();
        let mut diagnostics = parser.diagnostics;
        diagnostics.push(Error::new(ErrorImpl::ParseProgramError { errors }, location));
        return Err(diagnostics);
    }

    Ok(Program {
        declarations,
        scope: None,
    })
}

//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that turns the lexer's token stream
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Declaration parsing (`var`, `fun`, optional `of <type>` signatures)
//! - Statement parsing (expression statements, assignments, blocks)
//! - Expression parsing (comparisons, arithmetic, calls, `if`, literals)
//! - Type parsing for signatures
//! - Panic-mode error recovery
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;

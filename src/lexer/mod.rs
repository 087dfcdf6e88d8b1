//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - On-demand tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token location tracking for error reporting
//! - Comments and whitespace handling
//! - Lexical errors carried as `Invalid` tokens instead of aborting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;

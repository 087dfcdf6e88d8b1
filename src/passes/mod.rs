//! Semantic passes over the parsed program.
//!
//! The passes run in a fixed order, each relying on the previous one:
//!
//! - `scope_builder` stamps every node with its scope and fills the symbol table
//! - `definition_checker` verifies every identifier resolves
//! - `type_evaluator` computes and checks the type of every expression
//!
//! Each pass stops at its first error.

pub mod definition_checker;
pub mod scope_builder;
pub mod type_evaluator;

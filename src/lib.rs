#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::{ast::Program, types::TypeArena},
    errors::errors::{Diagnostics, Error, ErrorTip},
    passes::{definition_checker::check_definitions, scope_builder::build_scopes, type_evaluator::evaluate_types},
    scope::scope::ScopeTree,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod passes;
pub mod printer;
pub mod scope;

extern crate regex;

/// A point in the source buffer.
///
/// Stored zero-based; displayed one-based as `line L, column C`. Locations
/// are ordered by their absolute offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

/// Everything the pipeline produced for one compilation unit.
///
/// The AST refers into both arenas by index, so the three travel together.
#[derive(Debug)]
pub struct Compilation {
    pub program: Program,
    pub types: TypeArena,
    pub scopes: ScopeTree,
}

/// Runs the parser and all semantic passes over an in-memory source buffer.
///
/// Parse failures return every recovered diagnostic; a semantic failure
/// returns the single error that stopped its pass.
pub fn compile_source(source: &str) -> Result<Compilation, Diagnostics> {
    let mut types = TypeArena::new();
    let mut program = parser::parser::parse(source, &mut types)?;

    let mut scopes = ScopeTree::new();
    build_scopes(&mut program, &mut scopes, &types)?;
    check_definitions(&program, &scopes)?;
    evaluate_types(&mut program, &scopes, &types)?;

    Ok(Compilation {
        program,
        types,
        scopes,
    })
}

pub fn get_line_at_location(source: &str, location: &Location) -> String {
    source
        .lines()
        .nth(location.line)
        .map(String::from)
        .unwrap_or_default()
}

/// Renders an error with the offending source line underneath.
///
/// ```text
/// Error: UndefinedSymbolError (Local `a` must be declared before it is used)
/// -> main.lt: use of undefined symbol "a" at line 3, column 5
///   |
/// 3 | a + 1;
///   | ^
/// ```
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    let location = error.get_location();
    let line_text = get_line_at_location(source, location);

    let line_str = (location.line + 1).to_string();
    let padding = line_str.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}: {}\n", file, error));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));

    let arrows = location.column.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (String::from(&string[start..]), start)
}

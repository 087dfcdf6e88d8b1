/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the `Visit`/`VisitMut` traversal traits
/// - expressions: Definitions for the expression kinds
/// - statements: Definitions for statements and declarations
/// - types: The type arena and type representations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

/// Scope module
/// Lexical scopes and the symbols declared in them
///
/// Submodules:
/// - scope: The scope tree arena, symbols and name lookup
pub mod scope;

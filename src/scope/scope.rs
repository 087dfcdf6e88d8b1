use std::collections::HashMap;

use tracing::debug;

use crate::{ast::types::TypeId, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Fn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    /// Where the name is declared.
    pub location: Location,
    /// Uses strictly after this location can see a non-global symbol.
    pub visible_from: Location,
    /// Top-level symbols are visible from anywhere in the program.
    pub global: bool,
    /// Declared type; `None` for declarations without a signature.
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub location: Location,
    pub parent: Option<ScopeId>,
    pub symbols: HashMap<String, SymbolId>,
}

/// Arena holding every scope and symbol of a program.
///
/// Scopes are chained through their parent ids; the root scope has no parent.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self, location: Location, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope {
            location,
            parent,
            symbols: HashMap::new(),
        });

        let id = ScopeId((self.scopes.len() - 1) as u32);
        debug!(scope = id.index(), parent = ?parent.map(ScopeId::index), "pushed scope");
        id
    }

    /// Binds `symbol` in `scope`.
    ///
    /// Fails with the id of the existing symbol if the name is already bound
    /// in that same scope. Names bound in parent scopes are shadowed.
    pub fn add_symbol(&mut self, scope: ScopeId, symbol: Symbol) -> Result<SymbolId, SymbolId> {
        if let Some(existing) = self.scopes[scope.index()].symbols.get(&symbol.name) {
            return Err(*existing);
        }

        let id = SymbolId(self.symbols.len() as u32);
        self.scopes[scope.index()]
            .symbols
            .insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Resolves `name` as seen from location `at` inside `scope`.
    ///
    /// At every level a symbol matches only if it is global or declared
    /// before `at`; a non-matching binding does not stop the search in the
    /// parent scopes.
    pub fn lookup(&self, scope: ScopeId, name: &str, at: Location) -> Option<SymbolId> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = &self.scopes[id.index()];

            if let Some(symbol_id) = scope.symbols.get(name) {
                let symbol = &self.symbols[symbol_id.index()];
                if symbol.global || symbol.visible_from < at {
                    return Some(*symbol_id);
                }
            }

            current = scope.parent;
        }

        None
    }

    /// The binding of `name` in `scope` itself, ignoring visibility.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes[scope.index()].symbols.get(name).copied()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }
}

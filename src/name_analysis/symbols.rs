use rustc_hash::FxHashMap;

use crate::{types::types::Type, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Fn,
}

/// A declaration as seen by later passes.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub declared_at: Position,
    data_type: Type,
}

impl Symbol {
    pub fn get_data_type(&self) -> Type {
        self.data_type
    }
}

/// One lexical scope.
#[derive(Debug)]
pub struct Environment {
    pub variable_lookup: FxHashMap<String, SymbolId>,
    pub depth: usize,
}

impl Environment {
    pub fn new(depth: usize) -> Self {
        Environment {
            variable_lookup: FxHashMap::default(),
            depth,
        }
    }

    pub fn get_variable(&self, name: &str) -> Option<SymbolId> {
        self.variable_lookup.get(name).copied()
    }
}

/// Every symbol declared in the program plus the stack of open scopes.
///
/// Symbols outlive the scope that declared them; only the name lookup is
/// scoped.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    environments: Vec<Environment>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table with the global scope open.
    pub fn new() -> Self {
        SymbolTable {
            symbols: vec![],
            environments: vec![Environment::new(0)],
        }
    }

    pub fn enter_scope(&mut self) {
        let depth = self.environments.len();
        tracing::trace!(depth, "entering scope");
        self.environments.push(Environment::new(depth));
    }

    pub fn exit_scope(&mut self) {
        // The global scope stays open for the lifetime of the table.
        if self.environments.len() > 1 {
            self.environments.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.environments.len() - 1
    }

    /// Declares `name` in the innermost scope.
    ///
    /// Returns `None` when the innermost scope already has that name; outer
    /// declarations are shadowed, not conflicting.
    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        data_type: Type,
        declared_at: Position,
    ) -> Option<SymbolId> {
        let id = SymbolId(self.symbols.len() as u32);
        let current = self.environments.last_mut()?;
        if current.variable_lookup.contains_key(name) {
            return None;
        }
        current.variable_lookup.insert(name.to_string(), id);
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            declared_at,
            data_type,
        });
        Some(id)
    }

    /// Finds the innermost visible declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId(i as u32), symbol))
    }
}

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::{ast::ast::NodeId, errors::errors::InternalError, types::types::Type};

/// Write-once map from AST node to its computed type.
#[derive(Debug, Clone, Default)]
pub struct NodeTypes {
    types: FxHashMap<NodeId, Type>,
}

impl NodeTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: NodeId, ty: Type) -> Result<(), InternalError> {
        match self.types.entry(node) {
            Entry::Occupied(_) => Err(InternalError::NodeTypeAlreadySet(node)),
            Entry::Vacant(slot) => {
                slot.insert(ty);
                Ok(())
            }
        }
    }

    pub fn get(&self, node: NodeId) -> Result<Type, InternalError> {
        self.types
            .get(&node)
            .copied()
            .ok_or(InternalError::UnsetNodeType(node))
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.types.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Type)> + '_ {
        self.types.iter().map(|(node, ty)| (*node, *ty))
    }
}

use std::fmt::{self, Display};

use crate::Position;

use super::{statements::FnDecl, types::TypeNode};

/// Node Identity
///
/// Every node handed out by the [`AstBuilder`](super::builder::AstBuilder) gets a
/// distinct id. The semantic passes key their side tables on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Program root: the ordered list of global declarations.
#[derive(Debug, Clone)]
pub struct Program {
    pub id: NodeId,
    pub globals: Vec<Decl>,
}

/// Top level declaration
#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
}

impl Decl {
    pub fn id(&self) -> NodeId {
        match self {
            Decl::Var(var) => var.id,
            Decl::Fn(func) => func.id,
        }
    }

    pub fn name(&self) -> &Ident {
        match self {
            Decl::Var(var) => &var.name,
            Decl::Fn(func) => &func.name,
        }
    }
}

/// Identifier occurrence.
///
/// Declaration sites and uses both carry one; name analysis binds each of
/// them to a symbol through its `id`.
#[derive(Debug, Clone)]
pub struct Ident {
    pub id: NodeId,
    pub pos: Position,
    pub name: String,
}

/// Variable Declaration
///
/// Used for globals, locals and formal parameters alike.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub id: NodeId,
    pub pos: Position,
    pub ty: TypeNode,
    pub name: Ident,
}

//! Syntactic type annotations.
//!
//! A `TypeNode` is what the source wrote (`int`, `byte array[4]`, ...). The
//! type model lowers it to a canonical [`Type`](crate::types::types::Type)
//! during name analysis.

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Int,
    Bool,
    Byte,
    Void,
    Array { elem: Box<TypeNode>, size: u32 },
}

impl TypeNode {
    pub fn array(elem: TypeNode, size: u32) -> Self {
        TypeNode::Array {
            elem: Box::new(elem),
            size,
        }
    }

    /// Whether a variable may be declared with this type.
    ///
    /// `void` is never storable, neither is an array of it, and arrays need
    /// at least one element.
    pub fn is_valid_var_type(&self) -> bool {
        match self {
            TypeNode::Void => false,
            TypeNode::Array { elem, size } => *size >= 1 && elem.is_valid_var_type(),
            _ => true,
        }
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Int => write!(f, "int"),
            TypeNode::Bool => write!(f, "bool"),
            TypeNode::Byte => write!(f, "byte"),
            TypeNode::Void => write!(f, "void"),
            TypeNode::Array { elem, size } => write!(f, "{} array[{}]", elem, size),
        }
    }
}

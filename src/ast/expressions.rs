use std::fmt::{self, Display};

use crate::Position;

use super::ast::{Ident, NodeId};

#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub pos: Position,
    pub kind: ExprKind,
}

/// Expression Kinds
///
/// Defines the various kinds of expressions in the AST.
#[derive(Debug, Clone)]
pub enum ExprKind {
    Id(Ident),
    Index {
        base: Box<Expr>,
        offset: Box<Expr>,
    },
    Assign {
        dst: Box<Expr>,
        src: Box<Expr>,
    },
    Call {
        callee: Ident,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    IntLit(i64),
    StrLit(String),
    True,
    False,
    /// Opaque externally supplied boolean used for non-deterministic branching.
    Havoc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    And,
    Or,
    Equals,
    NotEquals,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

/// Operators that share one operand rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorFamily {
    Arithmetic,
    Logical,
    Equality,
    Relational,
}

impl BinaryOp {
    pub fn family(self) -> OperatorFamily {
        match self {
            BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Times | BinaryOp::Divide => {
                OperatorFamily::Arithmetic
            }
            BinaryOp::And | BinaryOp::Or => OperatorFamily::Logical,
            BinaryOp::Equals | BinaryOp::NotEquals => OperatorFamily::Equality,
            BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq => {
                OperatorFamily::Relational
            }
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Divide => "/",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

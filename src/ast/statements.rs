use crate::Position;

use super::{
    ast::{Ident, NodeId, VarDecl},
    expressions::Expr,
    types::TypeNode,
};

#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub pos: Position,
    pub kind: StmtKind,
}

/// Statement Kinds
///
/// `Assign` wraps an assignment expression and `Call` wraps a call
/// expression; both exist so the value form can be reused as a statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    VarDecl(VarDecl),
    Assign(Expr),
    Read(Expr),
    Write(Expr),
    PostInc(Expr),
    PostDec(Expr),
    If {
        cond: Expr,
        body: Vec<Stmt>,
    },
    IfElse {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    Call(Expr),
}

/// Function Declaration
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub id: NodeId,
    pub pos: Position,
    pub ret: TypeNode,
    pub name: Ident,
    pub formals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
}

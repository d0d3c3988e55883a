//! Node construction for the AST.
//!
//! The parser (and the tests) build trees through an [`AstBuilder`] so that
//! every node gets a fresh [`NodeId`]. Nodes are stamped with the builder's
//! current source position, which callers move with [`AstBuilder::at`].

use crate::Position;

use super::{
    ast::{Decl, Ident, NodeId, Program, VarDecl},
    expressions::{BinaryOp, Expr, ExprKind, UnaryOp},
    statements::{FnDecl, Stmt, StmtKind},
    types::TypeNode,
};

#[derive(Debug)]
pub struct AstBuilder {
    next_id: u32,
    pos: Position,
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AstBuilder {
    pub fn new() -> Self {
        AstBuilder {
            next_id: 0,
            pos: Position(1, 1),
        }
    }

    /// Moves the position stamped onto subsequently built nodes.
    pub fn at(&mut self, line: u32, col: u32) -> &mut Self {
        self.pos = Position(line, col);
        self
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    // DECLARATIONS

    pub fn program(&mut self, globals: Vec<Decl>) -> Program {
        Program {
            id: self.fresh_id(),
            globals,
        }
    }

    pub fn ident(&mut self, name: &str) -> Ident {
        Ident {
            id: self.fresh_id(),
            pos: self.pos,
            name: name.to_string(),
        }
    }

    pub fn var_decl(&mut self, ty: TypeNode, name: &str) -> VarDecl {
        let name = self.ident(name);
        VarDecl {
            id: self.fresh_id(),
            pos: self.pos,
            ty,
            name,
        }
    }

    pub fn fn_decl(
        &mut self,
        ret: TypeNode,
        name: &str,
        formals: Vec<VarDecl>,
        body: Vec<Stmt>,
    ) -> FnDecl {
        let name = self.ident(name);
        FnDecl {
            id: self.fresh_id(),
            pos: self.pos,
            ret,
            name,
            formals,
            body,
        }
    }

    pub fn global_var(&mut self, ty: TypeNode, name: &str) -> Decl {
        Decl::Var(self.var_decl(ty, name))
    }

    pub fn global_fn(
        &mut self,
        ret: TypeNode,
        name: &str,
        formals: Vec<VarDecl>,
        body: Vec<Stmt>,
    ) -> Decl {
        Decl::Fn(self.fn_decl(ret, name, formals, body))
    }

    // EXPRESSIONS

    pub fn expr(&mut self, kind: ExprKind) -> Expr {
        Expr {
            id: self.fresh_id(),
            pos: self.pos,
            kind,
        }
    }

    pub fn id(&mut self, name: &str) -> Expr {
        let ident = self.ident(name);
        self.expr(ExprKind::Id(ident))
    }

    pub fn int_lit(&mut self, value: i64) -> Expr {
        self.expr(ExprKind::IntLit(value))
    }

    pub fn str_lit(&mut self, value: &str) -> Expr {
        self.expr(ExprKind::StrLit(value.to_string()))
    }

    pub fn true_lit(&mut self) -> Expr {
        self.expr(ExprKind::True)
    }

    pub fn false_lit(&mut self) -> Expr {
        self.expr(ExprKind::False)
    }

    pub fn havoc(&mut self) -> Expr {
        self.expr(ExprKind::Havoc)
    }

    pub fn index(&mut self, base: Expr, offset: Expr) -> Expr {
        self.expr(ExprKind::Index {
            base: Box::new(base),
            offset: Box::new(offset),
        })
    }

    pub fn assign(&mut self, dst: Expr, src: Expr) -> Expr {
        self.expr(ExprKind::Assign {
            dst: Box::new(dst),
            src: Box::new(src),
        })
    }

    pub fn call(&mut self, callee: &str, args: Vec<Expr>) -> Expr {
        let callee = self.ident(callee);
        self.expr(ExprKind::Call { callee, args })
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        self.expr(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: Expr) -> Expr {
        self.expr(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    // STATEMENTS

    pub fn stmt(&mut self, kind: StmtKind) -> Stmt {
        Stmt {
            id: self.fresh_id(),
            pos: self.pos,
            kind,
        }
    }

    pub fn local_var(&mut self, ty: TypeNode, name: &str) -> Stmt {
        let decl = self.var_decl(ty, name);
        self.stmt(StmtKind::VarDecl(decl))
    }

    /// `dst = src;`
    pub fn assign_stmt(&mut self, dst: Expr, src: Expr) -> Stmt {
        let assign = self.assign(dst, src);
        self.stmt(StmtKind::Assign(assign))
    }

    pub fn read(&mut self, dst: Expr) -> Stmt {
        self.stmt(StmtKind::Read(dst))
    }

    pub fn write(&mut self, src: Expr) -> Stmt {
        self.stmt(StmtKind::Write(src))
    }

    pub fn post_inc(&mut self, operand: Expr) -> Stmt {
        self.stmt(StmtKind::PostInc(operand))
    }

    pub fn post_dec(&mut self, operand: Expr) -> Stmt {
        self.stmt(StmtKind::PostDec(operand))
    }

    pub fn if_stmt(&mut self, cond: Expr, body: Vec<Stmt>) -> Stmt {
        self.stmt(StmtKind::If { cond, body })
    }

    pub fn if_else(&mut self, cond: Expr, then_body: Vec<Stmt>, else_body: Vec<Stmt>) -> Stmt {
        self.stmt(StmtKind::IfElse {
            cond,
            then_body,
            else_body,
        })
    }

    pub fn while_stmt(&mut self, cond: Expr, body: Vec<Stmt>) -> Stmt {
        self.stmt(StmtKind::While { cond, body })
    }

    pub fn return_stmt(&mut self, value: Option<Expr>) -> Stmt {
        self.stmt(StmtKind::Return(value))
    }

    /// `callee(args);`
    pub fn call_stmt(&mut self, callee: &str, args: Vec<Expr>) -> Stmt {
        let call = self.call(callee, args);
        self.stmt(StmtKind::Call(call))
    }
}

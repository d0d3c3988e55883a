use rustc_hash::FxHashMap;

use crate::{
    ast::{
        ast::{Decl, Ident, NodeId, Program, VarDecl},
        expressions::{Expr, ExprKind},
        statements::{FnDecl, Stmt, StmtKind},
        types::TypeNode,
    },
    errors::errors::{DiagnosticSink, ErrorImpl, Failure},
    types::types::{Type, TypeInterner},
    Config,
};

use super::symbols::{Symbol, SymbolId, SymbolKind, SymbolTable};

/// A program whose identifiers are all bound to symbols.
#[derive(Debug)]
pub struct NameAnalysis {
    program: Program,
    symbols: SymbolTable,
    bindings: FxHashMap<NodeId, SymbolId>,
    types: TypeInterner,
}

impl NameAnalysis {
    /// Resolves `program`, failing if any identifier is undeclared, declared
    /// twice in one scope, or declared with an invalid type.
    pub fn build(program: Program) -> Result<NameAnalysis, Failure> {
        Self::build_with_config(program, &Config::default())
    }

    #[tracing::instrument(skip_all)]
    pub fn build_with_config(program: Program, config: &Config) -> Result<NameAnalysis, Failure> {
        let (analysis, sink) = Self::run(program, config);
        if sink.has_error() {
            return Err(Failure::Rejected(sink.into_diagnostics()));
        }
        Ok(analysis)
    }

    /// Resolves `program` and hands back the diagnostics alongside the
    /// result, whether or not it failed.
    pub fn run(program: Program, config: &Config) -> (NameAnalysis, DiagnosticSink) {
        let mut analyzer = NameAnalyzer {
            symbols: SymbolTable::new(),
            bindings: FxHashMap::default(),
            types: TypeInterner::new(),
            sink: DiagnosticSink::with_limit(config.error_limit),
        };
        analyzer.analyze_program(&program);

        tracing::debug!(
            symbols = analyzer.symbols.len(),
            bindings = analyzer.bindings.len(),
            diagnostics = analyzer.sink.total(),
            "name analysis finished"
        );

        let analysis = NameAnalysis {
            program,
            symbols: analyzer.symbols,
            bindings: analyzer.bindings,
            types: analyzer.types,
        };
        (analysis, analyzer.sink)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn types(&self) -> &TypeInterner {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeInterner {
        &mut self.types
    }

    /// Symbol bound to an identifier occurrence.
    pub fn symbol_of(&self, ident: NodeId) -> Option<&Symbol> {
        self.bindings
            .get(&ident)
            .and_then(|id| self.symbols.get(*id))
    }

    pub fn symbol_id_of(&self, ident: NodeId) -> Option<SymbolId> {
        self.bindings.get(&ident).copied()
    }
}

struct NameAnalyzer {
    symbols: SymbolTable,
    bindings: FxHashMap<NodeId, SymbolId>,
    types: TypeInterner,
    sink: DiagnosticSink,
}

impl NameAnalyzer {
    fn analyze_program(&mut self, program: &Program) {
        for global in program.globals.iter() {
            match global {
                Decl::Var(var) => self.analyze_var_decl(var),
                Decl::Fn(func) => self.analyze_fn_decl(func),
            }
        }
    }

    /// Declared type of a variable, `Error` for a non-storable annotation.
    fn var_type(&mut self, ty: &TypeNode) -> Type {
        if ty.is_valid_var_type() {
            self.types.lower(ty)
        } else {
            Type::ERROR
        }
    }

    fn declare(&mut self, ident: &Ident, kind: SymbolKind, data_type: Type) {
        match self.symbols.declare(&ident.name, kind, data_type, ident.pos) {
            Some(id) => {
                self.bindings.insert(ident.id, id);
            }
            None => self.sink.report(
                ErrorImpl::MultipleDeclaration {
                    name: ident.name.clone(),
                },
                ident.pos,
            ),
        }
    }

    fn analyze_var_decl(&mut self, var: &VarDecl) {
        if !var.ty.is_valid_var_type() {
            self.sink.report(
                ErrorImpl::BadVariableType {
                    name: var.name.name.clone(),
                    ty: var.ty.to_string(),
                },
                var.name.pos,
            );
        }
        let data_type = self.var_type(&var.ty);
        self.declare(&var.name, SymbolKind::Var, data_type);
    }

    fn analyze_fn_decl(&mut self, func: &FnDecl) {
        let formals: Vec<Type> = func
            .formals
            .iter()
            .map(|formal| self.var_type(&formal.ty))
            .collect();
        if func.ret != TypeNode::Void && !func.ret.is_valid_var_type() {
            self.sink.report(
                ErrorImpl::BadReturnType {
                    name: func.name.name.clone(),
                    ty: func.ret.to_string(),
                },
                func.name.pos,
            );
        }
        let ret = self.types.lower(&func.ret);
        let fn_type = self.types.function(formals, ret);

        // Declared before the body so recursive calls resolve.
        self.declare(&func.name, SymbolKind::Fn, fn_type);

        self.symbols.enter_scope();
        for formal in func.formals.iter() {
            self.analyze_var_decl(formal);
        }
        self.analyze_stmts(&func.body);
        self.symbols.exit_scope();
    }

    fn analyze_block(&mut self, body: &[Stmt]) {
        self.symbols.enter_scope();
        self.analyze_stmts(body);
        self.symbols.exit_scope();
    }

    fn analyze_stmts(&mut self, body: &[Stmt]) {
        for stmt in body.iter() {
            self.analyze_stmt(stmt);
        }
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl(var) => self.analyze_var_decl(var),
            StmtKind::Assign(expr)
            | StmtKind::Read(expr)
            | StmtKind::Write(expr)
            | StmtKind::PostInc(expr)
            | StmtKind::PostDec(expr)
            | StmtKind::Call(expr) => self.analyze_expr(expr),
            StmtKind::If { cond, body } | StmtKind::While { cond, body } => {
                self.analyze_expr(cond);
                self.analyze_block(body);
            }
            StmtKind::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                self.analyze_expr(cond);
                self.analyze_block(then_body);
                self.analyze_block(else_body);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.analyze_expr(value);
                }
            }
        }
    }

    fn resolve(&mut self, ident: &Ident) {
        match self.symbols.lookup(&ident.name) {
            Some(id) => {
                self.bindings.insert(ident.id, id);
            }
            None => self.sink.report(
                ErrorImpl::UndeclaredIdentifier {
                    name: ident.name.clone(),
                },
                ident.pos,
            ),
        }
    }

    fn analyze_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Id(ident) => self.resolve(ident),
            ExprKind::Index { base, offset } => {
                self.analyze_expr(base);
                self.analyze_expr(offset);
            }
            ExprKind::Assign { dst, src } => {
                self.analyze_expr(dst);
                self.analyze_expr(src);
            }
            ExprKind::Call { callee, args } => {
                self.resolve(callee);
                for arg in args.iter() {
                    self.analyze_expr(arg);
                }
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                self.analyze_expr(lhs);
                self.analyze_expr(rhs);
            }
            ExprKind::Unary { operand, .. } => self.analyze_expr(operand),
            ExprKind::IntLit(_)
            | ExprKind::StrLit(_)
            | ExprKind::True
            | ExprKind::False
            | ExprKind::Havoc => {}
        }
    }
}

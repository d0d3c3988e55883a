use crate::{
    ast::{
        ast::{Decl, Ident, NodeId, Program, VarDecl},
        expressions::Expr,
        statements::{FnDecl, Stmt, StmtKind},
    },
    errors::errors::{DiagnosticSink, Error, ErrorImpl, Failure, InternalError},
    name_analysis::name_analysis::NameAnalysis,
    types::types::{Type, TypeInterner},
    Config,
};

use super::node_types::NodeTypes;

/// The function whose body is being checked.
///
/// Passed by value into every statement rule, so leaving a function body
/// restores whatever context the caller had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FnContext {
    pub fn_type: Type,
    pub ret: Type,
}

/// Result of a completed type checking run.
#[derive(Debug)]
pub struct TypeAnalysis {
    name_analysis: NameAnalysis,
    node_types: NodeTypes,
    sink: DiagnosticSink,
}

impl TypeAnalysis {
    /// Type checks a resolved program, failing if any diagnostic was reported.
    pub fn build(name_analysis: NameAnalysis) -> Result<TypeAnalysis, Failure> {
        Self::build_with_config(name_analysis, &Config::default())
    }

    #[tracing::instrument(skip_all)]
    pub fn build_with_config(
        name_analysis: NameAnalysis,
        config: &Config,
    ) -> Result<TypeAnalysis, Failure> {
        let analysis = Self::run(name_analysis, config)?;
        if analysis.has_error() {
            return Err(Failure::Rejected(analysis.sink.into_diagnostics()));
        }
        Ok(analysis)
    }

    /// Type checks the whole program and returns the annotations even when
    /// diagnostics were reported. Only a checker defect aborts the run.
    pub fn run(mut name_analysis: NameAnalysis, config: &Config) -> Result<TypeAnalysis, InternalError> {
        // String literals are the only shape the walk needs that name
        // analysis may not have interned.
        let string_type = name_analysis.types_mut().array(Type::BYTE, 1);

        let (node_types, sink) = {
            let mut checker = TypeChecker::new(&name_analysis, string_type, config);
            checker.check_program(name_analysis.program())?;
            (checker.node_types, checker.sink)
        };

        tracing::debug!(
            nodes = node_types.len(),
            diagnostics = sink.total(),
            "type analysis finished"
        );

        Ok(TypeAnalysis {
            name_analysis,
            node_types,
            sink,
        })
    }

    pub fn has_error(&self) -> bool {
        self.sink.has_error()
    }

    pub fn diagnostics(&self) -> &[Error] {
        self.sink.diagnostics()
    }

    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    pub fn node_type(&self, node: NodeId) -> Result<Type, InternalError> {
        self.node_types.get(node)
    }

    pub fn node_types(&self) -> &NodeTypes {
        &self.node_types
    }

    pub fn types(&self) -> &TypeInterner {
        self.name_analysis.types()
    }

    pub fn program(&self) -> &Program {
        self.name_analysis.program()
    }

    pub fn name_analysis(&self) -> &NameAnalysis {
        &self.name_analysis
    }
}

/// Tree walker holding the state of one run.
pub struct TypeChecker<'a> {
    pub(super) names: &'a NameAnalysis,
    pub(super) node_types: NodeTypes,
    pub(super) sink: DiagnosticSink,
    pub(super) string_type: Type,
}

impl<'a> TypeChecker<'a> {
    pub fn new(names: &'a NameAnalysis, string_type: Type, config: &Config) -> Self {
        TypeChecker {
            names,
            node_types: NodeTypes::new(),
            sink: DiagnosticSink::with_limit(config.error_limit),
            string_type,
        }
    }

    pub(super) fn types(&self) -> &'a TypeInterner {
        self.names.types()
    }

    pub(super) fn record(&mut self, node: NodeId, ty: Type) -> Result<Type, InternalError> {
        tracing::trace!(%node, ty = %self.types().display(ty), "node type");
        self.node_types.set(node, ty)?;
        Ok(ty)
    }

    /// Reports `error` at `expr` and yields the poison type.
    pub(super) fn report(&mut self, error: ErrorImpl, expr: &Expr) -> Type {
        self.sink.report(error, expr.pos);
        Type::ERROR
    }

    pub(super) fn display(&self, ty: Type) -> String {
        self.types().display(ty).to_string()
    }

    /// Declared type of the symbol an identifier is bound to.
    pub(super) fn symbol_type(&self, ident: &Ident) -> Result<Type, InternalError> {
        self.names
            .symbol_of(ident.id)
            .map(|symbol| symbol.get_data_type())
            .ok_or_else(|| InternalError::UnresolvedIdentifier {
                name: ident.name.clone(),
                node: ident.id,
            })
    }

    pub fn check_program(&mut self, program: &Program) -> Result<(), InternalError> {
        for global in program.globals.iter() {
            match global {
                Decl::Var(var) => self.check_var_decl(var)?,
                Decl::Fn(func) => self.check_fn_decl(func)?,
            };
        }

        // Never inspected; callers look at the sink.
        self.record(program.id, Type::VOID)?;
        Ok(())
    }

    fn check_var_decl(&mut self, var: &VarDecl) -> Result<Type, InternalError> {
        self.record(var.id, Type::VOID)
    }

    fn check_fn_decl(&mut self, func: &FnDecl) -> Result<Type, InternalError> {
        let fn_type = self.symbol_type(&func.name)?;
        let ret = self
            .types()
            .as_function(fn_type)
            .map(|(_, ret)| ret)
            .unwrap_or(Type::ERROR);
        let context = FnContext { fn_type, ret };

        tracing::debug!(
            function = %func.name.name,
            signature = %self.types().display(context.fn_type),
            "entering function"
        );

        for formal in func.formals.iter() {
            self.check_var_decl(formal)?;
        }
        self.check_stmts(&func.body, context)?;

        tracing::debug!(function = %func.name.name, "leaving function");
        self.record(func.id, Type::VOID)
    }

    fn check_stmts(&mut self, body: &[Stmt], context: FnContext) -> Result<(), InternalError> {
        for stmt in body.iter() {
            self.check_stmt(stmt, context)?;
        }
        Ok(())
    }

    /// `Ok(true)` when the condition is usable, including when it already
    /// failed and was reported.
    fn check_condition(&mut self, cond: &Expr, error: ErrorImpl) -> Result<bool, InternalError> {
        let ty = self.check_expr(cond)?;
        if ty.is_bool() || ty.is_error() {
            return Ok(true);
        }
        self.report(error, cond);
        Ok(false)
    }

    pub fn check_stmt(&mut self, stmt: &Stmt, context: FnContext) -> Result<Type, InternalError> {
        let ty = match &stmt.kind {
            StmtKind::VarDecl(var) => {
                self.check_var_decl(var)?;
                Type::VOID
            }
            StmtKind::Assign(assign) => {
                let ty = self.check_expr(assign)?;
                if ty.as_error().is_some() {
                    Type::ERROR
                } else {
                    Type::VOID
                }
            }
            StmtKind::Read(dst) => {
                let ty = self.check_expr(dst)?;
                if ty.is_error() {
                    Type::ERROR
                } else if self.types().is_function(ty) {
                    self.report(ErrorImpl::ReadFn, dst)
                } else {
                    Type::VOID
                }
            }
            StmtKind::Write(src) => {
                let ty = self.check_expr(src)?;
                if ty.is_error() {
                    Type::ERROR
                } else if self.types().is_function(ty) {
                    self.report(ErrorImpl::WriteFn, src)
                } else if ty.is_void() {
                    self.report(ErrorImpl::WriteVoid, src)
                } else if self.types().is_array(ty) {
                    self.report(ErrorImpl::WriteArray, src)
                } else {
                    Type::VOID
                }
            }
            StmtKind::PostInc(operand) | StmtKind::PostDec(operand) => {
                let ty = self.check_expr(operand)?;
                if ty.is_error() {
                    Type::ERROR
                } else if !ty.is_int() {
                    self.report(ErrorImpl::MathOperand, operand)
                } else {
                    Type::VOID
                }
            }
            StmtKind::If { cond, body } => {
                let valid = self.check_condition(cond, ErrorImpl::IfCondition)?;
                self.check_stmts(body, context)?;
                if valid {
                    Type::VOID
                } else {
                    Type::ERROR
                }
            }
            StmtKind::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                let valid = self.check_condition(cond, ErrorImpl::IfCondition)?;
                self.check_stmts(then_body, context)?;
                self.check_stmts(else_body, context)?;
                if valid {
                    Type::VOID
                } else {
                    Type::ERROR
                }
            }
            StmtKind::While { cond, body } => {
                let valid = self.check_condition(cond, ErrorImpl::WhileCondition)?;
                self.check_stmts(body, context)?;
                if valid {
                    Type::VOID
                } else {
                    Type::ERROR
                }
            }
            StmtKind::Return(value) => self.check_return(stmt, value.as_ref(), context)?,
            StmtKind::Call(call) => {
                self.check_expr(call)?;
                Type::VOID
            }
        };

        self.record(stmt.id, ty)
    }

    fn check_return(
        &mut self,
        stmt: &Stmt,
        value: Option<&Expr>,
        context: FnContext,
    ) -> Result<Type, InternalError> {
        let expected = context.ret;

        match value {
            Some(value) if !expected.is_void() => {
                let ty = self.check_expr(value)?;
                if ty.is_error() || expected.is_error() {
                    Ok(Type::ERROR)
                } else if ty == expected {
                    Ok(ty)
                } else {
                    let error = ErrorImpl::BadReturn {
                        expected: self.display(expected),
                        received: self.display(ty),
                    };
                    Ok(self.report(error, value))
                }
            }
            Some(value) => {
                let ty = self.check_expr(value)?;
                if !ty.is_error() {
                    self.report(ErrorImpl::ExtraReturnValue, value);
                }
                Ok(Type::ERROR)
            }
            None if expected.is_void() => Ok(Type::VOID),
            None => {
                if !expected.is_error() {
                    self.sink.report(ErrorImpl::EmptyReturn, stmt.pos);
                }
                Ok(Type::ERROR)
            }
        }
    }
}

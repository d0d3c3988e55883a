use thiserror::Error;

use crate::{ast::ast::NodeId, Position};

/// A user-facing diagnostic: what went wrong and where.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{position} ***ERROR*** {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::MultipleDeclaration { .. } => "MultipleDeclaration",
            ErrorImpl::BadVariableType { .. } => "BadVariableType",
            ErrorImpl::BadReturnType { .. } => "BadReturnType",
            ErrorImpl::ReadFn => "ReadFn",
            ErrorImpl::WriteFn => "WriteFn",
            ErrorImpl::WriteVoid => "WriteVoid",
            ErrorImpl::WriteArray => "WriteArray",
            ErrorImpl::MathOperand => "MathOperand",
            ErrorImpl::LogicOperand => "LogicOperand",
            ErrorImpl::EqualityOperand => "EqualityOperand",
            ErrorImpl::EqualityOperator { .. } => "EqualityOperator",
            ErrorImpl::RelationalOperand => "RelationalOperand",
            ErrorImpl::ArrayIndex => "ArrayIndex",
            ErrorImpl::NonArrayIndexed { .. } => "NonArrayIndexed",
            ErrorImpl::AssignOperands { .. } => "AssignOperands",
            ErrorImpl::IfCondition => "IfCondition",
            ErrorImpl::WhileCondition => "WhileCondition",
            ErrorImpl::BadReturn { .. } => "BadReturn",
            ErrorImpl::ExtraReturnValue => "ExtraReturnValue",
            ErrorImpl::EmptyReturn => "EmptyReturn",
            ErrorImpl::CallNonFunction { .. } => "CallNonFunction",
            ErrorImpl::ArgumentCount { .. } => "ArgumentCount",
            ErrorImpl::ArgumentType { .. } => "ArgumentType",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    // Name analysis
    #[error("undeclared identifier `{name}`")]
    UndeclaredIdentifier { name: String },
    #[error("multiply declared identifier `{name}`")]
    MultipleDeclaration { name: String },
    #[error("invalid type `{ty}` in declaration of `{name}`")]
    BadVariableType { name: String, ty: String },
    #[error("invalid return type `{ty}` for function `{name}`")]
    BadReturnType { name: String, ty: String },

    // Type analysis
    #[error("attempt to read into a function")]
    ReadFn,
    #[error("attempt to write a function")]
    WriteFn,
    #[error("attempt to write void")]
    WriteVoid,
    #[error("attempt to write an array")]
    WriteArray,
    #[error("arithmetic operator applied to invalid operand")]
    MathOperand,
    #[error("logical operator applied to non-bool operand")]
    LogicOperand,
    #[error("invalid equality operand")]
    EqualityOperand,
    #[error("invalid equality operation: `{lhs}` compared with `{rhs}`")]
    EqualityOperator { lhs: String, rhs: String },
    #[error("relational operator applied to non-numeric operand")]
    RelationalOperand,
    #[error("non-integer expression used as an array index")]
    ArrayIndex,
    #[error("attempt to index a value of non-array type `{ty}`")]
    NonArrayIndexed { ty: String },
    #[error("invalid assignment operands: cannot assign `{src}` to `{dst}`")]
    AssignOperands { dst: String, src: String },
    #[error("non-bool expression used as an if condition")]
    IfCondition,
    #[error("non-bool expression used as a while condition")]
    WhileCondition,
    #[error("bad return value: expected `{expected}`, received `{received}`")]
    BadReturn { expected: String, received: String },
    #[error("return with a value in a void function")]
    ExtraReturnValue,
    #[error("missing return value")]
    EmptyReturn,
    #[error("attempt to call a non-function `{name}`")]
    CallNonFunction { name: String },
    #[error("function call with wrong number of arguments: expected {expected}, received {received}")]
    ArgumentCount { expected: usize, received: usize },
    #[error("type of actual `{received}` does not match type of formal `{expected}`")]
    ArgumentType { expected: String, received: String },
}

/// Collects diagnostics for one run of a pass.
///
/// `has_error` is set on the first report and never cleared. With an error
/// limit, reports past the limit still set the flag but are only counted.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Error>,
    has_error: bool,
    error_limit: Option<usize>,
    suppressed: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(error_limit: Option<usize>) -> Self {
        DiagnosticSink {
            error_limit,
            ..Self::default()
        }
    }

    pub fn report(&mut self, error_impl: ErrorImpl, position: Position) {
        let error = Error::new(error_impl, position);
        tracing::debug!(
            line = position.line(),
            col = position.col(),
            kind = error.get_error_name(),
            "{}",
            error.kind()
        );

        self.has_error = true;
        match self.error_limit {
            Some(limit) if self.diagnostics.len() >= limit => self.suppressed += 1,
            _ => self.diagnostics.push(error),
        }
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Reports dropped because the error limit was reached.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Total number of reports, stored or not.
    pub fn total(&self) -> usize {
        self.diagnostics.len() + self.suppressed
    }

    pub fn into_diagnostics(self) -> Vec<Error> {
        self.diagnostics
    }
}

/// A broken checker invariant. Never caused by the input program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error("type of node {0} queried before it was checked")]
    UnsetNodeType(NodeId),
    #[error("type of node {0} assigned twice")]
    NodeTypeAlreadySet(NodeId),
    #[error("identifier `{name}` ({node}) has no resolved symbol")]
    UnresolvedIdentifier { name: String, node: NodeId },
}

/// Why a pass produced no result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    #[error("semantic analysis failed with {} diagnostic(s)", .0.len())]
    Rejected(Vec<Error>),
    #[error("internal checker error: {0}")]
    Internal(#[from] InternalError),
}

impl Failure {
    /// Diagnostics of a rejected program; empty for internal errors.
    pub fn diagnostics(&self) -> &[Error] {
        match self {
            Failure::Rejected(diagnostics) => diagnostics,
            Failure::Internal(_) => &[],
        }
    }
}

use crate::{
    ast::{
        ast::Ident,
        expressions::{BinaryOp, Expr, ExprKind, OperatorFamily, UnaryOp},
    },
    errors::errors::{ErrorImpl, InternalError},
    types::types::Type,
};

use super::type_checker::TypeChecker;

impl TypeChecker<'_> {
    pub fn check_expr(&mut self, expr: &Expr) -> Result<Type, InternalError> {
        let ty = match &expr.kind {
            ExprKind::Id(ident) => {
                let ty = self.symbol_type(ident)?;
                self.record(ident.id, ty)?
            }
            ExprKind::Index { base, offset } => self.check_index(base, offset)?,
            ExprKind::Assign { dst, src } => {
                let dst_type = self.check_expr(dst)?;
                let src_type = self.check_expr(src)?;

                if dst_type.is_error() || src_type.is_error() {
                    Type::ERROR
                } else if dst_type == src_type && !self.types().is_function(dst_type) {
                    dst_type
                } else {
                    let error = ErrorImpl::AssignOperands {
                        dst: self.display(dst_type),
                        src: self.display(src_type),
                    };
                    self.report(error, expr)
                }
            }
            ExprKind::Call { callee, args } => self.check_call(expr, callee, args)?,
            ExprKind::Binary { op, lhs, rhs } => self.check_binary(expr, *op, lhs, rhs)?,
            ExprKind::Unary { op, operand } => {
                let ty = self.check_expr(operand)?;
                let (valid, error) = match op {
                    UnaryOp::Neg => (ty.is_int(), ErrorImpl::MathOperand),
                    UnaryOp::Not => (ty.is_bool(), ErrorImpl::LogicOperand),
                };

                if ty.is_error() || valid {
                    ty
                } else {
                    self.report(error, operand)
                }
            }
            ExprKind::IntLit(_) => Type::INT,
            ExprKind::StrLit(_) => self.string_type,
            ExprKind::True | ExprKind::False | ExprKind::Havoc => Type::BOOL,
        };

        self.record(expr.id, ty)
    }

    fn check_index(&mut self, base: &Expr, offset: &Expr) -> Result<Type, InternalError> {
        let base_type = self.check_expr(base)?;
        let offset_type = self.check_expr(offset)?;

        if base_type.is_error() || offset_type.is_error() {
            return Ok(Type::ERROR);
        }
        if !offset_type.is_int() {
            return Ok(self.report(ErrorImpl::ArrayIndex, offset));
        }

        match self.types().as_array(base_type) {
            Some((elem, _)) => Ok(elem),
            None => {
                let error = ErrorImpl::NonArrayIndexed {
                    ty: self.display(base_type),
                };
                Ok(self.report(error, base))
            }
        }
    }

    fn check_call(
        &mut self,
        call: &Expr,
        callee: &Ident,
        args: &[Expr],
    ) -> Result<Type, InternalError> {
        let callee_type = self.symbol_type(callee)?;
        self.record(callee.id, callee_type)?;

        let mut actuals = Vec::with_capacity(args.len());
        for arg in args.iter() {
            actuals.push(self.check_expr(arg)?);
        }

        if callee_type.is_error() {
            return Ok(Type::ERROR);
        }
        let Some((formals, ret)) = self.types().as_function(callee_type) else {
            self.sink.report(
                ErrorImpl::CallNonFunction {
                    name: callee.name.clone(),
                },
                callee.pos,
            );
            return Ok(Type::ERROR);
        };

        if formals.len() != actuals.len() {
            let error = ErrorImpl::ArgumentCount {
                expected: formals.len(),
                received: actuals.len(),
            };
            return Ok(self.report(error, call));
        }

        let mut failed = false;
        for ((arg, actual), formal) in args.iter().zip(actuals).zip(formals.iter().copied()) {
            if actual.is_error() || formal.is_error() {
                failed = true;
            } else if actual != formal {
                let error = ErrorImpl::ArgumentType {
                    expected: self.display(formal),
                    received: self.display(actual),
                };
                self.report(error, arg);
                failed = true;
            }
        }

        Ok(if failed { Type::ERROR } else { ret })
    }

    /// Checks one operand of a binary operator.
    ///
    /// `None` means the operand is unusable: either it already carried the
    /// error type, or the operator family does not admit it and the family's
    /// operand diagnostic was reported at it.
    fn check_operand(
        &mut self,
        operand: &Expr,
        family: OperatorFamily,
    ) -> Result<Option<Type>, InternalError> {
        let ty = self.check_expr(operand)?;
        if ty.is_error() {
            return Ok(None);
        }
        if !admits(family, ty) {
            self.report(operand_error(family), operand);
            return Ok(None);
        }
        Ok(Some(ty))
    }

    fn check_binary(
        &mut self,
        expr: &Expr,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<Type, InternalError> {
        let family = op.family();
        let lhs_type = self.check_operand(lhs, family)?;
        let rhs_type = self.check_operand(rhs, family)?;
        let (Some(lhs_type), Some(rhs_type)) = (lhs_type, rhs_type) else {
            return Ok(Type::ERROR);
        };

        let ty = match family {
            // Byte widens to int when mixed with it.
            OperatorFamily::Arithmetic => {
                if lhs_type.is_int() || rhs_type.is_int() {
                    Type::INT
                } else {
                    Type::BYTE
                }
            }
            OperatorFamily::Logical | OperatorFamily::Relational => Type::BOOL,
            OperatorFamily::Equality => {
                if lhs_type == rhs_type {
                    Type::BOOL
                } else {
                    let error = ErrorImpl::EqualityOperator {
                        lhs: self.display(lhs_type),
                        rhs: self.display(rhs_type),
                    };
                    self.report(error, expr)
                }
            }
        };
        Ok(ty)
    }
}

/// Operand types an operator family accepts.
fn admits(family: OperatorFamily, ty: Type) -> bool {
    match family {
        OperatorFamily::Arithmetic | OperatorFamily::Relational => ty.is_numeric(),
        OperatorFamily::Logical => ty.is_bool(),
        OperatorFamily::Equality => ty.is_bool() || ty.is_numeric(),
    }
}

fn operand_error(family: OperatorFamily) -> ErrorImpl {
    match family {
        OperatorFamily::Arithmetic => ErrorImpl::MathOperand,
        OperatorFamily::Logical => ErrorImpl::LogicOperand,
        OperatorFamily::Equality => ErrorImpl::EqualityOperand,
        OperatorFamily::Relational => ErrorImpl::RelationalOperand,
    }
}

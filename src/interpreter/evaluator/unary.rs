use std::rc::Rc;

use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a unary operation.
    ///
    /// Negation applies to rationals, complex numbers and, entry-wise, to
    /// matrices.
    ///
    /// # Errors
    /// `Type` when negating a function or builtin.
    pub fn eval_unary(op: UnaryOperator, operand: &Value) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match operand {
                Value::Rational(r) => Ok(Value::Rational(-r)),
                Value::Complex(c) => Ok(Value::Complex(-c)),
                Value::Matrix(m) => Ok(Value::Matrix(Rc::new(m.neg()))),
                other => Err(RuntimeError::type_error(format!("cannot negate a {}",
                                                              other.type_name()))),
            },
        }
    }
}

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Applies `+ - * /` to two scalars.
    ///
    /// Two rationals stay rational. If either side is complex, both are
    /// promoted and the result is demoted back to a rational when its
    /// imaginary part cancels.
    ///
    /// # Errors
    /// - `ZeroDivision` when dividing by zero.
    /// - `Type` if either operand is not a scalar.
    pub(crate) fn eval_scalar_op(op: BinaryOperator,
                                 left: &Value,
                                 right: &Value)
                                 -> EvalResult<Value> {
        if let (Value::Rational(a), Value::Rational(b)) = (left, right) {
            return Ok(Value::Rational(match op {
                                          BinaryOperator::Add => a + b,
                                          BinaryOperator::Sub => a - b,
                                          BinaryOperator::Mul => a * b,
                                          BinaryOperator::Div => a.checked_div(b)?,
                                          _ => return Err(unsupported(op, left, right)),
                                      }));
        }

        let (Some(a), Some(b)) = (left.to_complex(), right.to_complex()) else {
            return Err(unsupported(op, left, right));
        };

        let result = match op {
            BinaryOperator::Add => &a + &b,
            BinaryOperator::Sub => &a - &b,
            BinaryOperator::Mul => &a * &b,
            BinaryOperator::Div => a.checked_div(&b)?,
            _ => return Err(unsupported(op, left, right)),
        };
        Ok(result.demote())
    }
}

pub(super) fn unsupported(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::type_error(format!("unsupported operand types for {op}: {} and {}",
                                     left.type_name(),
                                     right.type_name()))
}

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::scalar::unsupported,
            core::{EvalResult, Evaluator},
        },
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a binary operation between two values.
    ///
    /// Routes the operation by operator and operand types:
    /// - `+ - * /` between scalars go to `eval_scalar_op`;
    /// - any operand being a matrix routes `+ - * /` to `eval_matrix_op`;
    /// - `%` is defined for rationals only;
    /// - `^` goes to `eval_pow`;
    /// - `**` goes to `eval_matmul`.
    ///
    /// Functions and builtins are never valid operands.
    ///
    /// # Example
    /// ```
    /// use computor::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         evaluator::core::Evaluator,
    ///         value::{core::Value, rational::Rational},
    ///     },
    /// };
    ///
    /// let left = Value::Rational(Rational::from(7));
    /// let right = Value::Rational(Rational::from(2));
    /// let result = Evaluator::eval_binary(BinaryOperator::Div, &left, &right).unwrap();
    /// assert_eq!(result.to_string(), "7/2");
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, MatMul, Mod, Mul, Pow, Sub};

        if !is_operand(left) || !is_operand(right) {
            return Err(unsupported(op, left, right));
        }

        match op {
            Add | Sub | Mul | Div => match (left, right) {
                (Value::Matrix(_), _) | (_, Value::Matrix(_)) => {
                    Self::eval_matrix_op(op, left, right)
                },
                _ => Self::eval_scalar_op(op, left, right),
            },
            Mod => match (left, right) {
                (Value::Rational(a), Value::Rational(b)) => Ok(Value::Rational(a.checked_rem(b)?)),
                _ => Err(RuntimeError::type_error(format!("modulo is only defined for real \
                                                           numbers, got {} and {}",
                                                          left.type_name(),
                                                          right.type_name()))),
            },
            Pow => Self::eval_pow(left, right),
            MatMul => Self::eval_matmul(left, right),
        }
    }
}

const fn is_operand(value: &Value) -> bool {
    matches!(value, Value::Rational(_) | Value::Complex(_) | Value::Matrix(_))
}

use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates `base ^ exponent`.
    ///
    /// - rational ^ rational: exact for integer exponents, a floating
    ///   approximation otherwise.
    /// - matrix ^ integer: `0` gives the identity, negative exponents raise
    ///   the inverse.
    /// - complex bases are not supported.
    ///
    /// # Errors
    /// - `Type` for complex bases, non-integer matrix exponents or other
    ///   combinations.
    /// - `ZeroDivision` for `0 ^ -n` or a negative power of a singular matrix.
    /// - `Value` for non-real results or non-square matrices.
    pub(crate) fn eval_pow(base: &Value, exponent: &Value) -> EvalResult<Value> {
        match (base, exponent) {
            (Value::Rational(b), Value::Rational(e)) => Ok(Value::Rational(b.pow(e)?)),
            (Value::Matrix(m), Value::Rational(e)) => {
                let n = e.to_i64().ok_or_else(|| {
                                      RuntimeError::type_error("matrix exponent must be an \
                                                                integer")
                                  })?;
                Ok(Value::Matrix(Rc::new(m.powi(n)?)))
            },
            (Value::Complex(_), _) => {
                Err(RuntimeError::type_error("complex power operation not supported"))
            },
            _ => Err(RuntimeError::type_error(format!("cannot raise {} to a {} power",
                                                      base.type_name(),
                                                      exponent.type_name()))),
        }
    }
}

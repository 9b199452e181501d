use std::rc::Rc;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::scalar::unsupported,
            core::{EvalResult, Evaluator},
        },
        value::{core::Value, matrix::Matrix},
    },
};

impl Evaluator {
    /// Applies `+ - * /` where at least one operand is a matrix.
    ///
    /// - `A + B`, `A - B`: entry-wise, shapes must match.
    /// - `A * B`: entry-wise when the shapes are identical; otherwise a true
    ///   matrix product when the inner dimensions agree and either side is a
    ///   row or column vector.
    /// - `A * r`, `r * A`: scales every entry.
    /// - `A / r`: scales by the reciprocal.
    ///
    /// # Errors
    /// - `Value` on incompatible shapes.
    /// - `Type` for complex scalars or unsupported combinations.
    /// - `ZeroDivision` for `A / 0`.
    pub(crate) fn eval_matrix_op(op: BinaryOperator,
                                 left: &Value,
                                 right: &Value)
                                 -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        let result = match (op, left, right) {
            (Add, Value::Matrix(a), Value::Matrix(b)) => a.add(b)?,
            (Sub, Value::Matrix(a), Value::Matrix(b)) => a.sub(b)?,
            (Mul, Value::Matrix(a), Value::Matrix(b)) => multiply_matrices(a, b)?,
            (Mul, Value::Matrix(m), Value::Rational(r))
            | (Mul, Value::Rational(r), Value::Matrix(m)) => m.scale(r),
            (Div, Value::Matrix(m), Value::Rational(r)) => m.scale(&r.recip()?),
            _ => return Err(unsupported(op, left, right)),
        };
        Ok(Value::Matrix(Rc::new(result)))
    }

    /// Evaluates `A ** B`, the matrix product.
    ///
    /// # Errors
    /// - `Type` unless both operands are matrices.
    /// - `Value` if the inner dimensions differ.
    pub(crate) fn eval_matmul(left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Matrix(a), Value::Matrix(b)) => Ok(Value::Matrix(Rc::new(a.matmul(b)?))),
            _ => Err(RuntimeError::type_error(format!("matrix multiplication '**' requires two \
                                                       matrices, got {} and {}",
                                                      left.type_name(),
                                                      right.type_name()))),
        }
    }
}

fn multiply_matrices(a: &Matrix, b: &Matrix) -> EvalResult<Matrix> {
    if a.same_shape(b) {
        return a.hadamard(b);
    }
    if a.ncols() == b.nrows() && (a.is_vector() || b.is_vector()) {
        return a.matmul(b);
    }
    Err(RuntimeError::value(format!("matrix dimensions must match for element-wise \
                                     multiplication ({}x{} and {}x{}); use '**' for the matrix \
                                     product",
                                    a.nrows(),
                                    a.ncols(),
                                    b.nrows(),
                                    b.ncols())))
}

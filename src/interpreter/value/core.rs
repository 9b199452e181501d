use std::{fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Builtin},
        value::{complex::Complex, function::Function, matrix::Matrix, rational::Rational},
    },
};

/// Represents a runtime value in the interpreter.
///
/// Values are immutable; every operation builds a new one. Matrices and
/// functions sit behind `Rc` so copying an environment for a function call
/// does not deep-copy them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An exact rational number.
    Rational(Rational),
    /// A complex number with a non-zero imaginary part.
    Complex(Complex),
    /// A rational matrix.
    Matrix(Rc<Matrix>),
    /// A user-defined function.
    Function(Rc<Function>),
    /// An entry of the builtin function table.
    Builtin(Builtin),
}

impl From<Rational> for Value {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        c.demote()
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Self::Matrix(Rc::new(m))
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(Rc::new(f))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(r) => write!(f, "{r}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Matrix(m) => write!(f, "{m}"),
            Self::Function(func) => write!(f, "{func}"),
            Self::Builtin(b) => write!(f, "<builtin {}>", b.name()),
        }
    }
}

impl Value {
    /// Returns a short lowercase name of the value's type for error messages.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::{core::Value, rational::Rational};
    ///
    /// assert_eq!(Value::Rational(Rational::from(1)).type_name(), "rational");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Rational(_) => "rational",
            Self::Complex(_) => "complex",
            Self::Matrix(_) => "matrix",
            Self::Function(_) => "function",
            Self::Builtin(_) => "builtin",
        }
    }

    /// Borrows the rational, or fails with a `TypeError` naming `context`.
    pub fn as_rational(&self, context: &str) -> EvalResult<&Rational> {
        match self {
            Self::Rational(r) => Ok(r),
            other => Err(RuntimeError::type_error(format!("{context} expects a real number, got \
                                                           {}",
                                                          other.type_name()))),
        }
    }

    /// Promotes a scalar to `Complex`; `None` for matrices and callables.
    #[must_use]
    pub fn to_complex(&self) -> Option<Complex> {
        match self {
            Self::Rational(r) => Some(Complex::from(r.clone())),
            Self::Complex(c) => Some(c.clone()),
            _ => None,
        }
    }
}

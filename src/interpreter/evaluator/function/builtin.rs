use std::rc::Rc;

use num_complex::Complex64;

use crate::{
    config::AngleMode,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{complex::Complex, core::Value, rational::Rational},
    },
};

fn not_a_number(name: &str, arg: &Value) -> RuntimeError {
    RuntimeError::type_error(format!("{name}() expects a number, got {}", arg.type_name()))
}

/// Wraps a floating-point complex result, demoting it when the imaginary part
/// is zero.
fn from_c64(name: &str, value: Complex64) -> EvalResult<Value> {
    if !value.re.is_finite() || !value.im.is_finite() {
        return Err(RuntimeError::value(format!("{name}() result is not a finite number")));
    }
    Ok(Complex::from_c64(value)?.demote())
}

fn from_f64(name: &str, value: f64) -> EvalResult<Value> {
    if !value.is_finite() {
        return Err(RuntimeError::value(format!("{name}() result is not a finite number")));
    }
    Ok(Value::Rational(Rational::from_f64(value)?))
}

/// Shared path of the trigonometric builtins.
///
/// Degrees are converted only for purely real operands; complex operands are
/// always radians.
fn trig(name: &str,
        arg: &Value,
        mode: AngleMode,
        real: fn(f64) -> f64,
        complex: fn(Complex64) -> Complex64)
        -> EvalResult<Value> {
    match arg {
        Value::Rational(r) => {
            let x = match mode {
                AngleMode::Radians => r.to_f64(),
                AngleMode::Degrees => r.to_f64().to_radians(),
            };
            from_f64(name, real(x))
        },
        Value::Complex(c) => from_c64(name, complex(c.to_c64())),
        other => Err(not_a_number(name, other)),
    }
}

/// Sine; honours the angle mode for real operands.
pub fn sin(arg: &Value, mode: AngleMode) -> EvalResult<Value> {
    trig("sin", arg, mode, f64::sin, Complex64::sin)
}

/// Cosine; honours the angle mode for real operands.
pub fn cos(arg: &Value, mode: AngleMode) -> EvalResult<Value> {
    trig("cos", arg, mode, f64::cos, Complex64::cos)
}

/// Tangent; honours the angle mode for real operands.
pub fn tan(arg: &Value, mode: AngleMode) -> EvalResult<Value> {
    trig("tan", arg, mode, f64::tan, Complex64::tan)
}

/// Natural exponential.
pub fn exp(arg: &Value, _: AngleMode) -> EvalResult<Value> {
    match arg {
        Value::Rational(r) => from_f64("exp", r.to_f64().exp()),
        Value::Complex(c) => from_c64("exp", c.to_c64().exp()),
        other => Err(not_a_number("exp", other)),
    }
}

/// Natural logarithm. Negative reals yield the principal complex logarithm.
///
/// # Errors
/// `Value` for `log(0)`.
pub fn log(arg: &Value, _: AngleMode) -> EvalResult<Value> {
    match arg {
        Value::Rational(r) if r.is_zero() => {
            Err(RuntimeError::value("log() of zero is undefined"))
        },
        Value::Rational(r) if r.is_negative() => {
            from_c64("log", Complex::from(r.clone()).to_c64().ln())
        },
        Value::Rational(r) => from_f64("log", r.to_f64().ln()),
        Value::Complex(c) => from_c64("log", c.to_c64().ln()),
        other => Err(not_a_number("log", other)),
    }
}

/// Square root. Exact for perfect squares; negative reals give an imaginary
/// result.
pub fn sqrt(arg: &Value, _: AngleMode) -> EvalResult<Value> {
    match arg {
        Value::Rational(r) => {
            let root = magnitude(&r.abs())?;
            if r.is_negative() {
                Ok(Value::Complex(Complex::new(Rational::zero(), root)))
            } else {
                Ok(Value::Rational(root))
            }
        },
        Value::Complex(c) => from_c64("sqrt", c.to_c64().sqrt()),
        other => Err(not_a_number("sqrt", other)),
    }
}

/// Square root of a value known to be non-negative.
fn magnitude(squared: &Rational) -> EvalResult<Rational> {
    squared.sqrt()
           .unwrap_or_else(|| Err(RuntimeError::value("square root of a negative magnitude")))
}

/// Magnitude of a scalar, Frobenius norm of a matrix.
pub fn norm(arg: &Value, _: AngleMode) -> EvalResult<Value> {
    match arg {
        Value::Rational(r) => Ok(Value::Rational(r.abs())),
        Value::Complex(c) => Ok(Value::Rational(magnitude(&c.norm_sqr())?)),
        Value::Matrix(m) => Ok(Value::Rational(magnitude(&m.frobenius_sqr())?)),
        other => Err(RuntimeError::type_error(format!("norm() expects a number or matrix, got {}",
                                                      other.type_name()))),
    }
}

/// Absolute value; entry-wise on matrices.
pub fn abs(arg: &Value, mode: AngleMode) -> EvalResult<Value> {
    match arg {
        Value::Matrix(m) => Ok(Value::Matrix(Rc::new(m.try_map(|x| Ok(x.abs()))?))),
        other => norm(other, mode),
    }
}

/// Reciprocal of a scalar, exact inverse of a matrix.
///
/// # Errors
/// `ZeroDivision` for zero or a singular matrix.
pub fn inv(arg: &Value, _: AngleMode) -> EvalResult<Value> {
    match arg {
        Value::Rational(r) => Ok(Value::Rational(r.recip()?)),
        Value::Complex(c) => Ok(c.recip()?.demote()),
        Value::Matrix(m) => Ok(Value::Matrix(Rc::new(m.inverse()?))),
        other => Err(RuntimeError::type_error(format!("inv() expects a number or matrix, got {}",
                                                      other.type_name()))),
    }
}

/// `floor` and `ceil`; real operands only.
pub fn round(name: &str, arg: &Value) -> EvalResult<Value> {
    let r = arg.as_rational(&format!("{name}()"))?;
    match name {
        "floor" => Ok(Value::Rational(r.floor())),
        _ => Ok(Value::Rational(r.ceil())),
    }
}

use std::{fmt, ops};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{exact_isqrt, exponent_to_usize, f64_to_ratio, ratio_to_f64, ratio_to_i64},
};

/// An exact rational number, always in lowest terms with a positive
/// denominator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rational(BigRational);

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }
}

impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        Self(value)
    }
}

impl Rational {
    /// Builds `numer / denom` in lowest terms.
    ///
    /// # Errors
    /// `ZeroDivision` if `denom` is zero.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::rational::Rational;
    ///
    /// let r = Rational::new(6, -4).unwrap();
    /// assert_eq!(r.to_string(), "-3/2");
    /// assert!(Rational::new(1, 0).is_err());
    /// ```
    pub fn new(numer: i64, denom: i64) -> EvalResult<Self> {
        if denom == 0 {
            return Err(RuntimeError::zero_division("rational with a zero denominator"));
        }
        Ok(Self(BigRational::new(BigInt::from(numer), BigInt::from(denom))))
    }

    /// Parses a decimal literal such as `42`, `3.` or `0.125` exactly.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::rational::Rational;
    ///
    /// assert_eq!(Rational::from_literal("1.5").unwrap().to_string(), "3/2");
    /// assert_eq!(Rational::from_literal("2.").unwrap().to_string(), "2");
    /// ```
    pub fn from_literal(literal: &str) -> EvalResult<Self> {
        let invalid = || RuntimeError::value(format!("invalid number literal '{literal}'"));

        let (int_part, frac_part) = literal.split_once('.').unwrap_or((literal, ""));
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit())
           || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let digits = format!("{int_part}{frac_part}");
        let numer = digits.parse::<BigInt>().map_err(|_| invalid())?;
        let denom = num_traits::pow(BigInt::from(10), frac_part.len());

        Ok(Self(BigRational::new(numer, denom)))
    }

    /// Wraps a floating-point result, approximating it with a denominator of
    /// at most one million.
    ///
    /// This is where exactness is lost: non-integer powers, square roots of
    /// non-squares and transcendental builtins all pass through here.
    ///
    /// # Errors
    /// `Value` if `value` is NaN or infinite.
    pub fn from_f64(value: f64) -> EvalResult<Self> {
        f64_to_ratio(value).map(Self)
                           .ok_or_else(|| RuntimeError::value(format!("result {value} is not a finite number")))
    }

    /// Returns zero.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Returns one.
    #[must_use]
    pub fn one() -> Self {
        Self(BigRational::one())
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the value is one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// Returns `true` if the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Returns `true` if the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// The value as an `i64`, if it is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        ratio_to_i64(&self.0)
    }

    /// The nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        ratio_to_f64(&self.0)
    }

    /// Borrows the underlying big rational.
    #[must_use]
    pub const fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Largest integer not greater than the value.
    #[must_use]
    pub fn floor(&self) -> Self {
        Self(self.0.floor())
    }

    /// Smallest integer not less than the value.
    #[must_use]
    pub fn ceil(&self) -> Self {
        Self(self.0.ceil())
    }

    /// Multiplicative inverse.
    ///
    /// # Errors
    /// `ZeroDivision` if the value is zero.
    pub fn recip(&self) -> EvalResult<Self> {
        if self.is_zero() {
            return Err(RuntimeError::zero_division("inverse of zero"));
        }
        Ok(Self(self.0.recip()))
    }

    /// Exact division.
    ///
    /// # Errors
    /// `ZeroDivision` if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> EvalResult<Self> {
        if other.is_zero() {
            return Err(RuntimeError::zero_division("division by zero"));
        }
        Ok(Self(&self.0 / &other.0))
    }

    /// Floored remainder: the result has the sign of the divisor.
    ///
    /// # Errors
    /// `ZeroDivision` if `other` is zero.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::rational::Rational;
    ///
    /// let r = Rational::from(-7).checked_rem(&Rational::from(3)).unwrap();
    /// assert_eq!(r, Rational::from(2));
    /// ```
    pub fn checked_rem(&self, other: &Self) -> EvalResult<Self> {
        if other.is_zero() {
            return Err(RuntimeError::zero_division("modulo by zero"));
        }
        let quotient = (&self.0 / &other.0).floor();
        Ok(Self(&self.0 - &other.0 * quotient))
    }

    /// Raises the value to an integer power exactly.
    ///
    /// Negative exponents produce the reciprocal power.
    ///
    /// # Errors
    /// - `ZeroDivision` for zero raised to a negative power.
    /// - `Value` if the exponent is too large to compute exactly.
    pub fn powi(&self, exponent: i64) -> EvalResult<Self> {
        if self.is_zero() || self.0.abs().is_one() {
            if exponent < 0 && self.is_zero() {
                return Err(RuntimeError::zero_division("zero raised to a negative power"));
            }
            if exponent == 0 {
                return Ok(Self::one());
            }
            if self.is_negative() && exponent % 2 == 0 {
                return Ok(Self::one());
            }
            return Ok(self.clone());
        }

        let magnitude = exponent_to_usize(exponent.unsigned_abs()).ok_or_else(|| {
                            RuntimeError::value(format!("exponent {exponent} is too large"))
                        })?;
        let power = num_traits::pow(self.0.clone(), magnitude);

        if exponent < 0 { Ok(Self(power.recip())) } else { Ok(Self(power)) }
    }

    /// Raises the value to a rational power.
    ///
    /// Integer exponents are exact. Other exponents go through `f64::powf`
    /// and are re-wrapped with [`Rational::from_f64`], so the result is an
    /// approximation.
    ///
    /// # Errors
    /// - `ZeroDivision` for zero raised to a negative power.
    /// - `Value` if the floating result is not a real number (for example a
    ///   fractional power of a negative base).
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::rational::Rational;
    ///
    /// let two = Rational::from(2);
    /// assert_eq!(two.pow(&Rational::from(-2)).unwrap().to_string(), "1/4");
    ///
    /// let half = Rational::from_literal("0.5").unwrap();
    /// assert_eq!(Rational::from(9).pow(&half).unwrap(), Rational::from(3));
    /// ```
    pub fn pow(&self, exponent: &Self) -> EvalResult<Self> {
        if let Some(e) = exponent.to_i64() {
            return self.powi(e);
        }
        if self.is_zero() && exponent.is_negative() {
            return Err(RuntimeError::zero_division("zero raised to a negative power"));
        }
        Self::from_f64(self.to_f64().powf(exponent.to_f64()))
    }

    /// Square root of a non-negative value.
    ///
    /// Exact when numerator and denominator are perfect squares, otherwise a
    /// floating approximation re-wrapped with [`Rational::from_f64`].
    ///
    /// # Returns
    /// `None` if the value is negative.
    #[must_use]
    pub fn sqrt(&self) -> Option<EvalResult<Self>> {
        if self.is_negative() {
            return None;
        }
        if let Some(n) = exact_isqrt(self.0.numer())
           && let Some(d) = exact_isqrt(self.0.denom())
        {
            return Some(Ok(Self(BigRational::new(n, d))));
        }
        Some(Self::from_f64(self.to_f64().sqrt()))
    }
}

macro_rules! impl_rational_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl ops::$trait<&Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational(&self.0 $op &rhs.0)
            }
        }

        impl ops::$trait for Rational {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self(self.0 $op rhs.0)
            }
        }
    };
}

impl_rational_op!(Add, add, +);
impl_rational_op!(Sub, sub, -);
impl_rational_op!(Mul, mul, *);

impl ops::Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl ops::Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

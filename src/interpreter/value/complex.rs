use std::{fmt, ops};

use num_complex::Complex64;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, rational::Rational},
    },
};

/// A complex number with exact rational components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Complex {
    /// The real part.
    pub real: Rational,
    /// The imaginary part.
    pub imag: Rational,
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imag.is_zero() {
            return write!(f, "{}", self.real);
        }

        let magnitude = self.imag.abs();
        let unit = if magnitude.is_one() { String::from("i") } else { format!("{magnitude}i") };

        if self.real.is_zero() {
            if self.imag.is_negative() {
                write!(f, "-{unit}")
            } else {
                write!(f, "{unit}")
            }
        } else if self.imag.is_negative() {
            write!(f, "{} - {unit}", self.real)
        } else {
            write!(f, "{} + {unit}", self.real)
        }
    }
}

impl From<Rational> for Complex {
    fn from(real: Rational) -> Self {
        Self { real,
               imag: Rational::zero() }
    }
}

impl Complex {
    /// Constructs a complex number from its parts.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::{complex::Complex, rational::Rational};
    ///
    /// let c = Complex::new(Rational::from(2), Rational::from(-3));
    /// assert_eq!(c.to_string(), "2 - 3i");
    /// ```
    #[must_use]
    pub const fn new(real: Rational, imag: Rational) -> Self {
        Self { real, imag }
    }

    /// The imaginary unit `i`.
    #[must_use]
    pub fn i() -> Self {
        Self::new(Rational::zero(), Rational::one())
    }

    /// Returns `true` if both parts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.real.is_zero() && self.imag.is_zero()
    }

    /// Collapses to `Value::Rational` when the imaginary part is zero.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::{complex::Complex, core::Value, rational::Rational};
    ///
    /// let real = Complex::new(Rational::from(3), Rational::zero());
    /// assert_eq!(real.demote(), Value::Rational(Rational::from(3)));
    /// ```
    #[must_use]
    pub fn demote(self) -> Value {
        if self.imag.is_zero() {
            Value::Rational(self.real)
        } else {
            Value::Complex(self)
        }
    }

    /// The complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.real.clone(), -&self.imag)
    }

    /// `re² + im²`, exact.
    #[must_use]
    pub fn norm_sqr(&self) -> Rational {
        &(&self.real * &self.real) + &(&self.imag * &self.imag)
    }

    /// Reciprocal `1/z`, computed through the conjugate.
    ///
    /// # Errors
    /// `ZeroDivision` if the value is zero.
    pub fn recip(&self) -> EvalResult<Self> {
        let denom = self.norm_sqr();
        if denom.is_zero() {
            return Err(RuntimeError::zero_division("inverse of zero"));
        }
        Ok(Self::new(self.real.checked_div(&denom)?, (-&self.imag).checked_div(&denom)?))
    }

    /// Exact division, `self * conj(other) / |other|²`.
    ///
    /// # Errors
    /// `ZeroDivision` if `other` is zero.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::{complex::Complex, rational::Rational};
    ///
    /// let a = Complex::new(Rational::from(1), Rational::from(1));
    /// let b = Complex::new(Rational::from(1), Rational::from(-1));
    /// assert_eq!(a.checked_div(&b).unwrap(), Complex::i());
    /// ```
    pub fn checked_div(&self, other: &Self) -> EvalResult<Self> {
        let denom = other.norm_sqr();
        if denom.is_zero() {
            return Err(RuntimeError::zero_division("division by zero"));
        }
        let numer = self * &other.conj();
        Ok(Self::new(numer.real.checked_div(&denom)?, numer.imag.checked_div(&denom)?))
    }

    /// Converts to a floating-point complex for the transcendental builtins.
    #[must_use]
    pub fn to_c64(&self) -> Complex64 {
        Complex64::new(self.real.to_f64(), self.imag.to_f64())
    }

    /// Wraps a floating-point complex back into exact parts.
    ///
    /// # Errors
    /// `Value` if either part is NaN or infinite.
    pub fn from_c64(value: Complex64) -> EvalResult<Self> {
        Ok(Self::new(Rational::from_f64(value.re)?, Rational::from_f64(value.im)?))
    }
}

impl ops::Add for &Complex {
    type Output = Complex;

    fn add(self, rhs: Self) -> Complex {
        Complex::new(&self.real + &rhs.real, &self.imag + &rhs.imag)
    }
}

impl ops::Sub for &Complex {
    type Output = Complex;

    fn sub(self, rhs: Self) -> Complex {
        Complex::new(&self.real - &rhs.real, &self.imag - &rhs.imag)
    }
}

impl ops::Mul for &Complex {
    type Output = Complex;

    fn mul(self, rhs: Self) -> Complex {
        let real = &(&self.real * &rhs.real) - &(&self.imag * &rhs.imag);
        let imag = &(&self.real * &rhs.imag) + &(&self.imag * &rhs.real);
        Complex::new(real, imag)
    }
}

impl ops::Neg for &Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-&self.real, -&self.imag)
    }
}

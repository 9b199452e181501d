use std::{collections::BTreeMap, fmt};

use crate::{
    ast::{BinaryOperator, Expr, Link, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        solver::core::Solver,
        value::{core::Value, rational::Rational},
    },
};

/// Largest constant exponent accepted on a non-constant base.
pub const MAX_POLYNOMIAL_EXPONENT: u32 = 64;

/// A sparse polynomial in one unknown: power to exact coefficient.
///
/// Zero coefficients are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    terms: BTreeMap<u32, Rational>,
}

impl Polynomial {
    /// The constant polynomial `c`.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        Self::monomial(0, c)
    }

    /// The polynomial `c * x^power`.
    #[must_use]
    pub fn monomial(power: u32, c: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(power, c);
        }
        Self { terms }
    }

    /// Coefficient of `x^power`, zero when absent.
    #[must_use]
    pub fn coefficient(&self, power: u32) -> Rational {
        self.terms.get(&power).cloned().unwrap_or_default()
    }

    /// Highest power with a non-zero coefficient; zero for the zero
    /// polynomial.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.terms.keys().next_back().copied().unwrap_or(0)
    }

    /// `true` if every coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Non-zero terms from the highest power down.
    pub fn terms(&self) -> impl Iterator<Item = (u32, &Rational)> {
        self.terms.iter().rev().map(|(p, c)| (*p, c))
    }

    fn accumulate(&mut self, power: u32, c: &Rational) {
        let sum = &self.coefficient(power) + c;
        if sum.is_zero() {
            self.terms.remove(&power);
        } else {
            self.terms.insert(power, sum);
        }
    }

    /// Term-wise sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (p, c) in &other.terms {
            result.accumulate(*p, c);
        }
        result
    }

    /// Term-wise difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Negates every coefficient.
    #[must_use]
    pub fn neg(&self) -> Self {
        self.scale(&Rational::from(-1))
    }

    /// Multiplies every coefficient by `factor`.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        if factor.is_zero() {
            return Self::default();
        }
        Self { terms: self.terms.iter().map(|(p, c)| (*p, c * factor)).collect() }
    }

    /// Cauchy product of two polynomials.
    ///
    /// # Errors
    /// `Value` if a resulting power overflows.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::{solver::polynomial::Polynomial, value::rational::Rational};
    ///
    /// // (x + 1) * (x - 1) = x^2 - 1
    /// let x = Polynomial::monomial(1, Rational::one());
    /// let p = x.add(&Polynomial::constant(Rational::one()));
    /// let q = x.sub(&Polynomial::constant(Rational::one()));
    /// let product = p.mul(&q).unwrap();
    /// assert_eq!(product.coefficient(2), Rational::one());
    /// assert_eq!(product.coefficient(1), Rational::zero());
    /// assert_eq!(product.coefficient(0), Rational::from(-1));
    /// ```
    pub fn mul(&self, other: &Self) -> EvalResult<Self> {
        let mut result = Self::default();
        for (p1, c1) in &self.terms {
            for (p2, c2) in &other.terms {
                let power = p1.checked_add(*p2)
                              .ok_or_else(|| RuntimeError::value("polynomial degree overflow"))?;
                result.accumulate(power, &(c1 * c2));
            }
        }
        Ok(result)
    }

    /// Raises the polynomial to a small non-negative integer power.
    ///
    /// # Errors
    /// `Value` if a resulting power overflows.
    pub fn powi(&self, exponent: u32) -> EvalResult<Self> {
        let mut result = Self::constant(Rational::one());
        for _ in 0..exponent {
            result = result.mul(self)?;
        }
        Ok(result)
    }

    /// Renders the polynomial in `variable`, highest power first.
    ///
    /// Unit coefficients are omitted, later terms carry their sign as a
    /// separate `+` or `-`, and the zero polynomial renders as `0`.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::{solver::polynomial::Polynomial, value::rational::Rational};
    ///
    /// let p = Polynomial::monomial(2, Rational::one())
    ///     .add(&Polynomial::monomial(1, Rational::from(-5)))
    ///     .add(&Polynomial::constant(Rational::from(6)));
    /// assert_eq!(p.display("x").to_string(), "x^2 - 5 * x + 6");
    /// ```
    #[must_use]
    pub const fn display<'a>(&'a self, variable: &'a str) -> PolynomialDisplay<'a> {
        PolynomialDisplay { polynomial: self,
                            variable }
    }
}

/// Helper returned by [`Polynomial::display`].
pub struct PolynomialDisplay<'a> {
    polynomial: &'a Polynomial,
    variable:   &'a str,
}

impl fmt::Display for PolynomialDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.polynomial.is_zero() {
            return write!(f, "0");
        }

        let x = self.variable;
        for (i, (power, coeff)) in self.polynomial.terms().enumerate() {
            let magnitude = coeff.abs();
            let body = match power {
                0 => magnitude.to_string(),
                1 if magnitude.is_one() => x.to_string(),
                1 => format!("{magnitude} * {x}"),
                _ if magnitude.is_one() => format!("{x}^{power}"),
                _ => format!("{magnitude} * {x}^{power}"),
            };

            match (i, coeff.is_negative()) {
                (0, false) => write!(f, "{body}")?,
                (0, true) => write!(f, "-{body}")?,
                (_, false) => write!(f, " + {body}")?,
                (_, true) => write!(f, " - {body}")?,
            }
        }
        Ok(())
    }
}

impl Solver<'_> {
    /// Reduces `expr` to a polynomial in `unknown`.
    ///
    /// Subtrees that do not mention the unknown are evaluated and must be
    /// real numbers. Around the unknown the accepted shapes are `+`, `-`,
    /// `*`, division by a constant, `p ^ n` for a constant integer
    /// `0 <= n <= 64`, and negation.
    ///
    /// # Errors
    /// - `Name` / `Type` when a constant subtree cannot be evaluated to a real
    ///   number.
    /// - `Value` for any other shape around the unknown.
    /// - `ZeroDivision` for division by a zero constant.
    pub fn polynomialize(&self, expr: &Expr, unknown: &str) -> EvalResult<Polynomial> {
        self.polynomialize_at(expr, unknown, 0)
    }

    fn polynomialize_at(&self, expr: &Expr, unknown: &str, depth: usize) -> EvalResult<Polynomial> {
        let limit = self.evaluator.limits().max_eval_depth;
        if depth > limit {
            return Err(RuntimeError::RecursionLimit { limit });
        }
        let next = depth + 1;

        if !expr.mentions(unknown) {
            return Ok(Polynomial::constant(self.constant(expr)?));
        }

        match expr {
            Expr::Variable(_) => Ok(Polynomial::monomial(1, Rational::one())),
            Expr::UnaryOp { op: UnaryOperator::Negate,
                            expr, } => Ok(self.polynomialize_at(expr, unknown, next)?.neg()),
            Expr::BinaryOp { .. } => {
                let (start, links) = expr.left_chain_from_constant(unknown, |_| true);
                let mut reduced = self.polynomialize_at(start, unknown, next)?;
                for link in links {
                    reduced = self.extend(reduced, link, unknown, next)?;
                }
                Ok(reduced)
            },
            _ => Err(unsupported(expr)),
        }
    }

    /// Applies one step of an operator chain to the polynomial reduced so far.
    fn extend(&self,
              reduced: Polynomial,
              link: Link<'_>,
              unknown: &str,
              depth: usize)
              -> EvalResult<Polynomial> {
        let right = link.right;
        match link.op {
            BinaryOperator::Add => Ok(reduced.add(&self.polynomialize_at(right, unknown, depth)?)),
            BinaryOperator::Sub => Ok(reduced.sub(&self.polynomialize_at(right, unknown, depth)?)),
            BinaryOperator::Mul => reduced.mul(&self.polynomialize_at(right, unknown, depth)?),
            BinaryOperator::Div if !right.mentions(unknown) => {
                let divisor = self.constant(right)?;
                Ok(reduced.scale(&divisor.recip()?))
            },
            BinaryOperator::Pow if !right.mentions(unknown) => {
                let exponent = self.constant(right)?;
                let n = exponent.to_i64()
                                .and_then(|n| u32::try_from(n).ok())
                                .filter(|n| *n <= MAX_POLYNOMIAL_EXPONENT)
                                .ok_or_else(|| {
                                    RuntimeError::value(format!("unsupported exponent \
                                                                 {exponent} on '{unknown}': only \
                                                                 integers from 0 to \
                                                                 {MAX_POLYNOMIAL_EXPONENT} are \
                                                                 supported"))
                                })?;
                reduced.powi(n)
            },
            _ => Err(unsupported(link.node)),
        }
    }

    /// Evaluates a subtree free of the unknown to a real constant.
    fn constant(&self, expr: &Expr) -> EvalResult<Rational> {
        match self.evaluator.evaluate(expr)? {
            Value::Rational(r) => Ok(r),
            other => Err(RuntimeError::type_error(format!("'{expr}' must be a real number in \
                                                           equations, got {}",
                                                          other.type_name()))),
        }
    }
}

fn unsupported(expr: &Expr) -> RuntimeError {
    RuntimeError::value(format!("unsupported equation: cannot reduce '{expr}' to a polynomial"))
}

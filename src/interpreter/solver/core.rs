use std::fmt;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        solver::polynomial::Polynomial,
        value::{complex::Complex, rational::Rational},
    },
};

/// Reduces and solves equations against an evaluator's bindings.
///
/// The solver never changes the bindings; it only reads them to resolve
/// user functions and constants.
#[derive(Debug, Clone, Copy)]
pub struct Solver<'a> {
    pub(crate) evaluator: &'a Evaluator,
}

/// The outcome of solving one equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// Neither side mentions a variable and both evaluate to the same value.
    AlwaysTrue,
    /// Neither side mentions a variable and the values differ.
    NeverTrue,
    /// The equation reduced to `reduced = 0` in `unknown`.
    Reduced {
        unknown: String,
        reduced: Polynomial,
        roots:   Roots,
    },
}

/// Roots of a reduced polynomial, by degree and discriminant sign.
#[derive(Debug, Clone, PartialEq)]
pub enum Roots {
    /// Degree 0 with a zero constant.
    AllReals,
    /// Degree 0 with a non-zero constant.
    Empty,
    /// Degree 1.
    Single(Rational),
    /// Degree 2, positive discriminant.
    TwoReal {
        discriminant: Rational,
        first:        Rational,
        second:       Rational,
    },
    /// Degree 2, zero discriminant.
    Double {
        discriminant: Rational,
        root:         Rational,
    },
    /// Degree 2, negative discriminant.
    TwoComplex {
        discriminant: Rational,
        first:        Complex,
        second:       Complex,
    },
    /// Degree above 2.
    Unsolvable,
}

impl<'a> Solver<'a> {
    /// Creates a solver reading bindings from `evaluator`.
    #[must_use]
    pub const fn new(evaluator: &'a Evaluator) -> Self {
        Self { evaluator }
    }

    /// Solves `left = right` for its unknown.
    ///
    /// User function calls are inlined first. The unknown is the leftmost
    /// variable without a binding, or the leftmost variable when all of them
    /// are bound.
    ///
    /// # Errors
    /// Anything raised while inlining or reducing either side; see
    /// [`Solver::inline_calls`] and [`Solver::polynomialize`].
    ///
    /// # Example
    /// ```
    /// use computor::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::{evaluator::core::Evaluator, solver::core::{Roots, Solution, Solver}},
    /// };
    ///
    /// // 2 * x = 4
    /// let left = Expr::binary(BinaryOperator::Mul,
    ///                         Expr::Number("2".into()),
    ///                         Expr::Variable("x".into()));
    /// let evaluator = Evaluator::new();
    /// let solution = Solver::new(&evaluator).solve(&left, &Expr::Number("4".into())).unwrap();
    /// let Solution::Reduced { roots: Roots::Single(root), .. } = solution else { panic!() };
    /// assert_eq!(root.to_string(), "2");
    /// ```
    pub fn solve(&self, left: &Expr, right: &Expr) -> EvalResult<Solution> {
        let left = self.inline_calls(left)?;
        let right = self.inline_calls(right)?;

        let Some(unknown) = self.find_unknown(&left, &right) else {
            let lhs = self.evaluator.evaluate(&left)?;
            let rhs = self.evaluator.evaluate(&right)?;
            log::debug!("constant equation: {lhs} against {rhs}");
            return Ok(if lhs == rhs { Solution::AlwaysTrue } else { Solution::NeverTrue });
        };

        let reduced = self.polynomialize(&left, &unknown)?
                          .sub(&self.polynomialize(&right, &unknown)?);
        log::debug!("reduced {unknown}: {reduced:?}");

        let roots = solve_reduced(&reduced)?;
        Ok(Solution::Reduced { unknown,
                               reduced,
                               roots })
    }

    fn find_unknown(&self, left: &Expr, right: &Expr) -> Option<String> {
        let mut names = left.variables();
        names.extend(right.variables());

        names.iter()
             .find(|name| self.evaluator.get_variable(name).is_none())
             .or_else(|| names.first())
             .map(|name| (*name).to_string())
    }
}

/// Picks the closed form for a reduced polynomial.
fn solve_reduced(reduced: &Polynomial) -> EvalResult<Roots> {
    let a = reduced.coefficient(2);
    let b = reduced.coefficient(1);
    let c = reduced.coefficient(0);

    match reduced.degree() {
        0 if c.is_zero() => Ok(Roots::AllReals),
        0 => Ok(Roots::Empty),
        1 => Ok(Roots::Single((-c).checked_div(&b)?)),
        2 => solve_quadratic(&a, &b, &c),
        _ => Ok(Roots::Unsolvable),
    }
}

fn solve_quadratic(a: &Rational, b: &Rational, c: &Rational) -> EvalResult<Roots> {
    let discriminant = &(b * b) - &(&(&Rational::from(4) * a) * c);
    let two_a = &Rational::from(2) * a;
    let minus_b = -b;

    if discriminant.is_zero() {
        return Ok(Roots::Double { root: minus_b.checked_div(&two_a)?,
                                  discriminant });
    }

    let root = root_of(&discriminant.abs())?;
    if discriminant.is_negative() {
        let real = minus_b.checked_div(&two_a)?;
        let imag = root.checked_div(&two_a)?;
        return Ok(Roots::TwoComplex { first: Complex::new(real.clone(), imag.clone()),
                                      second: Complex::new(real, -imag),
                                      discriminant });
    }

    Ok(Roots::TwoReal { first: (&minus_b + &root).checked_div(&two_a)?,
                        second: (&minus_b - &root).checked_div(&two_a)?,
                        discriminant })
}

fn root_of(value: &Rational) -> EvalResult<Rational> {
    value.sqrt()
         .unwrap_or_else(|| Err(RuntimeError::value("square root of a negative discriminant")))
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysTrue => write!(f, "The equation is always true"),
            Self::NeverTrue => write!(f, "The equation has no solution"),
            Self::Reduced { unknown,
                            reduced,
                            roots, } => {
                writeln!(f, "Reduced form: {} = 0", reduced.display(unknown))?;
                writeln!(f, "Polynomial degree: {}", reduced.degree())?;
                write!(f, "{roots}")
            },
        }
    }
}

impl fmt::Display for Roots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllReals => write!(f, "All real numbers are solutions"),
            Self::Empty => write!(f, "No solution"),
            Self::Single(root) => write!(f, "The solution is:\n{root}"),
            Self::TwoReal { discriminant,
                            first,
                            second, } => {
                writeln!(f, "Discriminant: {discriminant}")?;
                write!(f, "Discriminant is strictly positive, the two solutions are:\n{first}\n{second}")
            },
            Self::Double { discriminant, root } => {
                writeln!(f, "Discriminant: {discriminant}")?;
                write!(f, "Discriminant is zero, the solution is:\n{root}")
            },
            Self::TwoComplex { discriminant,
                               first,
                               second, } => {
                writeln!(f, "Discriminant: {discriminant}")?;
                write!(f,
                       "Discriminant is strictly negative, the two complex solutions \
                        are:\n{first}\n{second}")
            },
            Self::Unsolvable => {
                write!(f, "The polynomial degree is strictly greater than 2, I can't solve.")
            },
        }
    }
}

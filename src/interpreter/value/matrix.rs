use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::rational::Rational},
    util::num::exponent_to_usize,
};

/// A rectangular matrix of rationals with at least one row and one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: Vec<Vec<Rational>>,
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells = row.iter().map(ToString::to_string).collect::<Vec<_>>();
            write!(f, "[ {} ]", cells.join(" , "))?;
        }
        Ok(())
    }
}

impl Matrix {
    /// Builds a matrix from its rows.
    ///
    /// # Errors
    /// `Value` if there are no rows, a row is empty, or rows differ in length.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::{matrix::Matrix, rational::Rational};
    ///
    /// let m = Matrix::new(vec![vec![Rational::from(1), Rational::from(2)]]).unwrap();
    /// assert_eq!(m.to_string(), "[ 1 , 2 ]");
    ///
    /// let jagged = vec![vec![Rational::from(1)], vec![Rational::from(1), Rational::from(2)]];
    /// assert!(Matrix::new(jagged).is_err());
    /// ```
    pub fn new(rows: Vec<Vec<Rational>>) -> EvalResult<Self> {
        let Some(first) = rows.first() else {
            return Err(RuntimeError::value("matrix must have at least one row"));
        };
        let width = first.len();
        if width == 0 {
            return Err(RuntimeError::value("matrix rows must not be empty"));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(RuntimeError::value("all matrix rows must have the same length"));
        }
        Ok(Self { rows })
    }

    /// The `n × n` identity matrix.
    ///
    /// # Errors
    /// `Value` if `n` is zero.
    pub fn identity(n: usize) -> EvalResult<Self> {
        let rows = (0..n).map(|i| {
                             (0..n).map(|j| if i == j { Rational::one() } else { Rational::zero() })
                                   .collect()
                         })
                         .collect();
        Self::new(rows)
    }

    /// Number of rows.
    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// The rows of the matrix.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.rows
    }

    /// `true` for a single row or a single column.
    #[must_use]
    pub fn is_vector(&self) -> bool {
        self.nrows() == 1 || self.ncols() == 1
    }

    /// `true` when both matrices have the same number of rows and columns.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.nrows() == other.nrows() && self.ncols() == other.ncols()
    }

    fn shape(&self) -> String {
        format!("{}x{}", self.nrows(), self.ncols())
    }

    /// Applies `f` to every entry.
    pub fn try_map<F>(&self, mut f: F) -> EvalResult<Self>
        where F: FnMut(&Rational) -> EvalResult<Rational>
    {
        let rows = self.rows
                       .iter()
                       .map(|row| row.iter().map(&mut f).collect::<EvalResult<Vec<_>>>())
                       .collect::<EvalResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    fn zip_with<F>(&self, other: &Self, op: &str, f: F) -> EvalResult<Self>
        where F: Fn(&Rational, &Rational) -> Rational
    {
        if !self.same_shape(other) {
            return Err(RuntimeError::value(format!("cannot {op} matrices of shapes {} and {}",
                                                   self.shape(),
                                                   other.shape())));
        }
        let rows = self.rows
                       .iter()
                       .zip(&other.rows)
                       .map(|(a, b)| a.iter().zip(b).map(|(x, y)| f(x, y)).collect())
                       .collect();
        Ok(Self { rows })
    }

    /// Entry-wise sum.
    ///
    /// # Errors
    /// `Value` if the shapes differ.
    pub fn add(&self, other: &Self) -> EvalResult<Self> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Entry-wise difference.
    ///
    /// # Errors
    /// `Value` if the shapes differ.
    pub fn sub(&self, other: &Self) -> EvalResult<Self> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Entry-wise product.
    ///
    /// # Errors
    /// `Value` if the shapes differ.
    pub fn hadamard(&self, other: &Self) -> EvalResult<Self> {
        self.zip_with(other, "multiply element-wise", |a, b| a * b)
    }

    /// Multiplies every entry by `factor`.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        let rows = self.rows
                       .iter()
                       .map(|row| row.iter().map(|x| x * factor).collect())
                       .collect();
        Self { rows }
    }

    /// Negates every entry.
    #[must_use]
    pub fn neg(&self) -> Self {
        self.scale(&Rational::from(-1))
    }

    /// Matrix product.
    ///
    /// # Errors
    /// `Value` if `self` has a different number of columns than `other` has
    /// rows.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::value::{matrix::Matrix, rational::Rational};
    ///
    /// let r = |n: i64| Rational::from(n);
    /// let row = Matrix::new(vec![vec![r(5), r(6)]]).unwrap();
    /// let col = Matrix::new(vec![vec![r(5)], vec![r(6)]]).unwrap();
    /// assert_eq!(row.matmul(&col).unwrap().to_string(), "[ 61 ]");
    /// ```
    pub fn matmul(&self, other: &Self) -> EvalResult<Self> {
        if self.ncols() != other.nrows() {
            return Err(RuntimeError::value(format!("cannot multiply matrices of shapes {} and {}",
                                                   self.shape(),
                                                   other.shape())));
        }
        let rows = self.rows
                       .iter()
                       .map(|row| {
                           (0..other.ncols()).map(|j| {
                                                 row.iter()
                                                    .zip(&other.rows)
                                                    .fold(Rational::zero(), |acc, (a, b_row)| {
                                                        acc + a * &b_row[j]
                                                    })
                                             })
                                             .collect()
                       })
                       .collect();
        Ok(Self { rows })
    }

    /// Exact inverse by Gauss-Jordan elimination.
    ///
    /// # Errors
    /// - `Value` if the matrix is not square.
    /// - `ZeroDivision` if the matrix is singular.
    pub fn inverse(&self) -> EvalResult<Self> {
        let n = self.nrows();
        if n != self.ncols() {
            return Err(RuntimeError::value(format!("cannot invert a non-square {} matrix",
                                                   self.shape())));
        }

        let mut left = self.rows.clone();
        let mut right = Self::identity(n)?.rows;

        for col in 0..n {
            let pivot = (col..n).find(|&r| !left[r][col].is_zero())
                                .ok_or_else(|| RuntimeError::zero_division("matrix is singular"))?;
            left.swap(col, pivot);
            right.swap(col, pivot);

            let factor = left[col][col].recip()?;
            for x in &mut left[col] {
                *x = &*x * &factor;
            }
            for x in &mut right[col] {
                *x = &*x * &factor;
            }

            for r in 0..n {
                if r == col || left[r][col].is_zero() {
                    continue;
                }
                let k = left[r][col].clone();
                let (pivot_left, pivot_right) = (left[col].clone(), right[col].clone());
                for (x, p) in left[r].iter_mut().zip(&pivot_left) {
                    *x = &*x - &(&k * p);
                }
                for (x, p) in right[r].iter_mut().zip(&pivot_right) {
                    *x = &*x - &(&k * p);
                }
            }
        }

        Ok(Self { rows: right })
    }

    /// Integer power of a square matrix.
    ///
    /// Zero gives the identity, negative exponents raise the inverse.
    ///
    /// # Errors
    /// - `Value` if the matrix is not square.
    /// - `ZeroDivision` for a negative power of a singular matrix.
    pub fn powi(&self, exponent: i64) -> EvalResult<Self> {
        if self.nrows() != self.ncols() {
            return Err(RuntimeError::value(format!("cannot raise a non-square {} matrix to a \
                                                    power",
                                                   self.shape())));
        }
        if exponent_to_usize(exponent.unsigned_abs()).is_none() {
            return Err(RuntimeError::value(format!("exponent {exponent} is too large")));
        }
        let base = if exponent < 0 { self.inverse()? } else { self.clone() };

        let mut result = Self::identity(self.nrows())?;
        let mut square = base;
        let mut remaining = exponent.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.matmul(&square)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                square = square.matmul(&square)?;
            }
        }
        Ok(result)
    }

    /// Sum of the squared entries.
    #[must_use]
    pub fn frobenius_sqr(&self) -> Rational {
        self.rows
            .iter()
            .flatten()
            .fold(Rational::zero(), |acc, x| acc + x * x)
    }
}

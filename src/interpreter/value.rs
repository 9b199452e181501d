/// The `Value` enum.
///
/// Closed sum over every runtime value: rationals, complex numbers, matrices,
/// user functions and builtins, with conversions and type names for errors.
pub mod core;
/// Complex number support.
///
/// Defines `Complex`, a pair of exact rationals, with arithmetic, conjugate
/// division, display rules and conversion to and from `Complex64`.
pub mod complex;
/// User-defined functions.
pub mod function;
/// Rational matrices.
///
/// Defines `Matrix` with construction checks, entry-wise arithmetic, matrix
/// product, exact Gauss-Jordan inversion and integer powers.
pub mod matrix;
/// Exact rationals.
///
/// Wraps `BigRational` with exact decimal parsing, floored remainder, exact
/// integer powers and the bounded float re-wrapping used by lossy operations.
pub mod rational;

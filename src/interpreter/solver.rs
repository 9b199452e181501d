/// The `Solver` and its results.
///
/// Picks the unknown, reduces both sides to one polynomial and solves it in
/// closed form up to degree 2.
pub mod core;

/// Symbolic inlining of user function calls.
pub mod inline;

/// Sparse exact polynomials and the reduction of expressions to them.
///
/// Accepts sums, products, division by constants and constant integer powers
/// around the unknown; everything else is an unsupported equation.
pub mod polynomial;

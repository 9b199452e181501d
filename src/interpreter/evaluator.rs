/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: scalar
/// arithmetic with complex promotion, matrix arithmetic, powers and the
/// matrix product.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation of scalars and matrices.
pub mod unary;

/// Core evaluation logic and environment management.
///
/// Contains the `Evaluator`, its bindings and angle mode, the depth-bounded
/// tree walk, and variable lookup with builtin fallback.
pub mod core;

/// Function evaluation.
///
/// Handles user-defined and builtin function calls.
pub mod function;

/// Dispatch of binary operators by operand type.
pub mod core;
/// Rational and complex arithmetic.
pub mod scalar;
/// Matrix arithmetic, products and scalar scaling.
pub mod matrix;
/// Exponentiation of rationals and matrices.
pub mod power;

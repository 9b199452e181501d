/// Numeric conversion helpers.
///
/// Bridges exact rationals and floating point: best rational approximation
/// with a bounded denominator, overflow-safe conversion to `f64`, integer
/// extraction and exact integer square roots.
pub mod num;

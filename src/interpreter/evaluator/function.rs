/// Builtin function implementations.
///
/// Transcendental functions over `Complex64` with demotion back to exact
/// values, exact square roots, norms, inverses, `abs`, `floor` and `ceil`.
pub mod builtin;

/// The builtin table and call dispatch.
///
/// Generates the static name-to-function table and evaluates calls to user
/// functions against a copied environment.
pub mod core;

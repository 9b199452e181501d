/// The `Interpreter` session.
///
/// Runs one input line at a time: session commands, assignments, function
/// definitions, queries, equations and bare expressions.
pub mod core;

/// Function body rendering with constant folding.
pub mod render;

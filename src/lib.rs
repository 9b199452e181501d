//! # computor
//!
//! computor is a mathematical expression interpreter written in Rust.
//! It evaluates expressions over exact rationals, complex numbers with
//! rational parts and rational matrices, binds variables and single-argument
//! functions, and solves polynomial equations of degree at most 2.
//!
//! ```
//! use computor::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! interpreter.execute("f(x) = x^2 - 5 * x").unwrap();
//! let report = interpreter.execute("f(x) = -6 ?").unwrap().unwrap();
//! assert!(report.contains("Polynomial degree: 2"));
//! assert!(report.ends_with("3\n2"));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed input.
///
/// This module declares the `Expr` and `Statement` enums that represent one
/// input line as a tree. The AST is built by the parser, walked by the
/// evaluator and rewritten by the solver.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Prints expressions back to text that parses to the same tree.
/// - Provides depth and variable queries used by the solver.
pub mod ast;
/// Interpreter settings.
///
/// Angle mode, the inlining fallback policy and the recursion limits.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while handling a line.
/// It standardizes error reporting and classifies every failure into one of
/// the error kinds shown to the user.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source offsets where a token is involved.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the handling of one input line.
///
/// This module ties together lexing, parsing, evaluation, solving and value
/// representations to provide a complete interpreter session.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, solver and
///   value types.
/// - Provides entry points for running lines and inspecting bindings.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion.
///
/// This module provides the conversions between exact rationals and
/// floating-point numbers used by the lossy operations, and the integer
/// helpers behind exact square roots and bounded exponents.
///
/// # Responsibilities
/// - Convert between `BigRational`, `f64` and machine integers without silent
///   data loss.
/// - Approximate floats by rationals with a bounded denominator.
pub mod util;

pub use crate::{
    config::Config,
    error::Error,
    interpreter::{
        evaluator::core::Evaluator, lexer::tokenize, parser::core::parse,
        session::core::Interpreter,
    },
};

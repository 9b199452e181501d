/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks an expression tree against the user's bindings and
/// the builtin table, applying the exact arithmetic of the value types.
///
/// # Responsibilities
/// - Evaluates expressions with bounded recursion.
/// - Looks names up case-insensitively, falling back to builtins.
/// - Calls user functions against a copy of the caller's bindings.
/// - Reports name, type, value and division errors.
pub mod evaluator;
/// The lexer module tokenizes an input line.
///
/// The lexer reads the raw line and produces a stream of tokens, each paired
/// with its byte offset: numbers, identifiers, operators and delimiters.
///
/// # Responsibilities
/// - Converts the input characters into tokens with source offsets.
/// - Matches `**` before `*`.
/// - Reports the first character that starts no token.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser decides which statement form a line is, then builds its
/// expression trees by recursive descent over the precedence levels.
///
/// # Responsibilities
/// - Distinguishes equations, function assignments, assignments and bare
///   expressions.
/// - Handles implicit multiplication and both matrix literal forms.
/// - Rejects consecutive signs, reserved names and trailing tokens.
pub mod parser;
/// Session orchestration.
///
/// Sequences lexing, parsing and evaluation or solving for each line and
/// renders the results as text.
pub mod session;
/// The equation solver.
///
/// Inlines user functions, reduces an equation to a polynomial in one
/// unknown and solves it when its degree is at most 2.
pub mod solver;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares every value an expression can produce: exact
/// rationals, complex numbers with rational parts, rational matrices, user
/// functions and builtins.
///
/// # Responsibilities
/// - Defines the `Value` enum and its variants.
/// - Implements the exact arithmetic and formatting of each type.
/// - Keeps each type's invariants (lowest terms, rectangular matrices).
pub mod value;

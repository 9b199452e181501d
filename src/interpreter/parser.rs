/// Parser entry points.
///
/// Contains the top-level `parse` function, the nesting check run before
/// descent, and shared helpers for expected tokens and declared names.
pub mod core;

/// Statement parsing.
///
/// Decides between equation, function assignment, assignment and bare
/// expression by lookahead, then parses the chosen form.
pub mod statement;

/// Binary operator parsing.
///
/// Implements the precedence levels for `+ -`, `* / % **` with implicit
/// multiplication, and right-associative `^`.
pub mod binary;

/// Factor parsing.
///
/// Handles unary minus, parentheses, literals, identifiers and calls.
pub mod unary;

/// Matrix literal parsing, nested and flat forms.
pub mod matrix;

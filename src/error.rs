/// Lexing and parsing errors.
///
/// Defines the errors raised before evaluation: characters that start no
/// token, malformed statements, missing or trailing tokens, consecutive signs,
/// misuse of the reserved name `i` and empty matrix literals.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all errors raised during evaluation and equation solving: unbound
/// names, type mismatches, invalid values or shapes, and division by zero.
pub mod runtime_error;

pub use parse_error::{LexError, ParseError};
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// The error taxonomy shared by every phase of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input character matches no token pattern.
    Lex,
    /// Malformed statement shape.
    Parse,
    /// Unbound variable or function name.
    Name,
    /// Operator applied to incompatible values.
    Type,
    /// Dimension mismatch, invalid literal or unsupported equation.
    Value,
    /// Division, modulo or inversion by zero.
    ZeroDivision,
}

/// Any failure produced while executing one input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Tokenizing failed.
    #[error("Syntax error: {0}")]
    Lex(#[from] LexError),
    /// Parsing failed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// Evaluation or solving failed.
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the taxonomy kind of this error.
    ///
    /// # Example
    /// ```
    /// use computor::{Interpreter, error::ErrorKind};
    ///
    /// let mut interpreter = Interpreter::new();
    /// let err = interpreter.execute("1 / 0").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ZeroDivision);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lex,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Runtime(e) => e.kind(),
        }
    }
}

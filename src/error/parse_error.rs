use thiserror::Error;

/// Raised by the lexer when a character starts no known token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected character '{character}' at position {offset}")]
pub struct LexError {
    /// The offending character.
    pub character: char,
    /// Byte offset of the character in the input line.
    pub offset:    usize,
}

/// Represents all errors that can occur while parsing a token stream.
///
/// Every variant that refers to a concrete token carries the byte offset of
/// that token in the input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot start or continue the current construct.
    #[error("Unexpected token '{token}' at position {offset}")]
    UnexpectedToken {
        /// The token encountered.
        token:  String,
        /// Byte offset of the token.
        offset: usize,
    },
    /// A specific token was required but another one was found.
    #[error("Expected {expected}, found '{found}' at position {offset}")]
    Expected {
        /// Human readable description of what was expected.
        expected: &'static str,
        /// The token actually found.
        found:    String,
        /// Byte offset of the token.
        offset:   usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,
    /// Found extra tokens after a complete statement.
    #[error("Unexpected token after expression: '{token}' at position {offset}")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:  String,
        /// Byte offset of the token.
        offset: usize,
    },
    /// Two sign operators in a row, such as `+-` or `--`.
    #[error("Consecutive '+' or '-' operators are not allowed (position {offset})")]
    ConsecutiveSigns {
        /// Byte offset of the second sign.
        offset: usize,
    },
    /// Tried to bind or declare a reserved identifier.
    #[error("'{name}' is reserved for the imaginary unit and cannot be used as a {role}")]
    IdentifierReserved {
        /// The reserved identifier as written.
        name: String,
        /// What the identifier was used as (variable, function, argument).
        role: &'static str,
    },
    /// `[]` or a matrix with an empty row.
    #[error("Empty matrix at position {offset}")]
    EmptyMatrix {
        /// Byte offset of the opening bracket.
        offset: usize,
    },
    /// The expression nests deeper than the configured limit.
    #[error("Expression is nested too deeply (limit is {limit})")]
    TooDeep {
        /// The configured maximum depth.
        limit: usize,
    },
    /// A session command was given arguments it does not accept.
    #[error("Invalid '{command}' command: {details}")]
    InvalidCommand {
        /// The command word.
        command: &'static str,
        /// What was wrong, including the accepted usage.
        details: String,
    },
}

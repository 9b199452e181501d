use thiserror::Error;

/// Represents all errors that can occur during evaluation or solving.
///
/// The variants follow the interpreter's error taxonomy: unbound names,
/// incompatible operand types, invalid values or shapes, and division by a
/// zero-valued divisor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Reference to an unbound variable or function name.
    #[error("NameError: {details}")]
    Name {
        /// Details about the missing or reserved name.
        details: String,
    },
    /// An operator or function was applied to incompatible values.
    #[error("TypeError: {details}")]
    Type {
        /// Details about the type mismatch.
        details: String,
    },
    /// A value had the right type but an unusable shape or magnitude.
    #[error("ValueError: {details}")]
    Value {
        /// Details about why the value was rejected.
        details: String,
    },
    /// Division, modulo or inversion by a zero-valued operand.
    #[error("ZeroDivisionError: {details}")]
    ZeroDivision {
        /// Details about the offending operation.
        details: String,
    },
    /// Evaluation, inlining or polynomial reduction nested too deeply.
    #[error("ValueError: maximum recursion depth of {limit} exceeded")]
    RecursionLimit {
        /// The configured maximum depth.
        limit: usize,
    },
}

impl RuntimeError {
    pub(crate) fn name(details: impl Into<String>) -> Self {
        Self::Name { details: details.into() }
    }

    pub(crate) fn type_error(details: impl Into<String>) -> Self {
        Self::Type { details: details.into() }
    }

    pub(crate) fn value(details: impl Into<String>) -> Self {
        Self::Value { details: details.into() }
    }

    pub(crate) fn zero_division(details: impl Into<String>) -> Self {
        Self::ZeroDivision { details: details.into() }
    }

    /// Returns the taxonomy kind of this error.
    #[must_use]
    pub const fn kind(&self) -> super::ErrorKind {
        use super::ErrorKind;

        match self {
            Self::Name { .. } => ErrorKind::Name,
            Self::Type { .. } => ErrorKind::Type,
            Self::Value { .. } | Self::RecursionLimit { .. } => ErrorKind::Value,
            Self::ZeroDivision { .. } => ErrorKind::ZeroDivision,
        }
    }
}

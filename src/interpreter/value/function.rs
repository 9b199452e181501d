use std::fmt;

use crate::ast::Expr;

/// A user-defined single-argument function.
///
/// A function is not a closure: calling it evaluates `body` against a copy of
/// the caller's bindings at call time, with `param` bound to the argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Lowercase parameter name.
    pub param: String,
    /// The function body.
    pub body:  Expr,
}

impl Function {
    /// Creates a function value.
    #[must_use]
    pub fn new(param: impl Into<String>, body: Expr) -> Self {
        Self { param: param.into(),
               body }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)
    }
}

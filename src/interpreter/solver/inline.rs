use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, solver::core::Solver, value::core::Value},
};

impl Solver<'_> {
    /// Replaces every call to a user function with the function's body,
    /// substituting the parameter by the call's argument, until no user
    /// function calls remain.
    ///
    /// Calls to builtins or unbound names are kept, with their argument
    /// inlined.
    ///
    /// # Errors
    /// `RecursionLimit` when inlining does not terminate within the configured
    /// depth, for example with a self-referencing definition.
    ///
    /// # Example
    /// ```
    /// use computor::{
    ///     Interpreter,
    ///     ast::Statement,
    ///     config::Limits,
    ///     interpreter::{lexer::tokenize, parser::core::parse, solver::core::Solver},
    /// };
    ///
    /// let mut interpreter = Interpreter::new();
    /// interpreter.execute("f(x) = x + 1").unwrap();
    /// interpreter.execute("g(y) = 2 * y").unwrap();
    ///
    /// let tokens = tokenize("g(f(z))").unwrap();
    /// let Ok(Statement::Expression(expr)) = parse(&tokens, &Limits::default()) else {
    ///     panic!("expected an expression");
    /// };
    /// let inlined = Solver::new(interpreter.evaluator()).inline_calls(&expr).unwrap();
    /// assert_eq!(inlined.to_string(), "2 * (z + 1)");
    /// ```
    pub fn inline_calls(&self, expr: &Expr) -> EvalResult<Expr> {
        self.inline_at(expr, 0)
    }

    /// Inlines at expansion depth `depth`; each expanded call adds one level.
    fn inline_at(&self, expr: &Expr, depth: usize) -> EvalResult<Expr> {
        let limit = self.evaluator.limits().max_eval_depth;
        if depth > limit {
            return Err(RuntimeError::RecursionLimit { limit });
        }

        expr.try_rebuild(|node| {
            let Expr::Call { name, argument } = node else {
                return Ok(None);
            };
            let Some(Value::Function(function)) = self.evaluator.get_variable(name) else {
                return Ok(None);
            };
            let argument = self.inline_at(argument, depth + 1)?;
            log::debug!("inlining {name}({argument})");
            let body = substitute(&function.body, &function.param, &argument);
            self.inline_at(&body, depth + 1).map(Some)
        })
    }
}

/// Returns `expr` with every `Variable(name)` replaced by `replacement`.
///
/// Names are compared case-insensitively.
#[must_use]
pub fn substitute(expr: &Expr, name: &str, replacement: &Expr) -> Expr {
    expr.rebuild(|node| match node {
        Expr::Variable(var) if var.eq_ignore_ascii_case(name) => Some(replacement.clone()),
        _ => None,
    })
}

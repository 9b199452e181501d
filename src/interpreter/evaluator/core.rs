use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::Expr,
    config::{AngleMode, Config, Limits},
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::lookup_builtin,
        value::{complex::Complex, core::Value, matrix::Matrix, rational::Rational},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A mapping from lowercase identifier to value.
pub type Environment = HashMap<String, Value>;

/// Stores the runtime evaluation state.
///
/// The evaluator owns the user's bindings, the angle mode used by the
/// trigonometric builtins, and the recursion limits.
///
/// ## Usage
///
/// `Evaluator` is created once per session and reused for every line. Only
/// [`Evaluator::assign`] changes the bindings; evaluation never does.
///
/// ```
/// use computor::{
///     ast::Expr,
///     interpreter::{evaluator::core::Evaluator, value::rational::Rational},
/// };
///
/// let mut evaluator = Evaluator::new();
/// evaluator.assign("Var", Rational::from(10).into()).unwrap();
/// let value = evaluator.evaluate(&Expr::Variable("var".into())).unwrap();
/// assert_eq!(value.to_string(), "10");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    variables:  Environment,
    angle_mode: AngleMode,
    limits:     Limits,
}

impl Evaluator {
    /// Creates an evaluator with no bindings and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator using the angle mode and limits of `config`.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self { variables:  Environment::new(),
               angle_mode: config.angle_mode,
               limits:     config.limits, }
    }

    /// The current angle mode.
    #[must_use]
    pub const fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Switches the angle mode used by `sin`, `cos` and `tan`.
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        log::info!("angle mode set to {mode}");
        self.angle_mode = mode;
    }

    /// The recursion limits in effect.
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// User bindings, sorted by name.
    #[must_use]
    pub fn variables(&self) -> Vec<(&str, &Value)> {
        let mut bindings = self.variables
                               .iter()
                               .map(|(name, value)| (name.as_str(), value))
                               .collect::<Vec<_>>();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }

    /// Binds `name` (case-insensitively) to `value`, replacing any previous
    /// binding.
    ///
    /// # Errors
    /// `Name` if `name` is the reserved imaginary unit `i`.
    pub fn assign(&mut self, name: &str, value: Value) -> EvalResult<()> {
        let name = name.to_ascii_lowercase();
        if name == "i" {
            return Err(RuntimeError::name("'i' is reserved for the imaginary unit and cannot \
                                           be used as a variable name"));
        }
        log::info!("bind {name} = {value}");
        self.variables.insert(name, value);
        Ok(())
    }

    /// Looks `name` up case-insensitively, falling back to the builtin table.
    ///
    /// # Example
    /// ```
    /// use computor::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let evaluator = Evaluator::new();
    /// assert!(matches!(evaluator.get_variable("SQRT"), Some(Value::Builtin(_))));
    /// assert!(evaluator.get_variable("x").is_none());
    /// ```
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        lookup(&self.variables, &name.to_ascii_lowercase())
    }

    /// Evaluates an expression against the current bindings.
    ///
    /// # Errors
    /// Any `RuntimeError`: unbound names, type mismatches, invalid values,
    /// division by zero, or exceeding the recursion limit.
    pub fn evaluate(&self, expr: &Expr) -> EvalResult<Value> {
        self.eval_in(expr, &self.variables, 0)
    }

    /// Evaluates `expr` against `env` at recursion depth `depth`.
    ///
    /// A chain of binary operators is walked in a loop, so only real nesting
    /// (operands, arguments, function bodies) adds to the depth.
    pub(crate) fn eval_in(&self, expr: &Expr, env: &Environment, depth: usize) -> EvalResult<Value> {
        if depth > self.limits.max_eval_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.limits.max_eval_depth });
        }
        let next = depth + 1;

        match expr {
            Expr::Number(text) => Ok(Value::Rational(Rational::from_literal(text)?)),
            Expr::Variable(name) => {
                lookup(env, name).ok_or_else(|| {
                                     RuntimeError::name(format!("Variable '{name}' is not \
                                                                 defined"))
                                 })
            },
            Expr::Imaginary => Ok(Value::Complex(Complex::i())),
            Expr::Matrix(rows) => self.eval_matrix(rows, env, next),
            Expr::BinaryOp { .. } => {
                let (first, links) = expr.left_chain(|_| true);
                let mut value = self.eval_in(first, env, next)?;
                for link in links {
                    let right = self.eval_in(link.right, env, next)?;
                    value = Self::eval_binary(link.op, &value, &right)?;
                }
                Ok(value)
            },
            Expr::UnaryOp { op, expr } => {
                let operand = self.eval_in(expr, env, next)?;
                Self::eval_unary(*op, &operand)
            },
            Expr::Call { name, argument } => {
                let argument = self.eval_in(argument, env, next)?;
                let callee = lookup(env, name).ok_or_else(|| {
                                                  RuntimeError::name(format!("Function '{name}' \
                                                                              is not defined"))
                                              })?;
                self.eval_call(name, &callee, argument, env, next)
            },
        }
    }

    fn eval_matrix(&self, rows: &[Vec<Expr>], env: &Environment, depth: usize) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::with_capacity(row.len());
            for cell in row {
                match self.eval_in(cell, env, depth)? {
                    Value::Rational(r) => cells.push(r),
                    other => {
                        return Err(RuntimeError::type_error(format!("Matrix elements must be \
                                                                     rational numbers, got {}",
                                                                    other.type_name())));
                    },
                }
            }
            values.push(cells);
        }
        Ok(Value::Matrix(Rc::new(Matrix::new(values)?)))
    }
}

/// Looks up an already lowercased name in `env`, then in the builtin table.
fn lookup(env: &Environment, name: &str) -> Option<Value> {
    env.get(name)
       .cloned()
       .or_else(|| lookup_builtin(name).map(Value::Builtin))
}

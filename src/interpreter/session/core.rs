use crate::{
    ast::{Expr, Statement},
    config::{AngleMode, Config},
    error::{Error, ParseError},
    interpreter::{
        evaluator::core::Evaluator,
        lexer::tokenize,
        parser::core::parse,
        session::render::render_body,
        solver::core::Solver,
        value::function::Function,
    },
};

/// One interactive session: a set of bindings plus the settings they are
/// evaluated with.
///
/// Each call to [`Interpreter::execute`] handles one input line. Bindings
/// made by earlier lines stay visible to later ones, and a line that fails
/// leaves them unchanged.
///
/// # Example
/// ```
/// use computor::Interpreter;
///
/// let mut interpreter = Interpreter::new();
/// assert_eq!(interpreter.execute("a = 7 / 2").unwrap().as_deref(), Some("7/2"));
/// assert_eq!(interpreter.execute("A * 2").unwrap().as_deref(), Some("7"));
/// assert!(interpreter.execute("b + 1").is_err());
/// assert_eq!(interpreter.execute("   ").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    evaluator: Evaluator,
    config:    Config,
}

impl Interpreter {
    /// Creates a session with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the given settings.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { evaluator: Evaluator::with_config(&config),
               config }
    }

    /// The session's evaluator, holding its bindings.
    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// The settings the session was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one input line.
    ///
    /// # Returns
    /// The text to show for the line, or `None` for a blank line.
    ///
    /// # Errors
    /// A lexing, parsing or runtime error. The bindings are left untouched.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>, Error> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if let Some(output) = self.command(line)? {
            return Ok(Some(output));
        }

        let tokens = tokenize(line)?;
        let statement = parse(&tokens, &self.config.limits)?;

        let output = match statement {
            Statement::Assign { name, expr } => {
                let value = self.evaluator.evaluate(&expr)?;
                let shown = value.to_string();
                self.evaluator.assign(&name, value)?;
                shown
            },
            Statement::FunctionAssign { name, param, body } => {
                let shown = render_body(&self.evaluator, &body, &param).to_string();
                self.evaluator.assign(&name, Function::new(param, body).into())?;
                shown
            },
            Statement::Equation { left, right: None } => self.query(&left)?,
            Statement::Equation { left,
                                  right: Some(right), } => {
                Solver::new(&self.evaluator).solve(&left, &right)?.to_string()
            },
            Statement::Expression(expr) => self.evaluator.evaluate(&expr)?.to_string(),
        };
        Ok(Some(output))
    }

    /// Handles `expr = ?`.
    ///
    /// User functions are inlined; the result is shown symbolically while
    /// any variable remains, and evaluated otherwise.
    fn query(&self, expr: &Expr) -> Result<String, Error> {
        match Solver::new(&self.evaluator).inline_calls(expr) {
            Ok(inlined) if inlined.has_variables() => Ok(inlined.to_string()),
            Ok(inlined) => Ok(self.evaluator.evaluate(&inlined)?.to_string()),
            Err(err) if self.config.best_effort_inlining => {
                log::debug!("inlining failed ({err}), evaluating as written");
                Ok(self.evaluator.evaluate(expr)?.to_string())
            },
            Err(err) => Err(err.into()),
        }
    }

    /// Recognises the session commands `vars`, `display`, `show` and
    /// `angles [mode]`.
    ///
    /// # Returns
    /// `None` when `line` is not a command.
    fn command(&mut self, line: &str) -> Result<Option<String>, Error> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(None);
        };
        let rest = words.collect::<Vec<_>>();

        match first.to_ascii_lowercase().as_str() {
            "vars" | "display" | "show" if rest.is_empty() => Ok(Some(self.list_variables())),
            "angles" => match rest.as_slice() {
                [] => Ok(Some(format!("angle mode: {}", self.evaluator.angle_mode()))),
                [mode] => {
                    let mode =
                        mode.parse::<AngleMode>()
                            .map_err(|details| ParseError::InvalidCommand { command: "angles",
                                                                            details })?;
                    self.evaluator.set_angle_mode(mode);
                    Ok(Some(format!("angle mode set to {mode}")))
                },
                _ => Err(ParseError::InvalidCommand { command: "angles",
                                                      details: "usage: angles [rad|deg]".into(), }
                         .into()),
            },
            _ => Ok(None),
        }
    }

    fn list_variables(&self) -> String {
        let bindings = self.evaluator.variables();
        if bindings.is_empty() {
            return "No variables defined".to_string();
        }
        bindings.iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect::<Vec<_>>()
                .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Limits, error::ErrorKind};

    fn run(interpreter: &mut Interpreter, line: &str) -> String {
        interpreter.execute(line).unwrap().unwrap_or_default()
    }

    #[test]
    fn failed_assignment_keeps_previous_binding() {
        let mut interpreter = Interpreter::new();
        run(&mut interpreter, "x = 3");
        let err = interpreter.execute("x = 1 / 0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZeroDivision);
        assert_eq!(run(&mut interpreter, "x"), "3");
    }

    #[test]
    fn lists_variables_sorted() {
        let mut interpreter = Interpreter::new();
        assert_eq!(run(&mut interpreter, "vars"), "No variables defined");
        run(&mut interpreter, "b = 2");
        run(&mut interpreter, "A = 1");
        run(&mut interpreter, "f(x) = x + b");
        assert_eq!(run(&mut interpreter, "SHOW"), "a = 1\nb = 2\nf = x + b");
    }

    #[test]
    fn angle_mode_commands() {
        let mut interpreter = Interpreter::new();
        assert_eq!(run(&mut interpreter, "angles"), "angle mode: rad");
        assert_eq!(run(&mut interpreter, "angles DEG"), "angle mode set to deg");
        assert_eq!(run(&mut interpreter, "cos(180)"), "-1");
        assert_eq!(interpreter.execute("angles grad").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(interpreter.execute("angles rad deg").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn function_assignment_echoes_folded_body() {
        let mut interpreter = Interpreter::new();
        run(&mut interpreter, "k = 5");
        assert_eq!(run(&mut interpreter, "f(x) = k * x + 2 - 1"), "1 + 5 * x");
        assert_eq!(run(&mut interpreter, "f(2)"), "11");
    }

    #[test]
    fn query_inlines_or_evaluates() {
        let mut interpreter = Interpreter::new();
        run(&mut interpreter, "f(x) = x^2");
        assert_eq!(run(&mut interpreter, "f(y + 1) = ?"), "(y + 1)^2");
        assert_eq!(run(&mut interpreter, "f(3) + 1 = ?"), "10");
    }

    #[test]
    fn runaway_inlining_is_reported_unless_best_effort() {
        let limits = Limits { max_eval_depth: 32,
                              ..Limits::default() };
        let mut strict = Interpreter::with_config(Config { limits,
                                                           ..Config::default() });
        run(&mut strict, "f(x) = f(x)");
        let err = strict.execute("f(2) = ?").unwrap_err();
        assert!(err.to_string().contains("maximum recursion depth of 32"), "{err}");

        let mut lenient = Interpreter::with_config(Config { limits,
                                                            best_effort_inlining: true,
                                                            ..Config::default() });
        run(&mut lenient, "g(x) = x + 1");
        run(&mut lenient, "f(x) = f(x)");
        assert!(lenient.execute("f(2) = ?").is_err());
        assert_eq!(run(&mut lenient, "g(2) = ?"), "3");
    }
}

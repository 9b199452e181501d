use std::{fmt, str::FromStr};

/// Unit used by the trigonometric builtins for purely real operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    /// Operands are radians.
    #[default]
    Radians,
    /// Operands are degrees and are converted before the call.
    Degrees,
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radians => write!(f, "rad"),
            Self::Degrees => write!(f, "deg"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = String;

    /// Accepts `rad`, `radians`, `deg` and `degrees` in any case.
    ///
    /// # Example
    /// ```
    /// use computor::config::AngleMode;
    ///
    /// assert_eq!("DEG".parse::<AngleMode>(), Ok(AngleMode::Degrees));
    /// assert!("grad".parse::<AngleMode>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rad" | "radians" => Ok(Self::Radians),
            "deg" | "degrees" => Ok(Self::Degrees),
            other => Err(format!("unknown angle mode '{other}', expected rad or deg")),
        }
    }
}

/// Bounds on recursion so adversarial input fails with an error instead of
/// exhausting the native stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting of parentheses and square brackets in one parsed
    /// statement. Operators are not counted.
    pub max_depth:      usize,
    /// Maximum recursion depth of evaluation, function inlining and
    /// polynomial reduction, function calls included. A chain of binary
    /// operators at one level, such as `1 + 2 + 3`, counts once.
    pub max_eval_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_depth:      128,
               max_eval_depth: 256, }
    }
}

/// Interpreter settings.
///
/// # Example
/// ```
/// use computor::{Interpreter, config::{AngleMode, Config}};
///
/// let config = Config { angle_mode: AngleMode::Degrees, ..Config::default() };
/// let mut interpreter = Interpreter::with_config(config);
/// assert_eq!(interpreter.execute("sin(90)").unwrap().as_deref(), Some("1"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Initial angle mode of the evaluator.
    pub angle_mode:           AngleMode,
    /// When set, a failure while inlining user functions for `expr = ?` falls
    /// back to evaluating the original expression.
    pub best_effort_inlining: bool,
    /// Recursion bounds.
    pub limits:               Limits,
}

impl Config {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

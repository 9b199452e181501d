use std::fmt;

use crate::{
    config::AngleMode,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult, Evaluator},
            function::builtin,
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives its evaluated argument and the evaluator's angle mode.
type BuiltinFn = fn(&Value, AngleMode) -> EvalResult<Value>;

/// A handle to one entry of the builtin table.
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    func: BuiltinFn,
}

impl Builtin {
    /// The builtin's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the builtin.
    pub fn call(&self, argument: &Value, angle_mode: AngleMode) -> EvalResult<Value> {
        (self.func)(argument, angle_mode)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Builtin").field(&self.name).finish()
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry maps a lowercase name to the function pointer implementing it.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $func:expr
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, func: $func },
            )*
        ];
        /// Names of every builtin function, in table order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"   => builtin::sin,
    "cos"   => builtin::cos,
    "tan"   => builtin::tan,
    "exp"   => builtin::exp,
    "log"   => builtin::log,
    "sqrt"  => builtin::sqrt,
    "norm"  => builtin::norm,
    "inv"   => builtin::inv,
    "abs"   => builtin::abs,
    "floor" => |arg, _| builtin::round("floor", arg),
    "ceil"  => |arg, _| builtin::round("ceil", arg),
}

/// Finds a builtin by its lowercase name.
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<Builtin> {
    BUILTIN_TABLE.iter().find(|b| b.name == name).copied()
}

impl Evaluator {
    /// Calls `callee` with an already evaluated argument.
    ///
    /// A user function evaluates its body against a copy of `env` with the
    /// parameter bound to `argument`; nothing done there is visible to the
    /// caller. A builtin is invoked directly.
    ///
    /// # Parameters
    /// - `name`: The name used at the call site, for error messages.
    /// - `callee`: The value bound to `name`.
    /// - `argument`: The evaluated argument.
    /// - `env`: The caller's environment.
    /// - `depth`: Recursion depth of the call.
    ///
    /// # Errors
    /// `Type` if `callee` is not callable, plus anything the body raises.
    pub(crate) fn eval_call(&self,
                            name: &str,
                            callee: &Value,
                            argument: Value,
                            env: &Environment,
                            depth: usize)
                            -> EvalResult<Value> {
        match callee {
            Value::Function(function) => {
                let mut local = env.clone();
                local.insert(function.param.clone(), argument);
                self.eval_in(&function.body, &local, depth)
            },
            Value::Builtin(builtin) => builtin.call(&argument, self.angle_mode()),
            other => Err(RuntimeError::type_error(format!("'{name}' is not callable (it is a {})",
                                                          other.type_name()))),
        }
    }
}

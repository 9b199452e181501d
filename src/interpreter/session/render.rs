use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::Evaluator,
        value::{complex::Complex, core::Value, rational::Rational},
    },
};

/// Renders a function body with its constant parts folded.
///
/// Every subtree that does not mention `param` is evaluated against the
/// evaluator's current bindings and replaced by its value when that value is
/// a number. Additive chains are flattened: their rational constant terms are
/// summed into one leading term and the remaining terms follow in their
/// original order.
///
/// Subtrees that fail to evaluate are kept as written.
///
/// # Example
/// ```
/// use computor::{
///     ast::Statement,
///     config::Limits,
///     interpreter::{
///         evaluator::core::Evaluator,
///         lexer::tokenize,
///         parser::core::parse,
///         session::render::render_body,
///     },
/// };
///
/// let tokens = tokenize("f(x) = 2 * x + 3 + 4").unwrap();
/// let Ok(Statement::FunctionAssign { param, body, .. }) = parse(&tokens, &Limits::default())
/// else {
///     panic!("expected a function assignment");
/// };
/// assert_eq!(render_body(&Evaluator::new(), &body, &param).to_string(), "7 + 2 * x");
/// ```
#[must_use]
pub fn render_body(evaluator: &Evaluator, body: &Expr, param: &str) -> Expr {
    fold(evaluator, body, param, 0)
}

fn fold(evaluator: &Evaluator, expr: &Expr, param: &str, depth: usize) -> Expr {
    if depth > evaluator.limits().max_eval_depth {
        return expr.clone();
    }
    let next = depth + 1;

    if !expr.mentions(param) {
        if matches!(expr, Expr::Number(_) | Expr::Imaginary) {
            return expr.clone();
        }
        return evaluator.evaluate(expr)
                        .ok()
                        .and_then(|value| value_to_expr(&value))
                        .unwrap_or_else(|| expr.clone());
    }

    match expr {
        Expr::BinaryOp { op: BinaryOperator::Add | BinaryOperator::Sub,
                         .. } => fold_sum(evaluator, expr, param, next),
        Expr::BinaryOp { .. } => {
            let (start, links) =
                expr.left_chain_from_constant(param, |op| {
                        !matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
                    });
            let mut folded = fold(evaluator, start, param, next);
            for link in links {
                folded = Expr::binary(link.op, folded, fold(evaluator, link.right, param, next));
            }
            folded
        },
        Expr::UnaryOp { op, expr } => {
            Expr::UnaryOp { op:   *op,
                            expr: Box::new(fold(evaluator, expr, param, next)), }
        },
        Expr::Call { name, argument } => {
            Expr::Call { name:     name.clone(),
                         argument: Box::new(fold(evaluator, argument, param, next)), }
        },
        Expr::Matrix(rows) => {
            Expr::Matrix(rows.iter()
                             .map(|row| row.iter().map(|c| fold(evaluator, c, param, next)).collect())
                             .collect())
        },
        Expr::Number(_) | Expr::Variable(_) | Expr::Imaginary => expr.clone(),
    }
}

/// Splits an additive chain into signed terms, left to right.
///
/// The boolean is `true` for subtracted terms.
fn signed_terms(expr: &Expr) -> Vec<(bool, &Expr)> {
    let mut terms = Vec::new();
    let mut stack = vec![(false, expr)];
    while let Some((negative, node)) = stack.pop() {
        match node {
            Expr::BinaryOp { op: BinaryOperator::Add,
                             left,
                             right, } => {
                stack.push((negative, right));
                stack.push((negative, left));
            },
            Expr::BinaryOp { op: BinaryOperator::Sub,
                             left,
                             right, } => {
                stack.push((!negative, right));
                stack.push((negative, left));
            },
            _ => terms.push((negative, node)),
        }
    }
    terms
}

fn fold_sum(evaluator: &Evaluator, expr: &Expr, param: &str, depth: usize) -> Expr {
    let mut kept: Vec<(bool, Expr)> = Vec::new();
    let mut constant = Rational::zero();

    for (negative, term) in signed_terms(expr) {
        if !term.mentions(param)
           && let Ok(Value::Rational(value)) = evaluator.evaluate(term)
        {
            constant = if negative { &constant - &value } else { &constant + &value };
            continue;
        }
        kept.push((negative, fold(evaluator, term, param, depth)));
    }

    let mut terms = kept.into_iter();
    let mut result = if constant.is_zero() {
        match terms.next() {
            Some((true, first)) => Expr::negate(first),
            Some((false, first)) => first,
            None => return rational_expr(&constant),
        }
    } else {
        rational_expr(&constant)
    };
    for (negative, term) in terms {
        let op = if negative { BinaryOperator::Sub } else { BinaryOperator::Add };
        result = Expr::binary(op, result, term);
    }
    result
}

/// Builds an expression that prints as, and evaluates back to, `value`.
///
/// Only numbers have such a form.
fn value_to_expr(value: &Value) -> Option<Expr> {
    match value {
        Value::Rational(r) => Some(rational_expr(r)),
        Value::Complex(c) => Some(complex_expr(c)),
        _ => None,
    }
}

/// A negative sign goes on the numerator, so `-1 / 2` rather than `-(1 / 2)`.
fn rational_expr(r: &Rational) -> Expr {
    let magnitude = r.abs();
    let ratio = magnitude.as_ratio();
    let numerator = Expr::Number(ratio.numer().to_string());
    let numerator = if r.is_negative() { Expr::negate(numerator) } else { numerator };
    if magnitude.is_integer() {
        numerator
    } else {
        Expr::binary(BinaryOperator::Div, numerator, Expr::Number(ratio.denom().to_string()))
    }
}

fn complex_expr(c: &Complex) -> Expr {
    let imag = c.imag.abs();
    let imag_term = if imag.is_one() {
        Expr::Imaginary
    } else {
        Expr::binary(BinaryOperator::Mul, rational_expr(&imag), Expr::Imaginary)
    };

    if c.real.is_zero() {
        return if c.imag.is_negative() { Expr::negate(imag_term) } else { imag_term };
    }
    let op = if c.imag.is_negative() { BinaryOperator::Sub } else { BinaryOperator::Add };
    Expr::binary(op, rational_expr(&c.real), imag_term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Statement, config::Limits, interpreter::{lexer::tokenize, parser::core::parse}};

    fn rendered(evaluator: &Evaluator, line: &str) -> String {
        let tokens = tokenize(line).unwrap();
        let Ok(Statement::FunctionAssign { param, body, .. }) = parse(&tokens, &Limits::default())
        else {
            panic!("not a function assignment: {line}");
        };
        render_body(evaluator, &body, &param).to_string()
    }

    #[test]
    fn constants_collapse_into_leading_term() {
        let evaluator = Evaluator::new();
        assert_eq!(rendered(&evaluator, "f(x) = 2 * x + 3 + 4"), "7 + 2 * x");
        assert_eq!(rendered(&evaluator, "f(x) = 3 + x - 5"), "-2 + x");
        assert_eq!(rendered(&evaluator, "f(x) = 1 - x"), "1 - x");
        assert_eq!(rendered(&evaluator, "f(x) = x - 1 / 2"), "-1 / 2 + x");
    }

    #[test]
    fn terms_keep_their_order_without_a_constant() {
        let evaluator = Evaluator::new();
        assert_eq!(rendered(&evaluator, "f(x) = x^2 - 3 * x"), "x^2 - 3 * x");
        assert_eq!(rendered(&evaluator, "f(x) = 2 - 2 - x + x^2"), "-x + x^2");
        assert_eq!(rendered(&evaluator, "f(x) = 1 - 1"), "0");
    }

    #[test]
    fn bound_variables_are_substituted() {
        let mut evaluator = Evaluator::new();
        evaluator.assign("a", Rational::from(4).into()).unwrap();
        assert_eq!(rendered(&evaluator, "f(x) = a * x^2"), "4 * x^2");
        assert_eq!(rendered(&evaluator, "f(x) = x / 2 + a / 8"), "1 / 2 + x / 2");
        assert_eq!(rendered(&evaluator, "f(x) = a * a * x * a"), "16 * x * 4");
    }

    #[test]
    fn unbound_names_stay_symbolic() {
        let evaluator = Evaluator::new();
        assert_eq!(rendered(&evaluator, "f(x) = x + y + 1"), "1 + x + y");
        assert_eq!(rendered(&evaluator, "f(x) = sqrt(x) * 2^3"), "sqrt(x) * 8");
    }

    #[test]
    fn complex_constants_render_as_expressions() {
        let evaluator = Evaluator::new();
        assert_eq!(rendered(&evaluator, "f(x) = x + 2i + 1"), "1 + x + 2 * i");
    }
}

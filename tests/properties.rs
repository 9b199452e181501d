use computor::{
    Interpreter,
    ast::{BinaryOperator, Expr, Statement, UnaryOperator},
    config::Limits,
    interpreter::value::{matrix::Matrix, rational::Rational},
    parse, tokenize,
};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;

fn eval(interpreter: &mut Interpreter, line: &str) -> String {
    interpreter.execute(line)
               .unwrap_or_else(|e| panic!("'{line}' failed: {e}"))
               .unwrap_or_default()
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-hj-z][a-z]{0,3}".prop_filter("session command", |n| n != "vars" && n != "show")
}

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        "[0-9]{1,3}".prop_map(Expr::Number),
        identifier().prop_map(Expr::Variable),
        Just(Expr::Imaginary),
    ]
}

fn binary_operator() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![
        Just(BinaryOperator::Add),
        Just(BinaryOperator::Sub),
        Just(BinaryOperator::Mul),
        Just(BinaryOperator::Div),
        Just(BinaryOperator::Mod),
        Just(BinaryOperator::Pow),
        Just(BinaryOperator::MatMul),
    ]
}

fn expression() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(5, 48, 4, |inner| {
              prop_oneof![
                  (binary_operator(), inner.clone(), inner.clone())
                      .prop_map(|(op, l, r)| Expr::binary(op, l, r)),
                  inner.clone().prop_map(Expr::negate),
                  (identifier(), inner).prop_map(|(name, arg)| Expr::Call { name,
                                                                      argument: Box::new(arg) }),
                  prop::collection::vec(prop::collection::vec(leaf(), 1..3), 1..3)
                      .prop_map(Expr::Matrix),
              ]
          })
}

fn small_matrix(n: usize) -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(-9i64..=9, n), n)
}

proptest! {
    #[test]
    fn rational_sums_are_exact(a in -1000i64..1000, b in 1i64..1000, c in -1000i64..1000, d in 1i64..1000) {
        let mut interpreter = Interpreter::new();
        let output = eval(&mut interpreter, &format!("({a})/({b}) + ({c})/({d})"));

        let expected = BigRational::new(BigInt::from(a), BigInt::from(b))
                       + BigRational::new(BigInt::from(c), BigInt::from(d));
        prop_assert_eq!(&output, &expected.to_string());

        let lcm = BigInt::from(b).lcm(&BigInt::from(d));
        prop_assert!((lcm % expected.denom()).is_zero());
    }

    #[test]
    fn matrix_times_inverse_is_identity(entries in (1usize..4).prop_flat_map(small_matrix)) {
        let n = entries.len();
        let rows = entries.iter()
                          .map(|row| row.iter().map(|x| Rational::from(*x)).collect())
                          .collect();
        let matrix = Matrix::new(rows).unwrap();
        if let Ok(inverse) = matrix.inverse() {
            prop_assert_eq!(matrix.matmul(&inverse).unwrap(), Matrix::identity(n).unwrap());
            prop_assert_eq!(inverse.matmul(&matrix).unwrap(), Matrix::identity(n).unwrap());
        }
    }

    #[test]
    fn names_are_case_insensitive(name in identifier(), value in -100i64..100, upper in prop::collection::vec(any::<bool>(), 4)) {
        let mixed = name.chars()
                        .zip(upper.iter().cycle())
                        .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                        .collect::<String>();
        let mut interpreter = Interpreter::new();
        eval(&mut interpreter, &format!("{mixed} = {value}"));
        prop_assert_eq!(eval(&mut interpreter, &name), value.to_string());
        prop_assert_eq!(eval(&mut interpreter, &name.to_ascii_uppercase()), value.to_string());
    }

    #[test]
    fn printed_expressions_parse_back(expr in expression()) {
        let text = expr.to_string();
        let tokens = tokenize(&text).unwrap_or_else(|e| panic!("'{text}' does not lex: {e}"));
        let reparsed = parse(&tokens, &Limits::default())
                           .unwrap_or_else(|e| panic!("'{text}' does not parse: {e}"));
        prop_assert_eq!(reparsed, Statement::Expression(expr), "printed as '{}'", text);
    }

    #[test]
    fn quadratics_pick_the_discriminant_branch(a in -20i64..20, b in -20i64..20, c in -20i64..20) {
        prop_assume!(a != 0);
        let mut interpreter = Interpreter::new();
        let report = eval(&mut interpreter, &format!("({a}) * x^2 + ({b}) * x + ({c}) = 0 ?"));

        prop_assert!(report.contains("Polynomial degree: 2"), "{}", report);
        let discriminant = b * b - 4 * a * c;
        prop_assert!(report.contains(&format!("Discriminant: {discriminant}\n")), "{}", report);
        let branch = match discriminant.signum() {
            1 => "strictly positive, the two solutions",
            0 => "zero, the solution",
            _ => "strictly negative, the two complex solutions",
        };
        prop_assert!(report.contains(branch), "{}", report);
    }

    #[test]
    fn linear_roots_satisfy_the_equation(b in 1i64..50, c in -50i64..50) {
        let mut interpreter = Interpreter::new();
        let report = eval(&mut interpreter, &format!("{b} * y + ({c}) = 0 ?"));
        let root = report.lines().last().unwrap_or_default().to_string();

        eval(&mut interpreter, &format!("y = {root}"));
        prop_assert_eq!(eval(&mut interpreter, &format!("{b} * y + ({c})")), "0");
    }
}

#[test]
fn unary_minus_binds_tighter_than_power() {
    let tokens = tokenize("-x^2").unwrap();
    let parsed = parse(&tokens, &Limits::default()).unwrap();
    let negated = Expr::UnaryOp { op:   UnaryOperator::Negate,
                                  expr: Box::new(Expr::Variable("x".into())), };
    assert_eq!(parsed,
               Statement::Expression(Expr::binary(BinaryOperator::Pow,
                                                  negated,
                                                  Expr::Number("2".into()))));
}

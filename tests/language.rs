use std::fs::{self};

use computor::{
    Interpreter,
    config::{Config, Limits},
    error::ErrorKind,
};
use walkdir::WalkDir;

/// Runs the examples of the book.
///
/// In a ```computor block, lines starting with `> ` are input and the lines
/// after each input, up to the next input, are its expected output. An input
/// whose output starts with `Error: ` must fail with that message.
#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, block) in extract_computor_blocks(&content).into_iter().enumerate() {
            count += 1;
            let mut interpreter = Interpreter::new();
            for (input, expected) in block {
                let actual = match interpreter.execute(&input) {
                    Ok(output) => output.unwrap_or_default(),
                    Err(e) => format!("Error: {e}"),
                };
                assert_eq!(actual, expected,
                           "example {} in {:?} failed on input '{}'",
                           i + 1,
                           path,
                           input);
            }
        }
    }

    assert!(count > 0, "No computor examples found in book/src");
}

fn extract_computor_blocks(content: &str) -> Vec<Vec<(String, String)>> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut block: Vec<(String, Vec<String>)> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```computor") {
            inside = true;
            block.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(block.drain(..)
                             .map(|(input, output)| (input, output.join("\n")))
                             .collect());
            continue;
        }
        if inside {
            if let Some(input) = line.strip_prefix("> ") {
                block.push((input.to_string(), Vec::new()));
            } else if let Some((_, output)) = block.last_mut() {
                output.push(line.to_string());
            }
        }
    }

    blocks
}

/// Runs every line in one session and returns the output of the last one.
fn run(lines: &[&str]) -> String {
    let mut interpreter = Interpreter::new();
    let mut last = None;
    for line in lines {
        last = interpreter.execute(line)
                          .unwrap_or_else(|e| panic!("'{line}' failed: {e}"));
    }
    last.unwrap_or_default()
}

fn assert_output(lines: &[&str], expected: &str) {
    assert_eq!(run(lines), expected, "script: {lines:?}");
}

fn assert_failure(lines: &[&str], kind: ErrorKind) {
    let mut interpreter = Interpreter::new();
    let (last, setup) = lines.split_last().expect("at least one line");
    for line in setup {
        interpreter.execute(line)
                   .unwrap_or_else(|e| panic!("setup line '{line}' failed: {e}"));
    }
    match interpreter.execute(last) {
        Ok(output) => panic!("'{last}' succeeded with {output:?} but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "'{last}' failed with the wrong error: {e}"),
    }
}

#[test]
fn basic_arithmetic() {
    assert_output(&["2 + 3"], "5");
    assert_output(&["15 / 3"], "5");
    assert_output(&["7 / 2"], "7/2");
    assert_output(&["(2 + 3) * 4"], "20");
    assert_output(&["2 + 3 * 4"], "14");
    assert_output(&["1.5 + 0.25"], "7/4");
    assert_output(&["7 % 3"], "1");
    assert_output(&["-7 % 3"], "2");
}

#[test]
fn powers() {
    assert_output(&["2 ^ 3 ^ 2"], "512");
    assert_output(&["2 ^ -1"], "1/2");
    assert_output(&["(2/3)^2"], "4/9");
    assert_output(&["4 ^ 0.5"], "2");
    assert_output(&["0 ^ 0"], "1");
}

#[test]
fn implicit_multiplication() {
    assert_output(&["x = 3", "2x"], "6");
    assert_output(&["2(3 + 1)"], "8");
    assert_output(&["x = 3", "(x + 1)(x - 1)"], "8");
}

#[test]
fn variables_are_case_insensitive() {
    assert_output(&["Var = 10", "var"], "10");
    assert_output(&["varA = 2", "VARA * 3"], "6");
    assert_output(&["a = 1", "A = 2", "a"], "2");
}

#[test]
fn assignment_echoes_value() {
    assert_output(&["x = 2 * 3"], "6");
    assert_output(&["z = 2i + 1"], "1 + 2i");
    assert_output(&["m = [[1, 2]; [3, 4]]"], "[ 1 , 2 ]\n[ 3 , 4 ]");
}

#[test]
fn complex_numbers() {
    assert_output(&["2 * i + 3"], "3 + 2i");
    assert_output(&["3 - 4I"], "3 - 4i");
    assert_output(&["i * i"], "-1");
    assert_output(&["-i"], "-i");
    assert_output(&["(1 + i) * (1 - i)"], "2");
    assert_output(&["(3 + 4i) / (1 - 2i)"], "-1 + 2i");
    assert_output(&["sqrt(-4)"], "2i");
    assert_output(&["norm(3 + 4i)"], "5");
}

#[test]
fn matrices() {
    assert_output(&["A = [[1, 2], [3, 4]]", "inv(A)"], "[ -2 , 1 ]\n[ 3/2 , -1/2 ]");
    assert_output(&["A = [[1, 2], [3, 4]]", "A ** inv(A)"], "[ 1 , 0 ]\n[ 0 , 1 ]");
    assert_output(&["vrow = [[5, 6]]", "vcol = [[5], [6]]", "vrow * vcol"], "[ 61 ]");
    assert_output(&["[1, 2; 3, 4] * [[1, 2], [3, 4]]"], "[ 1 , 4 ]\n[ 9 , 16 ]");
    assert_output(&["[[1, 2]] * 3"], "[ 3 , 6 ]");
    assert_output(&["[[2, 4]] / 4"], "[ 1/2 , 1 ]");
    assert_output(&["-[[1, -2]]"], "[ -1 , 2 ]");
    assert_output(&["[[1, 1], [0, 1]] ^ 3"], "[ 1 , 3 ]\n[ 0 , 1 ]");
    assert_output(&["[[2, 0], [0, 4]] ^ -1"], "[ 1/2 , 0 ]\n[ 0 , 1/4 ]");
    assert_output(&["[[1, 2], [3, 4]] ^ 0"], "[ 1 , 0 ]\n[ 0 , 1 ]");
    assert_output(&["norm([[3, 4]])"], "5");
    assert_output(&["abs([[-1, 2]])"], "[ 1 , 2 ]");
}

#[test]
fn matrices_accept_trailing_separators() {
    assert_output(&["[1, 2;]"], "[ 1 , 2 ]");
    assert_output(&["[1, 2; 3, 4;]"], "[ 1 , 2 ]\n[ 3 , 4 ]");
    assert_output(&["[[1, 2],]"], "[ 1 , 2 ]");
    assert_output(&["[[1, 2]; [3, 4];]"], "[ 1 , 2 ]\n[ 3 , 4 ]");
    assert_output(&["[1, 2,]"], "[ 1 , 2 ]");
    assert_output(&["[[1, 2,], [3, 4,]]"], "[ 1 , 2 ]\n[ 3 , 4 ]");
    assert_failure(&["[;]"], ErrorKind::Parse);
    assert_failure(&["[1, 2;;]"], ErrorKind::Parse);
}

#[test]
fn builtins() {
    assert_output(&["sqrt(16)"], "4");
    assert_output(&["sqrt(9/4)"], "3/2");
    assert_output(&["abs(-5)"], "5");
    assert_output(&["floor(7/2)"], "3");
    assert_output(&["ceil(7/2)"], "4");
    assert_output(&["floor(-7/2)"], "-4");
    assert_output(&["exp(0)"], "1");
    assert_output(&["log(1)"], "0");
    assert_output(&["cos(0)"], "1");
    assert_output(&["inv(4)"], "1/4");
    assert_output(&["inv(i)"], "-i");
    assert_output(&["sqrt"], "<builtin sqrt>");
}

#[test]
fn degrees_apply_to_real_operands_only() {
    assert_output(&["angles deg", "sin(30)"], "1/2");
    assert_output(&["angles deg", "cos(90)"], "0");
    assert_output(&["angles deg", "angles rad", "sin(0)"], "0");
}

#[test]
fn user_functions() {
    assert_output(&["f(x) = x * 2"], "x * 2");
    assert_output(&["f(x) = x * 2", "f(3)"], "6");
    assert_output(&["F(X) = X^2 + 1", "f(2)"], "5");
    assert_output(&["f(x) = x + 1", "g(x) = 2 * x", "g(f(3))"], "8");
    assert_output(&["f(t) = t * t", "f(i)"], "-1");
    assert_output(&["f(x) = x + 1", "f"], "x + 1");
}

#[test]
fn function_echo_leads_with_the_constant() {
    assert_output(&["f(x) = 1 - x"], "1 - x");
    assert_output(&["f(x) = 2 * x + 3 + 4"], "7 + 2 * x");
    assert_output(&["a = 3", "f(x) = x^2 - x + a"], "3 + x^2 - x");
    assert_output(&["f(x) = 2 * x + 3 + 4", "f"], "2 * x + 3 + 4");
}

#[test]
fn function_calls_see_current_bindings() {
    assert_output(&["a = 1", "g(x) = x + a", "a = 5", "g(1)"], "6");
    assert_output(&["x = 10", "f(x) = x + 1", "f(2)", "x"], "10");
}

#[test]
fn builtins_can_be_shadowed() {
    assert_output(&["sqrt(x) = x + 1", "sqrt(4)"], "5");
    assert_output(&["exp = 3", "exp * 2"], "6");
}

#[test]
fn inlining_queries() {
    assert_output(&["f(x) = x + 1", "f(f(2)) = ?"], "4");
    assert_output(&["f(x) = 2 * x", "f(y) = ?"], "2 * y");
    assert_output(&["2 + 2 = ?"], "4");
}

#[test]
fn solver_reports() {
    assert_output(&["x^2 - 5*x + 6 = 0 ?"],
                  "Reduced form: x^2 - 5 * x + 6 = 0\nPolynomial degree: 2\nDiscriminant: 1\n\
                   Discriminant is strictly positive, the two solutions are:\n3\n2");
    assert_output(&["2 * x + 4 = 0 ?"],
                  "Reduced form: 2 * x + 4 = 0\nPolynomial degree: 1\nThe solution is:\n-2");
    assert_output(&["x^2 + 1 = 0 ?"],
                  "Reduced form: x^2 + 1 = 0\nPolynomial degree: 2\nDiscriminant: -4\n\
                   Discriminant is strictly negative, the two complex solutions are:\ni\n-i");
    assert_output(&["x^2 - 2*x + 1 = 0 ?"],
                  "Reduced form: x^2 - 2 * x + 1 = 0\nPolynomial degree: 2\nDiscriminant: 0\n\
                   Discriminant is zero, the solution is:\n1");
    assert_output(&["x^3 = 1 ?"],
                  "Reduced form: x^3 - 1 = 0\nPolynomial degree: 3\n\
                   The polynomial degree is strictly greater than 2, I can't solve.");
}

#[test]
fn solver_degenerate_equations() {
    assert_output(&["x + 1 = x + 1 ?"],
                  "Reduced form: 0 = 0\nPolynomial degree: 0\nAll real numbers are solutions");
    assert_output(&["x + 1 = x + 2 ?"],
                  "Reduced form: -1 = 0\nPolynomial degree: 0\nNo solution");
    assert_output(&["2 + 2 = 4 ?"], "The equation is always true");
    assert_output(&["1 = 2 ?"], "The equation has no solution");
}

#[test]
fn solver_uses_bindings_and_functions() {
    assert_output(&["a = 2", "a * y = 4 ?"],
                  "Reduced form: 2 * y - 4 = 0\nPolynomial degree: 1\nThe solution is:\n2");
    assert_output(&["f(x) = x^2 - 5 * x", "f(x) = -6 ?"],
                  "Reduced form: x^2 - 5 * x + 6 = 0\nPolynomial degree: 2\nDiscriminant: 1\n\
                   Discriminant is strictly positive, the two solutions are:\n3\n2");
    assert_output(&["(x + 1)^2 = 0 ?"],
                  "Reduced form: x^2 + 2 * x + 1 = 0\nPolynomial degree: 2\nDiscriminant: 0\n\
                   Discriminant is zero, the solution is:\n-1");
    assert_output(&["x / 2 = 3 ?"],
                  "Reduced form: 1/2 * x - 3 = 0\nPolynomial degree: 1\nThe solution is:\n6");
}

#[test]
fn lexing_errors() {
    assert_failure(&["2 $ 3"], ErrorKind::Lex);
    assert_failure(&["x_1 = 2"], ErrorKind::Lex);
}

#[test]
fn parsing_errors() {
    assert_failure(&["2 +- 3"], ErrorKind::Parse);
    assert_failure(&["--2"], ErrorKind::Parse);
    assert_failure(&["i = 2"], ErrorKind::Parse);
    assert_failure(&["f(i) = 2"], ErrorKind::Parse);
    assert_failure(&["i(x) = 2"], ErrorKind::Parse);
    assert_failure(&["[]"], ErrorKind::Parse);
    assert_failure(&["(2 + 3"], ErrorKind::Parse);
    assert_failure(&["2 3 )"], ErrorKind::Parse);
    assert_failure(&["x = 2 ?"], ErrorKind::Parse);
    assert_failure(&["x1 = 2"], ErrorKind::Parse);
    assert_failure(&["= 2"], ErrorKind::Parse);
}

#[test]
fn runtime_errors() {
    assert_failure(&["y + 1"], ErrorKind::Name);
    assert_failure(&["h(2)"], ErrorKind::Name);
    assert_failure(&["1 / 0"], ErrorKind::ZeroDivision);
    assert_failure(&["5 % 0"], ErrorKind::ZeroDivision);
    assert_failure(&["inv([[1, 2], [2, 4]])"], ErrorKind::ZeroDivision);
    assert_failure(&["inv(0)"], ErrorKind::ZeroDivision);
    assert_failure(&["(1 + i) ^ 2"], ErrorKind::Type);
    assert_failure(&["i % 2"], ErrorKind::Type);
    assert_failure(&["x = 2", "x(3)"], ErrorKind::Type);
    assert_failure(&["floor(i)"], ErrorKind::Type);
    assert_failure(&["[[1, 2], [3]]"], ErrorKind::Value);
    assert_failure(&["[[1, 2]] + [[1], [2]]"], ErrorKind::Value);
    assert_failure(&["[[1, 2]] ** [[1, 2]]"], ErrorKind::Value);
    assert_failure(&["2 ** 3"], ErrorKind::Type);
    assert_failure(&["log(0)"], ErrorKind::Value);
}

#[test]
fn solver_errors() {
    assert_failure(&["1 / x = 2 ?"], ErrorKind::Value);
    assert_failure(&["x ^ x = 1 ?"], ErrorKind::Value);
    assert_failure(&["x ^ 2.5 = 1 ?"], ErrorKind::Value);
    assert_failure(&["x = 2", "x + [[1]] = 3 ?"], ErrorKind::Type);
    assert_failure(&["x * i = 1 ?"], ErrorKind::Type);
}

#[test]
fn failures_do_not_change_bindings() {
    let mut interpreter = Interpreter::new();
    interpreter.execute("x = 2").unwrap();
    assert!(interpreter.execute("x = y").is_err());
    assert!(interpreter.execute("x = 1 / 0").is_err());
    assert!(interpreter.execute("x +- 1").is_err());
    assert_eq!(interpreter.execute("x").unwrap().as_deref(), Some("2"));
}

/// `first op first op ... ` with `count` operands.
fn chain(first: &str, op: &str, count: usize) -> String {
    vec![first; count].join(op)
}

#[test]
fn long_chains_are_not_charged_per_operator() {
    assert_output(&[&chain("1", " + ", 1000)], "1000");
    assert_output(&[&chain("2", " * ", 300)], &(num_bigint::BigInt::from(2u32) << 299usize).to_string());
    assert_output(&[&format!("{} = 0 ?", chain("x", " + ", 300))],
                  "Reduced form: 300 * x = 0\nPolynomial degree: 1\nThe solution is:\n0");
    assert_output(&[&format!("f(x) = {}", chain("x", " - ", 400)), "f(2)"], "-796");
}

/// Runs a session of 100 000-operand chains and collects each line's result.
fn long_chain_session() -> Vec<Result<String, String>> {
    let sum = chain("1", " + ", 100_000);
    let body = chain("x", " + ", 100_000);
    let lines = [sum,
                 format!("f(x) = {body}"),
                 "f(3)".to_string(),
                 "f(1) = ?".to_string(),
                 format!("{body} = 5 ?")];

    let mut interpreter = Interpreter::new();
    lines.iter()
         .map(|line| {
             interpreter.execute(line)
                        .map(Option::unwrap_or_default)
                        .map_err(|e| e.to_string())
         })
         .collect()
}

#[test]
fn very_long_chains_fit_a_small_stack() {
    let results = std::thread::Builder::new().stack_size(2 * 1024 * 1024)
                                             .spawn(long_chain_session)
                                             .expect("spawn worker")
                                             .join()
                                             .expect("worker overflowed its stack");

    assert_eq!(results[0].as_deref(), Ok("100000"));
    assert_eq!(results[1].as_deref(), Ok(chain("x", " + ", 100_000).as_str()));
    assert_eq!(results[2].as_deref(), Ok("300000"));
    assert_eq!(results[3].as_deref(), Ok("100000"));
    assert_eq!(results[4].as_deref(),
               Ok("Reduced form: 100000 * x - 5 = 0\nPolynomial degree: 1\nThe solution is:\n\
                   1/20000"));
}

#[test]
fn deep_nesting_is_rejected() {
    let line = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    assert_failure(&[&line], ErrorKind::Parse);
}

#[test]
fn nesting_limit_counts_brackets_only() {
    let limits = Limits { max_depth: 3,
                          ..Limits::default() };
    let mut interpreter = Interpreter::with_config(Config { limits,
                                                            ..Config::default() });

    let flat = format!("{} * 2 ^ 2", chain("1", " + ", 50));
    assert_eq!(interpreter.execute(&flat).unwrap().as_deref(), Some("53"));
    assert_eq!(interpreter.execute("[[(1)]]").unwrap().as_deref(), Some("[ 1 ]"));
    let err = interpreter.execute("[[((1))]]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse, "{err}");
}

use computor::{
    error::ErrorKind,
    interpreter::value::{complex::Complex, core::Value, matrix::Matrix, rational::Rational},
};

fn r(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

fn matrix(rows: &[&[i64]]) -> Matrix {
    Matrix::new(rows.iter()
                    .map(|row| row.iter().copied().map(Rational::from).collect())
                    .collect())
    .unwrap()
}

#[test]
fn rationals_stay_in_lowest_terms() {
    assert_eq!(r(6, 8).to_string(), "3/4");
    assert_eq!(r(3, -6).to_string(), "-1/2");
    assert_eq!(r(10, 5).to_string(), "2");
    assert_eq!(Rational::new(1, 0).unwrap_err().kind(), ErrorKind::ZeroDivision);
}

#[test]
fn rational_arithmetic() {
    assert_eq!(&r(1, 3) + &r(1, 6), r(1, 2));
    assert_eq!(&r(1, 2) * &r(2, 3), r(1, 3));
    assert_eq!(r(1, 2).checked_div(&r(1, 4)).unwrap(), Rational::from(2));
    assert_eq!(r(7, 2).checked_rem(&r(-2, 1)).unwrap(), r(-1, 2));
    assert_eq!(r(2, 3).powi(-2).unwrap(), r(9, 4));
    assert_eq!(r(-7, 2).floor(), Rational::from(-4));
    assert_eq!(r(-7, 2).ceil(), Rational::from(-3));
    assert!(r(1, 3) < r(1, 2));
}

#[test]
fn exponents_are_capped() {
    let err = Rational::from(2).powi(1_000_000).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    assert_eq!(Rational::from(1).powi(1_000_000).unwrap(), Rational::one());
    assert_eq!(Rational::from(-1).powi(1_000_001).unwrap(), Rational::from(-1));
}

#[test]
fn square_roots() {
    assert_eq!(r(49, 64).sqrt().unwrap().unwrap(), r(7, 8));
    assert!(r(-1, 4).sqrt().is_none());
    let approx = Rational::from(2).sqrt().unwrap().unwrap();
    assert!((approx.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-9);
}

#[test]
fn complex_formatting() {
    let c = |re: i64, im: i64| Complex::new(Rational::from(re), Rational::from(im));
    assert_eq!(c(3, 0).to_string(), "3");
    assert_eq!(c(0, 1).to_string(), "i");
    assert_eq!(c(0, -1).to_string(), "-i");
    assert_eq!(c(0, 5).to_string(), "5i");
    assert_eq!(c(2, 1).to_string(), "2 + i");
    assert_eq!(c(2, -3).to_string(), "2 - 3i");
    assert_eq!(Complex::new(r(1, 2), r(-3, 4)).to_string(), "1/2 - 3/4i");
}

#[test]
fn complex_arithmetic_demotes_real_results() {
    let a = Complex::new(Rational::from(1), Rational::from(2));
    assert_eq!((&a * &a.conj()).demote(), Value::Rational(Rational::from(5)));
    assert_eq!(a.checked_div(&a).unwrap().demote(), Value::Rational(Rational::one()));
    assert_eq!(Complex::default().recip().unwrap_err().kind(), ErrorKind::ZeroDivision);
}

#[test]
fn matrices_must_be_rectangular() {
    assert_eq!(Matrix::new(vec![]).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(Matrix::new(vec![vec![]]).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(Matrix::new(vec![vec![Rational::one()], vec![]]).unwrap_err().kind(),
               ErrorKind::Value);
}

#[test]
fn matrix_products() {
    let a = matrix(&[&[1, 2], &[3, 4]]);
    let b = matrix(&[&[0, 1], &[1, 0]]);
    assert_eq!(a.matmul(&b).unwrap(), matrix(&[&[2, 1], &[4, 3]]));
    assert_eq!(a.hadamard(&b).unwrap(), matrix(&[&[0, 2], &[3, 0]]));
    assert_eq!(matrix(&[&[1, 2, 3]]).matmul(&matrix(&[&[1], &[1], &[1]])).unwrap(),
               matrix(&[&[6]]));
    assert_eq!(a.matmul(&matrix(&[&[1, 2, 3]])).unwrap_err().kind(), ErrorKind::Value);
}

#[test]
fn matrix_inverse_is_exact() {
    let a = matrix(&[&[2, 1, 0], &[1, 3, 1], &[0, 1, 4]]);
    let inverse = a.inverse().unwrap();
    assert_eq!(a.matmul(&inverse).unwrap(), Matrix::identity(3).unwrap());
    assert_eq!(matrix(&[&[1, 2], &[2, 4]]).inverse().unwrap_err().kind(),
               ErrorKind::ZeroDivision);
    assert_eq!(matrix(&[&[1, 2]]).inverse().unwrap_err().kind(), ErrorKind::Value);
}

#[test]
fn matrix_powers() {
    let a = matrix(&[&[1, 1], &[1, 0]]);
    assert_eq!(a.powi(10).unwrap(), matrix(&[&[89, 55], &[55, 34]]));
    assert_eq!(a.powi(0).unwrap(), Matrix::identity(2).unwrap());
    assert_eq!(a.powi(-1).unwrap(), matrix(&[&[0, 1], &[1, -1]]));
}

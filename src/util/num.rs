use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Largest denominator kept when a floating-point result is wrapped back into
/// an exact rational.
pub const MAX_DENOMINATOR: u32 = 1_000_000;

/// Largest exponent accepted by exact integer powers.
///
/// Larger exponents would build numbers with millions of digits from a one
/// line input.
pub const MAX_EXACT_EXPONENT: u64 = 4096;

/// Returns the closest rational to `value` whose denominator does not exceed
/// `max_denominator`.
///
/// Uses the continued fraction expansion of `value`; among the last convergent
/// and the best semiconvergent, the nearer one is returned (the convergent on
/// ties).
///
/// ## Parameters
/// - `value`: The rational to approximate.
/// - `max_denominator`: Upper bound for the result's denominator. Must be at
///   least one.
///
/// ## Example
/// ```
/// use computor::util::num::limit_denominator;
/// use num_bigint::BigInt;
/// use num_rational::BigRational;
///
/// let pi = BigRational::new(BigInt::from(314_159_265), BigInt::from(100_000_000));
/// let approx = limit_denominator(&pi, &BigInt::from(1000));
/// assert_eq!(approx, BigRational::new(BigInt::from(355), BigInt::from(113)));
/// ```
#[must_use]
pub fn limit_denominator(value: &BigRational, max_denominator: &BigInt) -> BigRational {
    if value.denom() <= max_denominator {
        return value.clone();
    }

    let (mut p0, mut q0) = (BigInt::zero(), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::zero());
    let mut n = value.numer().clone();
    let mut d = value.denom().clone();

    loop {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if &q2 > max_denominator {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let rem = &n - &a * &d;
        n = std::mem::replace(&mut d, rem);
    }

    let k = (max_denominator - &q0).div_floor(&q1);
    let bound1 = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let bound2 = BigRational::new(p1, q1);

    if (&bound2 - value).abs() <= (&bound1 - value).abs() {
        bound2
    } else {
        bound1
    }
}

/// Converts a finite `f64` into the nearest rational with a denominator of at
/// most [`MAX_DENOMINATOR`].
///
/// ## Returns
/// - `Some(BigRational)`: The approximation.
/// - `None`: If `value` is NaN or infinite.
///
/// ## Example
/// ```
/// use computor::util::num::f64_to_ratio;
/// use num_bigint::BigInt;
/// use num_rational::BigRational;
///
/// let half = f64_to_ratio(0.5).unwrap();
/// assert_eq!(half, BigRational::new(BigInt::from(1), BigInt::from(2)));
///
/// assert!(f64_to_ratio(f64::NAN).is_none());
/// ```
#[must_use]
pub fn f64_to_ratio(value: f64) -> Option<BigRational> {
    let exact = BigRational::from_float(value)?;
    Some(limit_denominator(&exact, &BigInt::from(MAX_DENOMINATOR)))
}

/// Converts a rational into the nearest `f64`.
///
/// Values whose numerator or denominator overflow an `f64` are scaled down
/// first, so huge but finite ratios still convert to a finite value when the
/// quotient itself is representable.
#[must_use]
pub fn ratio_to_f64(value: &BigRational) -> f64 {
    if let Some(f) = value.to_f64()
       && f.is_finite()
    {
        return f;
    }

    let numer_bits = value.numer().bits();
    let denom_bits = value.denom().bits();
    let shift = numer_bits.max(denom_bits).saturating_sub(1000);
    let numer = (value.numer() >> shift).to_f64().unwrap_or(f64::NAN);
    let denom = (value.denom() >> shift).to_f64().unwrap_or(f64::NAN);

    numer / denom
}

/// Returns the value as an `i64` if it is an integer that fits.
///
/// ## Example
/// ```
/// use computor::util::num::ratio_to_i64;
/// use num_bigint::BigInt;
/// use num_rational::BigRational;
///
/// assert_eq!(ratio_to_i64(&BigRational::from_integer(BigInt::from(-7))), Some(-7));
/// assert_eq!(ratio_to_i64(&BigRational::new(BigInt::from(1), BigInt::from(2))), None);
/// ```
#[must_use]
pub fn ratio_to_i64(value: &BigRational) -> Option<i64> {
    if value.is_integer() {
        value.numer().to_i64()
    } else {
        None
    }
}

/// Converts an exponent magnitude into a `usize` bounded by
/// [`MAX_EXACT_EXPONENT`].
///
/// ## Returns
/// `None` if the exponent exceeds the bound.
#[must_use]
pub fn exponent_to_usize(exponent: u64) -> Option<usize> {
    if exponent > MAX_EXACT_EXPONENT {
        return None;
    }
    usize::try_from(exponent).ok()
}

/// Returns the exact square root of a non-negative integer if it is a perfect
/// square.
#[must_use]
pub fn exact_isqrt(value: &BigInt) -> Option<BigInt> {
    if value.is_negative() {
        return None;
    }
    let root = num_integer::Roots::sqrt(value);
    if &root * &root == *value { Some(root) } else { None }
}

//! Lagrange interpolation over the integers.
//!
//! For k points (x_j, y_j) on a polynomial f of degree at most k - 1,
//!
//!   f(a) = sum_i  y_i * prod_{j != i} (a - x_j) / (x_i - x_j)
//!
//! Shamir's secret is f(0). Nothing is reduced modulo a prime here, so
//! everything is carried as exact integers. Each term is divided on its
//! own; when a term leaves a remainder the remainder is kept as a
//! fraction and folded into the sum, because individual terms need not
//! be integers even when f has integer coefficients (try x = 1, 2, 4).
//! What must be an integer is the sum. If it is not, the shares are
//! inconsistent (or k is wrong) and we report that instead of rounding.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use thiserror::Error;

use crate::point::Point;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("no points to interpolate")]
    Empty,

    #[error("points {first} and {second} share x = {x}")]
    DuplicateX { first: usize, second: usize, x: BigInt },

    #[error(
        "interpolated value is not an integer (fractional part {remainder}/{denominator}), \
         first inexact term is {index} (x = {x})"
    )]
    InexactDivision { index: usize, x: BigInt, remainder: BigInt, denominator: BigInt },

    #[error("point at x = {x} has y = {actual}, polynomial gives {expected}")]
    Mismatch { x: BigInt, expected: BigInt, actual: BigInt },
}

/// Recover the secret, i.e. the value of the polynomial at x = 0.
pub fn secret(points: &[Point]) -> Result<BigInt, InterpolationError> {
    reconstruct(points, &BigInt::zero())
}

/// Evaluate the polynomial through `points` at `at_x`.
pub fn reconstruct(points: &[Point], at_x: &BigInt) -> Result<BigInt, InterpolationError> {
    if points.is_empty() {
        return Err(InterpolationError::Empty);
    }
    check_distinct(points)?;

    let mut result = BigInt::zero();
    // sum of the remainders, as a fraction
    let mut frac_num = BigInt::zero();
    let mut frac_den = BigInt::one();
    let mut first_inexact = None;

    for (i, pi) in points.iter().enumerate() {
        let mut numerator = BigInt::one();
        let mut denominator = BigInt::one();
        for (j, pj) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator *= at_x - &pj.x;
            denominator *= &pi.x - &pj.x;
        }

        let (term, remainder) = (&pi.y * numerator).div_rem(&denominator);
        result += term;
        if !remainder.is_zero() {
            first_inexact.get_or_insert(i);
            frac_num = frac_num * &denominator + remainder * &frac_den;
            frac_den *= denominator;
            let g = frac_num.gcd(&frac_den);
            if !g.is_one() {
                frac_num /= &g;
                frac_den /= &g;
            }
        }
    }

    if let Some(index) = first_inexact {
        if frac_den.is_negative() {
            frac_num = -frac_num;
            frac_den = -frac_den;
        }
        let (whole, remainder) = frac_num.div_rem(&frac_den);
        if !remainder.is_zero() {
            return Err(InterpolationError::InexactDivision {
                index,
                x: points[index].x.clone(),
                remainder,
                denominator: frac_den,
            });
        }
        result += whole;
    }
    Ok(result)
}

fn check_distinct(points: &[Point]) -> Result<(), InterpolationError> {
    for (i, a) in points.iter().enumerate() {
        if let Some(j) = points[i + 1..].iter().position(|b| b.x == a.x) {
            return Err(InterpolationError::DuplicateX {
                first: i,
                second: i + 1 + j,
                x: a.x.clone(),
            });
        }
    }
    Ok(())
}

/// Check that every point in `extra` lies on the polynomial through
/// `points`. Returns how many were checked.
pub fn verify(points: &[Point], extra: &[Point]) -> Result<usize, InterpolationError> {
    for p in extra {
        let expected = reconstruct(points, &p.x)?;
        if expected != p.y {
            return Err(InterpolationError::Mismatch {
                x: p.x.clone(),
                expected,
                actual: p.y.clone(),
            });
        }
    }
    Ok(extra.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(i64, i64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn line() {
        // y = 2x + 1
        assert_eq!(secret(&points(&[(1, 3), (2, 5)])).unwrap(), BigInt::from(1));
    }

    #[test]
    fn parabola() {
        // y = x^2 + 1
        let ps = points(&[(1, 2), (2, 5), (3, 10)]);
        assert_eq!(secret(&ps).unwrap(), BigInt::from(1));
        assert_eq!(reconstruct(&ps, &BigInt::from(4)).unwrap(), BigInt::from(17));
    }

    #[test]
    fn single_point_is_constant() {
        assert_eq!(secret(&points(&[(9, 42)])).unwrap(), BigInt::from(42));
    }

    #[test]
    fn negative_secret_and_x() {
        // y = 3x - 7
        let ps = points(&[(-2, -13), (5, 8)]);
        assert_eq!(secret(&ps).unwrap(), BigInt::from(-7));
    }

    #[test]
    fn duplicate_x() {
        assert_eq!(
            secret(&points(&[(1, 5), (1, 7)])),
            Err(InterpolationError::DuplicateX { first: 0, second: 1, x: BigInt::from(1) })
        );
        assert_eq!(
            secret(&points(&[(1, 5), (2, 6), (3, 7), (2, 9)])),
            Err(InterpolationError::DuplicateX { first: 1, second: 3, x: BigInt::from(2) })
        );
    }

    #[test]
    fn fractional_terms_still_sum_exactly() {
        // y = x^2 - 3x + 5; term 0 alone is 5 * 8 / 3
        let ps = points(&[(1, 3), (2, 3), (4, 9)]);
        assert_eq!(secret(&ps).unwrap(), BigInt::from(5));
    }

    #[test]
    fn inconsistent_points_are_inexact() {
        // f(0) = 32/3 - 10 + 16/6 = 10/3
        let err = secret(&points(&[(1, 4), (2, 5), (4, 8)])).unwrap_err();
        assert_eq!(
            err,
            InterpolationError::InexactDivision {
                index: 0,
                x: BigInt::from(1),
                remainder: BigInt::from(1),
                denominator: BigInt::from(3),
            }
        );
    }

    #[test]
    fn inexact_fraction_has_positive_denominator() {
        // f(0) = 3/2; both Lagrange denominators are negative products
        let err = secret(&points(&[(1, 1), (3, 0)])).unwrap_err();
        assert_eq!(
            err,
            InterpolationError::InexactDivision {
                index: 0,
                x: BigInt::from(1),
                remainder: BigInt::from(1),
                denominator: BigInt::from(2),
            }
        );
    }

    #[test]
    fn empty() {
        assert_eq!(secret(&[]), Err(InterpolationError::Empty));
    }

    #[test]
    fn verify_extra_points() {
        let ps = points(&[(1, 2), (2, 5), (3, 10)]);
        assert_eq!(verify(&ps, &points(&[(4, 17), (10, 101)])), Ok(2));
        assert_eq!(
            verify(&ps, &points(&[(4, 18)])),
            Err(InterpolationError::Mismatch {
                x: BigInt::from(4),
                expected: BigInt::from(17),
                actual: BigInt::from(18),
            })
        );
        assert_eq!(verify(&ps, &[]), Ok(0));
    }
}

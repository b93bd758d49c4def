use std::fmt;

use num_bigint::BigInt;

/// A share: one point on the secret polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: BigInt,
    pub y: BigInt,
}

impl Point {
    pub fn new<X: Into<BigInt>, Y: Into<BigInt>>(x: X, y: Y) -> Self {
        Point { x: x.into(), y: y.into() }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point as it comes out of a share file, before any numeral
/// conversion has happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPoint {
    pub x: String, // decimal
    pub base: u32,
    pub digits: String, // y, written in `base`
}

impl EncodedPoint {
    pub fn new<X: Into<String>, D: Into<String>>(x: X, base: u32, digits: D) -> Self {
        EncodedPoint { x: x.into(), base, digits: digits.into() }
    }
}

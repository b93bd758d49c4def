//! Numeral decoding for share coordinates.
//!
//! x is always plain decimal. y is written in the share's own base, with
//! digits `0-9` followed by `a-z` (either case) for ten and up, so the
//! largest supported base is 36.

use num_bigint::{BigInt, BigUint, Sign};
use thiserror::Error;

use crate::point::{EncodedPoint, Point};

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported base {0} (must be 2..=36)")]
    UnsupportedBase(u32),

    #[error("empty digit string")]
    EmptyDigits,

    #[error("invalid digit {digit:?} at position {position} for base {base}")]
    InvalidDigit { digit: char, position: usize, base: u32 },

    #[error("x coordinate {0:?} is not a decimal integer")]
    InvalidX(String),
}

/// Decode one share into integer coordinates.
pub fn decode_point(x: &str, base: u32, digits: &str) -> Result<Point, DecodeError> {
    let x = decode_x(x)?;
    let y = decode_value(base, digits)?;
    Ok(Point { x, y })
}

impl EncodedPoint {
    pub fn decode(&self) -> Result<Point, DecodeError> {
        decode_point(&self.x, self.base, &self.digits)
    }
}

fn decode_x(text: &str) -> Result<BigInt, DecodeError> {
    let (_, body) = split_sign(text);
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidX(text.to_string()));
    }
    decode_signed(text, 10).map_err(|_| DecodeError::InvalidX(text.to_string()))
}

/// Decode a (possibly signed) digit string written in `base`.
pub fn decode_value(base: u32, digits: &str) -> Result<BigInt, DecodeError> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(DecodeError::UnsupportedBase(base));
    }
    decode_signed(digits, base)
}

fn decode_signed(text: &str, base: u32) -> Result<BigInt, DecodeError> {
    let (sign, body) = split_sign(text);
    if body.is_empty() {
        return Err(DecodeError::EmptyDigits);
    }
    let offset = text.len() - body.len();

    let mut values = Vec::with_capacity(body.len());
    for (i, c) in body.chars().enumerate() {
        match c.to_digit(base) {
            Some(d) => values.push(d as u8),
            None => {
                return Err(DecodeError::InvalidDigit {
                    digit: c,
                    position: offset + i,
                    base,
                })
            }
        }
    }

    // every digit was checked against base above
    let magnitude = BigUint::from_radix_be(&values, base)
        .ok_or(DecodeError::UnsupportedBase(base))?;
    Ok(BigInt::from_biguint(sign, magnitude))
}

fn split_sign(text: &str) -> (Sign, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (Sign::Minus, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (Sign::Plus, rest)
    } else {
        (Sign::Plus, text)
    }
}

/// Inverse of [`decode_value`]: lower-case digits, leading `-` if negative.
pub fn encode_value(value: &BigInt, base: u32) -> Result<String, DecodeError> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(DecodeError::UnsupportedBase(base));
    }
    Ok(value.to_str_radix(base))
}

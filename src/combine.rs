//! Glue between a share source and the interpolation.
//!
//! Only the first k points in supply order take part in reconstruction;
//! any others are ignored unless verification is switched on, in which
//! case each of them has to lie on the recovered polynomial.

use num_bigint::BigInt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::decode::DecodeError;
use crate::interpolate::{self, InterpolationError};
use crate::point::{EncodedPoint, Point};
use crate::source::{ShareSource, SourceError};

#[derive(Debug, Error)]
pub enum CombineError {
    #[error("bad quorum value: k = {k}, n = {n}")]
    InvalidThreshold { n: usize, k: usize },

    #[error("not enough shares: need {needed}, got {available}")]
    NotEnoughShares { needed: usize, available: usize },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("share x = {x:?}: {source}")]
    Decode { x: String, source: DecodeError },

    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombineOptions {
    /// Check surplus shares against the recovered polynomial.
    pub verify: bool,
}

/// Outcome of one reconstruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recovery {
    pub n: usize,
    pub k: usize,
    pub points: Vec<Point>, // the k points used
    pub secret: BigInt,
    pub verified: usize, // surplus points checked
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Combiner {
    options: CombineOptions,
}

impl Combiner {
    pub fn new(options: CombineOptions) -> Self {
        Combiner { options }
    }

    pub fn combine(&self, source: &mut dyn ShareSource) -> Result<Recovery, CombineError> {
        let (n, k) = source.point_counts();
        debug!(n, k, "share counts");
        if k < 1 || k > n {
            return Err(CombineError::InvalidThreshold { n, k });
        }

        let encoded = source.next_points(k)?;
        if encoded.len() < k {
            return Err(CombineError::NotEnoughShares { needed: k, available: encoded.len() });
        }
        let points = decode_all(&encoded)?;
        for p in &points {
            debug!(x = %p.x, y = %p.y, "selected share");
        }

        let secret = interpolate::secret(&points)?;

        let mut supplied = k;
        let mut verified = 0;
        if self.options.verify {
            loop {
                let batch = source.next_points(k)?;
                if batch.is_empty() {
                    break;
                }
                supplied += batch.len();
                let extra = decode_all(&batch)?;
                verified += interpolate::verify(&points, &extra)?;
            }
            debug!(verified, "surplus shares agree with polynomial");
            if supplied != n {
                warn!(declared = n, supplied, "share count differs from declared n");
            }
        }

        Ok(Recovery { n, k, points, secret, verified })
    }
}

fn decode_all(encoded: &[EncodedPoint]) -> Result<Vec<Point>, CombineError> {
    encoded
        .iter()
        .map(|e| {
            e.decode().map_err(|source| CombineError::Decode { x: e.x.clone(), source })
        })
        .collect()
}

/// Reconstruct with default options.
pub fn combine(source: &mut dyn ShareSource) -> Result<Recovery, CombineError> {
    Combiner::default().combine(source)
}

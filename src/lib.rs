// An implementation of key reconstruction from

// Shamir A.,
// How to Share a Secret,
// Communications of the ACM, 22, 1979, pp. 612--613.

// Shares are points (x, f(x)) on a polynomial f of degree k - 1 whose
// constant term is the secret. Unlike the Galois-field variants, the
// polynomial here lives over the plain integers, so shares can be
// arbitrarily large and each y value may be written in its own base
// (2 to 36). Reconstruction is exact: there is no modulus to hide
// rounding errors, and an interpolated value that is not an integer
// is reported rather than truncated.
//
// Layout:
//
// * decode      -- numeral strings to integer points
// * interpolate -- Lagrange interpolation at x = 0 (or anywhere else)
// * source      -- where encoded shares come from (JSON share files)
// * combine     -- pick the first k shares, decode, interpolate, verify

pub mod combine;
pub mod decode;
pub mod interpolate;
pub mod point;
pub mod source;

pub use combine::{combine, CombineError, CombineOptions, Combiner, Recovery};
pub use decode::{decode_point, decode_value, encode_value, DecodeError};
pub use interpolate::{reconstruct, secret, verify, InterpolationError};
pub use point::{EncodedPoint, Point};
pub use source::{JsonShares, ShareSource, SourceError};

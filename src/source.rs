//! Where shares come from.
//!
//! The combiner only needs the declared counts and a stream of encoded
//! points; [`ShareSource`] is that contract. [`JsonShares`] reads the
//! share-file layout:
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" }
//! }
//! ```
//!
//! Every top-level key other than `keys` is an x coordinate. Entries are
//! handed out in document order.

use std::convert::TryFrom;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::point::EncodedPoint;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading shares: {0}")]
    Io(#[from] io::Error),

    #[error("share file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {entry:?} is not an object")]
    NotAnObject { entry: String },

    #[error("entry {entry:?} has no {field:?} field")]
    MissingField { entry: String, field: &'static str },

    #[error("entry {entry:?} field {field:?} has unusable value {value}")]
    InvalidField { entry: String, field: &'static str, value: String },
}

/// Supplies the declared share counts and the encoded points, in a
/// stable order.
pub trait ShareSource {
    /// `(n, k)`: shares available, shares needed.
    fn point_counts(&self) -> (usize, usize);

    /// Up to `limit` further points. An empty result means the source is
    /// exhausted.
    fn next_points(&mut self, limit: usize) -> Result<Vec<EncodedPoint>, SourceError>;
}

const KEYS: &str = "keys";

/// Shares parsed from a JSON share file.
#[derive(Clone, Debug)]
pub struct JsonShares {
    n: usize,
    k: usize,
    points: Vec<EncodedPoint>,
    cursor: usize,
}

impl FromStr for JsonShares {
    type Err = SourceError;

    fn from_str(text: &str) -> Result<Self, SourceError> {
        let doc: Map<String, Value> = serde_json::from_str(text)?;
        Self::from_map(doc)
    }
}

impl JsonShares {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        let doc: Map<String, Value> = serde_json::from_reader(reader)?;
        Self::from_map(doc)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    fn from_map(doc: Map<String, Value>) -> Result<Self, SourceError> {
        let keys = match doc.get(KEYS) {
            Some(Value::Object(keys)) => keys,
            Some(_) => return Err(SourceError::NotAnObject { entry: KEYS.to_string() }),
            None => {
                return Err(SourceError::MissingField { entry: String::new(), field: KEYS })
            }
        };
        let n = count_field(KEYS, keys, "n")?;
        let k = count_field(KEYS, keys, "k")?;

        let mut points = Vec::with_capacity(doc.len().saturating_sub(1));
        for (x, entry) in doc.iter() {
            if x == KEYS {
                continue;
            }
            let entry_map = match entry {
                Value::Object(m) => m,
                _ => return Err(SourceError::NotAnObject { entry: x.clone() }),
            };
            let base = count_field(x, entry_map, "base")?;
            let base = u32::try_from(base).map_err(|_| SourceError::InvalidField {
                entry: x.clone(),
                field: "base",
                value: base.to_string(),
            })?;
            let digits = match entry_map.get("value") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(num)) => num.to_string(),
                Some(other) => {
                    return Err(SourceError::InvalidField {
                        entry: x.clone(),
                        field: "value",
                        value: other.to_string(),
                    })
                }
                None => return Err(SourceError::MissingField { entry: x.clone(), field: "value" }),
            };
            points.push(EncodedPoint { x: x.clone(), base, digits });
        }

        Ok(JsonShares { n, k, points, cursor: 0 })
    }

    /// Number of point entries actually present in the document.
    pub fn supplied(&self) -> usize {
        self.points.len()
    }
}

/// Read a small non-negative integer that may be written either as a JSON
/// number or as a decimal string.
fn count_field(entry: &str, map: &Map<String, Value>, field: &'static str) -> Result<usize, SourceError> {
    let value = map.get(field).ok_or_else(|| SourceError::MissingField {
        entry: entry.to_string(),
        field,
    })?;
    let parsed = match value {
        Value::Number(num) => num.as_u64().and_then(|v| usize::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| SourceError::InvalidField {
        entry: entry.to_string(),
        field,
        value: value.to_string(),
    })
}

impl ShareSource for JsonShares {
    fn point_counts(&self) -> (usize, usize) {
        (self.n, self.k)
    }

    fn next_points(&mut self, limit: usize) -> Result<Vec<EncodedPoint>, SourceError> {
        let end = self.points.len().min(self.cursor.saturating_add(limit));
        let batch = self.points[self.cursor..end].to_vec();
        self.cursor = end;
        Ok(batch)
    }
}

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Numeric kind a list segment is expected to parse as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Float,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Integer => f.write_str("integer"),
            ScalarKind::Float => f.write_str("float"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value {segment:?}")]
pub struct ParseError {
    pub segment: String,
    pub kind: ScalarKind,
}

/// A numeric type that can appear in a comma-separated list.
pub trait Scalar: FromStr + Sized {
    const KIND: ScalarKind;
}

impl Scalar for i64 {
    const KIND: ScalarKind = ScalarKind::Integer;
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;
}

/// Parses `"1, 2,,3"` style text into `[1, 2, 3]`.
///
/// Blank segments are skipped, so blank input gives an empty list. The first
/// segment that does not parse aborts the whole list.
pub fn parse_list<T: Scalar>(text: &str) -> Result<Vec<T>, ParseError> {
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment.parse::<T>().map_err(|_| ParseError {
                segment: segment.to_string(),
                kind: T::KIND,
            })
        })
        .collect()
}

pub fn parse_shape(text: &str) -> Result<Vec<i64>, ParseError> {
    parse_list(text)
}

pub fn parse_values(text: &str) -> Result<Vec<f64>, ParseError> {
    parse_list(text)
}

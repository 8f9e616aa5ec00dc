use crate::types::observations::Observations;
use std::fmt;

/// What normalizing one station's document produced.
///
/// Empty and failed stations are outcomes, not errors, so one bad station
/// never aborts a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StationOutcome {
    Rows(Observations),
    /// The document had no data key, an empty series, or no usable rows.
    Empty,
    Error(SkipReason),
}

/// Why a station contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The request or response decoding failed.
    FetchFailed(String),
    /// The service answered with an `error` object.
    Service(String),
    /// The rows did not match the record shape of the table they joined.
    ShapeMismatch,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            SkipReason::Service(msg) => write!(f, "service error: {}", msg),
            SkipReason::ShapeMismatch => f.write_str("rows of an unexpected shape"),
        }
    }
}

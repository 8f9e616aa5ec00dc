//! Station references used as join keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a CO-OPS station (e.g. `"8454000"` for Providence, RI).
///
/// The identifier is opaque: it is only echoed to the service and used to tag
/// rows, never checked against a station registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u32> for StationId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for StationId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

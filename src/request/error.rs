use crate::types::dates::FormatError;
use crate::types::product::ProductKind;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Configuration errors. These are raised before any request goes out and are
/// never worth retrying.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(
        "No datum specified for {0} data. See https://tidesandcurrents.noaa.gov/api/#datum \
         for list of available datums"
    )]
    MissingDatum(ProductKind),

    #[error("Invalid {field}: {source}")]
    InvalidDate {
        field: &'static str,
        #[source]
        source: FormatError,
    },

    #[error("End date {end} is before begin date {begin}")]
    InvertedRange {
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid service endpoint '{endpoint}'")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

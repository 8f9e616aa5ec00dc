//! Batch retrieval of NOAA CO-OPS tide and water level data.
//!
//! [`Tides`] fetches one product for many stations with bounded concurrency,
//! normalizes each station's response into typed records and merges them
//! into a [`CombinedTable`], which can be handed to a persistence layer row
//! by row or turned into a polars [`TideFrame`].

mod assemble;
mod config;
mod error;
mod fetching;
mod frame;
mod normalize;
mod request;
mod tides;
mod types;

pub use assemble::{assemble, CombinedTable, SkippedStation};
pub use config::{TidesConfig, DEFAULT_APPLICATION, DEFAULT_ENDPOINT};
pub use error::TidesError;
pub use fetching::dispatcher::{FetchDispatcher, StationDocument, DEFAULT_CONCURRENCY};
pub use fetching::error::FetchError;
pub use fetching::source::{DocumentSource, HttpSource};
pub use frame::TideFrame;
pub use normalize::{normalize_document, SkipReason, StationOutcome};
pub use request::error::RequestError;
pub use request::fetch_request::{FetchRequest, PreparedRequest};
pub use request::query::station_of;
pub use tides::Tides;

pub use types::dates::{parse_request_date, FormatError, IntoUtcDateTime};
pub use types::observations::{
    CurrentReading, HighLowDay, HighLowPrediction, HourlyHeight, Observation, ObservationRow,
    Observations, Prediction, WaterLevel,
};
pub use types::product::{Datum, Interval, ProductKind, TimeZone, UnknownCode, Units};
pub use types::station::StationId;

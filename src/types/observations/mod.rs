//! Normalized record shapes, one per data product.

pub mod current;
pub mod high_low;
pub mod hourly_height;
pub mod prediction;
pub mod water_level;

use crate::types::product::{Interval, ProductKind};
use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};
use std::hash::Hash;

pub use current::CurrentReading;
pub use high_low::HighLowDay;
pub use hourly_height::HourlyHeight;
pub use prediction::{HighLowPrediction, Prediction};
pub use water_level::WaterLevel;

/// Common behaviour of every normalized record.
pub trait Observation: Clone {
    /// Hashable identity of the whole row, used to drop exact duplicates.
    type Key: Hash + Eq;

    fn station_id(&self) -> &str;
    fn date_time(&self) -> DateTime<Utc>;
    fn set_date_time(&mut self, date_time: DateTime<Utc>);
    /// A record for `station_id` at `date_time` with every measurement missing.
    fn blank(station_id: &str, date_time: DateTime<Utc>) -> Self;
    fn dedup_key(&self) -> Self::Key;
    /// Measurement fields in column order, as handed to a persistence layer.
    fn measurements(&self) -> Vec<(&'static str, Option<f64>)>;
    /// Product specific columns (everything after `station_id` and `date_time`).
    fn product_columns(records: &[Self]) -> Vec<Column>;
}

pub(crate) type FloatKey = Option<OrderedFloat<f64>>;

pub(crate) fn float_key(value: Option<f64>) -> FloatKey {
    value.map(OrderedFloat)
}

pub(crate) fn float_column(name: &str, values: Vec<Option<f64>>) -> Column {
    Series::new(name.into(), values).into()
}

pub(crate) fn text_column(name: &str, values: Vec<Option<&str>>) -> Column {
    Series::new(name.into(), values).into()
}

pub(crate) fn time_column(name: &str, values: Vec<Option<DateTime<Utc>>>) -> Column {
    let naive: Vec<_> = values.into_iter().map(|v| v.map(|dt| dt.naive_utc())).collect();
    Series::new(name.into(), naive).into()
}

/// One row as handed across the persistence boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow<'a> {
    pub station_id: &'a str,
    pub date_time: DateTime<Utc>,
    pub fields: Vec<(&'static str, Option<f64>)>,
}

/// A table of normalized records for a single product.
///
/// Each variant carries its own typed record shape so downstream code matches
/// exhaustively instead of inspecting column names.
#[derive(Debug, Clone, PartialEq)]
pub enum Observations {
    WaterLevel(Vec<WaterLevel>),
    HourlyHeight(Vec<HourlyHeight>),
    HighLow(Vec<HighLowDay>),
    Predictions(Vec<Prediction>),
    HighLowPredictions(Vec<HighLowPrediction>),
    Currents(Vec<CurrentReading>),
}

macro_rules! each_variant {
    ($value:expr, $records:ident => $body:expr) => {
        match $value {
            Observations::WaterLevel($records) => $body,
            Observations::HourlyHeight($records) => $body,
            Observations::HighLow($records) => $body,
            Observations::Predictions($records) => $body,
            Observations::HighLowPredictions($records) => $body,
            Observations::Currents($records) => $body,
        }
    };
}

impl Observations {
    /// An empty table with the record shape used for `product` at `interval`.
    pub fn empty(product: ProductKind, interval: Option<Interval>) -> Self {
        match product {
            ProductKind::WaterLevel => Observations::WaterLevel(Vec::new()),
            ProductKind::HourlyHeight => Observations::HourlyHeight(Vec::new()),
            ProductKind::HighLow => Observations::HighLow(Vec::new()),
            ProductKind::Predictions if interval == Some(Interval::HighLow) => {
                Observations::HighLowPredictions(Vec::new())
            }
            ProductKind::Predictions => Observations::Predictions(Vec::new()),
            ProductKind::Currents => Observations::Currents(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        each_variant!(self, records => records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `other` onto `self`. Returns `other` back unchanged when the
    /// record shapes differ.
    pub fn append(&mut self, other: Observations) -> Result<(), Observations> {
        match (self, other) {
            (Observations::WaterLevel(a), Observations::WaterLevel(b)) => a.extend(b),
            (Observations::HourlyHeight(a), Observations::HourlyHeight(b)) => a.extend(b),
            (Observations::HighLow(a), Observations::HighLow(b)) => a.extend(b),
            (Observations::Predictions(a), Observations::Predictions(b)) => a.extend(b),
            (Observations::HighLowPredictions(a), Observations::HighLowPredictions(b)) => {
                a.extend(b)
            }
            (Observations::Currents(a), Observations::Currents(b)) => a.extend(b),
            (_, other) => return Err(other),
        }
        Ok(())
    }

    /// Rows in table order, reduced to station, timestamp and numeric fields.
    pub fn rows(&self) -> Vec<ObservationRow<'_>> {
        each_variant!(self, records => records.iter().map(to_row).collect())
    }

    /// Builds a polars frame with `station_id` first, then `date_time`, then
    /// the product columns.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        each_variant!(self, records => build_frame(records))
    }
}

fn to_row<T: Observation>(record: &T) -> ObservationRow<'_> {
    ObservationRow {
        station_id: record.station_id(),
        date_time: record.date_time(),
        fields: record.measurements(),
    }
}

fn build_frame<T: Observation>(records: &[T]) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        text_column(
            "station_id",
            records.iter().map(|r| Some(r.station_id())).collect(),
        ),
        time_column(
            "date_time",
            records.iter().map(|r| Some(r.date_time())).collect(),
        ),
    ];
    columns.extend(T::product_columns(records));
    DataFrame::new(columns)
}

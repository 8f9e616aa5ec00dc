//! Turns raw station documents into typed, per-station tables.

mod high_low;
mod outcome;
mod post;
pub(crate) mod raw;
mod series;

pub use outcome::{SkipReason, StationOutcome};

use crate::fetching::dispatcher::StationDocument;
use crate::types::observations::{Observation, Observations};
use crate::types::product::{Interval, ProductKind};
use log::{debug, warn};
use serde_json::Value;

/// Normalizes one station's document for `product` requested at `interval`.
///
/// Rows are sorted by time, resampled to hourly buckets for water level and
/// currents at [`Interval::Hourly`], and de-duplicated.
///
/// # Arguments
///
/// * `document` - The station and its fetched JSON body, or the fetch error.
/// * `product` - Decides which series key is read and which record type is built.
/// * `interval` - The requested interval, if any.
///
/// # Returns
///
/// * [`StationOutcome::Rows`] with at least one record.
/// * [`StationOutcome::Empty`] if the document had no data or no usable rows.
/// * [`StationOutcome::Error`] if the fetch failed or the service returned an
///   `error` object.
pub fn normalize_document(
    document: StationDocument,
    product: ProductKind,
    interval: Option<Interval>,
) -> StationOutcome {
    let station = document.station;
    let mut body = match document.body {
        Ok(body) => body,
        Err(e) => return StationOutcome::Error(SkipReason::FetchFailed(e.to_string())),
    };

    if let Some(error) = body.get("error") {
        let message = service_message(error);
        warn!("Station {} returned an error: {}", station, message);
        return StationOutcome::Error(SkipReason::Service(message));
    }

    let Some(points) = raw::take_points(&mut body, product.data_key(), station.as_str()) else {
        debug!("Station {} has no {} key", station, product.data_key());
        return StationOutcome::Empty;
    };
    if points.is_empty() {
        debug!("Station {} returned an empty series", station);
        return StationOutcome::Empty;
    }

    let station = station.as_str();
    let resample = interval == Some(Interval::Hourly) && product.resamples_hourly();
    let observations = match product {
        ProductKind::WaterLevel => {
            Observations::WaterLevel(finish(series::water_levels(station, points), resample))
        }
        ProductKind::HourlyHeight => {
            Observations::HourlyHeight(finish(series::hourly_heights(station, points), resample))
        }
        ProductKind::HighLow => {
            Observations::HighLow(finish(high_low::daily_extrema(station, points), false))
        }
        ProductKind::Predictions if interval == Some(Interval::HighLow) => {
            Observations::HighLowPredictions(finish(
                series::high_low_predictions(station, points),
                false,
            ))
        }
        ProductKind::Predictions => {
            Observations::Predictions(finish(series::predictions(station, points), false))
        }
        ProductKind::Currents => {
            Observations::Currents(finish(series::currents(station, points), resample))
        }
    };

    if observations.is_empty() {
        StationOutcome::Empty
    } else {
        StationOutcome::Rows(observations)
    }
}

fn finish<T: Observation>(mut records: Vec<T>, resample: bool) -> Vec<T> {
    post::sort_by_time(&mut records);
    if resample {
        records = post::resample_hourly(records);
    }
    post::dedup(records)
}

fn service_message(error: &Value) -> String {
    match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => error.to_string(),
    }
}

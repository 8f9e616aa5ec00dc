use crate::types::observations::{
    float_column, float_key, text_column, FloatKey, Observation,
};
use chrono::{DateTime, Utc};
use polars::prelude::Column;
use serde::Serialize;

/// A predicted water level from the harmonic tide model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub station_id: String,
    pub date_time: DateTime<Utc>,
    pub predicted_wl: Option<f64>,
}

/// A predicted high or low tide event (`interval=hilo`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighLowPrediction {
    pub station_id: String,
    pub date_time: DateTime<Utc>,
    pub predicted_wl: Option<f64>,
    /// `H` or `L`.
    pub hi_lo: Option<String>,
}

impl Observation for Prediction {
    type Key = (String, i64, FloatKey);

    fn station_id(&self) -> &str {
        &self.station_id
    }

    fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }

    fn set_date_time(&mut self, date_time: DateTime<Utc>) {
        self.date_time = date_time;
    }

    fn blank(station_id: &str, date_time: DateTime<Utc>) -> Self {
        Self {
            station_id: station_id.to_string(),
            date_time,
            predicted_wl: None,
        }
    }

    fn dedup_key(&self) -> Self::Key {
        (
            self.station_id.clone(),
            self.date_time.timestamp_millis(),
            float_key(self.predicted_wl),
        )
    }

    fn measurements(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("predicted_wl", self.predicted_wl)]
    }

    fn product_columns(records: &[Self]) -> Vec<Column> {
        vec![float_column(
            "predicted_wl",
            records.iter().map(|r| r.predicted_wl).collect(),
        )]
    }
}

impl Observation for HighLowPrediction {
    type Key = (String, i64, FloatKey, Option<String>);

    fn station_id(&self) -> &str {
        &self.station_id
    }

    fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }

    fn set_date_time(&mut self, date_time: DateTime<Utc>) {
        self.date_time = date_time;
    }

    fn blank(station_id: &str, date_time: DateTime<Utc>) -> Self {
        Self {
            station_id: station_id.to_string(),
            date_time,
            predicted_wl: None,
            hi_lo: None,
        }
    }

    fn dedup_key(&self) -> Self::Key {
        (
            self.station_id.clone(),
            self.date_time.timestamp_millis(),
            float_key(self.predicted_wl),
            self.hi_lo.clone(),
        )
    }

    fn measurements(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("predicted_wl", self.predicted_wl)]
    }

    fn product_columns(records: &[Self]) -> Vec<Column> {
        vec![
            float_column(
                "predicted_wl",
                records.iter().map(|r| r.predicted_wl).collect(),
            ),
            text_column("hi_lo", records.iter().map(|r| r.hi_lo.as_deref()).collect()),
        ]
    }
}

use crate::types::observations::{float_column, float_key, FloatKey, Observation};
use chrono::{DateTime, Utc};
use polars::prelude::Column;
use serde::Serialize;

/// An observed current at one depth bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentReading {
    pub station_id: String,
    pub date_time: DateTime<Utc>,
    pub speed: Option<f64>,
    /// Direction in degrees true.
    pub direction: Option<f64>,
    pub bin: Option<f64>,
}

impl Observation for CurrentReading {
    type Key = (String, i64, FloatKey, FloatKey, FloatKey);

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
            speed: None,
            direction: None,
            bin: None,
        }
    }

    fn dedup_key(&self) -> Self::Key {
        (
            self.station_id.clone(),
            self.date_time.timestamp_millis(),
            float_key(self.speed),
            float_key(self.direction),
            float_key(self.bin),
        )
    }

    fn measurements(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("speed", self.speed),
            ("direction", self.direction),
            ("bin", self.bin),
        ]
    }

    fn product_columns(records: &[Self]) -> Vec<Column> {
        vec![
            float_column("speed", records.iter().map(|r| r.speed).collect()),
            float_column("direction", records.iter().map(|r| r.direction).collect()),
            float_column("bin", records.iter().map(|r| r.bin).collect()),
        ]
    }
}

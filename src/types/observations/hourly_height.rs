use crate::types::observations::{
    float_column, float_key, text_column, FloatKey, Observation,
};
use chrono::{DateTime, Utc};
use polars::prelude::Column;
use serde::Serialize;

/// A verified hourly height. Same as [`crate::WaterLevel`] without the QC field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyHeight {
    pub station_id: String,
    pub date_time: DateTime<Utc>,
    pub water_level: Option<f64>,
    pub sigma: Option<f64>,
    pub flags: Option<String>,
}

impl Observation for HourlyHeight {
    type Key = (String, i64, FloatKey, FloatKey, Option<String>);

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
            water_level: None,
            sigma: None,
            flags: None,
        }
    }

    fn dedup_key(&self) -> Self::Key {
        (
            self.station_id.clone(),
            self.date_time.timestamp_millis(),
            float_key(self.water_level),
            float_key(self.sigma),
            self.flags.clone(),
        )
    }

    fn measurements(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("water_level", self.water_level), ("sigma", self.sigma)]
    }

    fn product_columns(records: &[Self]) -> Vec<Column> {
        vec![
            float_column("water_level", records.iter().map(|r| r.water_level).collect()),
            float_column("sigma", records.iter().map(|r| r.sigma).collect()),
            text_column("flags", records.iter().map(|r| r.flags.as_deref()).collect()),
        ]
    }
}

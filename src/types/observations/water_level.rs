use crate::types::observations::{
    float_column, float_key, text_column, FloatKey, Observation,
};
use chrono::{DateTime, Utc};
use polars::prelude::Column;
use serde::Serialize;

/// A single 6-minute (or resampled hourly) water level observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterLevel {
    pub station_id: String,
    pub date_time: DateTime<Utc>,
    /// Height above the requested datum.
    pub water_level: Option<f64>,
    /// Standard deviation of the 1-second samples behind this value.
    pub sigma: Option<f64>,
    /// Data flags, comma separated (`"0,0,0,0"`).
    pub flags: Option<String>,
    /// Quality assurance level: `p` preliminary, `v` verified.
    pub qc: Option<String>,
}

impl Observation for WaterLevel {
    type Key = (String, i64, FloatKey, FloatKey, Option<String>, Option<String>);

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
            qc: None,
        }
    }

    fn dedup_key(&self) -> Self::Key {
        (
            self.station_id.clone(),
            self.date_time.timestamp_millis(),
            float_key(self.water_level),
            float_key(self.sigma),
            self.flags.clone(),
            self.qc.clone(),
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
            text_column("QC", records.iter().map(|r| r.qc.as_deref()).collect()),
        ]
    }
}

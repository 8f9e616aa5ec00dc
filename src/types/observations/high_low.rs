use crate::types::observations::{
    float_column, float_key, time_column, FloatKey, Observation,
};
use chrono::{DateTime, Utc};
use polars::prelude::Column;
use serde::Serialize;

/// One day of verified high/low extrema.
///
/// `date_time` is midnight of the day; each event category keeps the time it
/// actually occurred in its own `*_date_time` field. A category that had no
/// event that day is `None` in both fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighLowDay {
    pub station_id: String,
    pub date_time: DateTime<Utc>,
    /// Higher high water (`HH`).
    pub hh_water_level: Option<f64>,
    pub hh_date_time: Option<DateTime<Utc>>,
    /// High water (`H `).
    pub h_water_level: Option<f64>,
    pub h_date_time: Option<DateTime<Utc>>,
    /// Low water (`L `).
    pub l_water_level: Option<f64>,
    pub l_date_time: Option<DateTime<Utc>>,
    /// Lower low water (`LL`).
    pub ll_water_level: Option<f64>,
    pub ll_date_time: Option<DateTime<Utc>>,
}

type EventKey = (FloatKey, Option<i64>);

fn event_key(value: Option<f64>, at: Option<DateTime<Utc>>) -> EventKey {
    (float_key(value), at.map(|t| t.timestamp_millis()))
}

impl Observation for HighLowDay {
    type Key = (String, i64, EventKey, EventKey, EventKey, EventKey);

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
            hh_water_level: None,
            hh_date_time: None,
            h_water_level: None,
            h_date_time: None,
            l_water_level: None,
            l_date_time: None,
            ll_water_level: None,
            ll_date_time: None,
        }
    }

    fn dedup_key(&self) -> Self::Key {
        (
            self.station_id.clone(),
            self.date_time.timestamp_millis(),
            event_key(self.hh_water_level, self.hh_date_time),
            event_key(self.h_water_level, self.h_date_time),
            event_key(self.l_water_level, self.l_date_time),
            event_key(self.ll_water_level, self.ll_date_time),
        )
    }

    fn measurements(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("HH_water_level", self.hh_water_level),
            ("H_water_level", self.h_water_level),
            ("L_water_level", self.l_water_level),
            ("LL_water_level", self.ll_water_level),
        ]
    }

    fn product_columns(records: &[Self]) -> Vec<Column> {
        vec![
            time_column("date_time_HH", records.iter().map(|r| r.hh_date_time).collect()),
            float_column("HH_water_level", records.iter().map(|r| r.hh_water_level).collect()),
            time_column("date_time_H", records.iter().map(|r| r.h_date_time).collect()),
            float_column("H_water_level", records.iter().map(|r| r.h_water_level).collect()),
            time_column("date_time_L", records.iter().map(|r| r.l_date_time).collect()),
            float_column("L_water_level", records.iter().map(|r| r.l_water_level).collect()),
            time_column("date_time_LL", records.iter().map(|r| r.ll_date_time).collect()),
            float_column("LL_water_level", records.iter().map(|r| r.ll_water_level).collect()),
        ]
    }
}

//! Transforms for the plain series products: one output row per input row.

use crate::normalize::raw::{numeric, text, with_times, RawPoint};
use crate::types::observations::{
    CurrentReading, HighLowPrediction, HourlyHeight, Prediction, WaterLevel,
};

pub(crate) fn water_levels(station: &str, points: Vec<RawPoint>) -> Vec<WaterLevel> {
    with_times(points, station)
        .into_iter()
        .map(|(date_time, p)| WaterLevel {
            station_id: station.to_string(),
            date_time,
            water_level: numeric(&p.v),
            sigma: numeric(&p.s),
            flags: text(&p.f),
            qc: text(&p.q),
        })
        .collect()
}

pub(crate) fn hourly_heights(station: &str, points: Vec<RawPoint>) -> Vec<HourlyHeight> {
    with_times(points, station)
        .into_iter()
        .map(|(date_time, p)| HourlyHeight {
            station_id: station.to_string(),
            date_time,
            water_level: numeric(&p.v),
            sigma: numeric(&p.s),
            flags: text(&p.f),
        })
        .collect()
}

pub(crate) fn predictions(station: &str, points: Vec<RawPoint>) -> Vec<Prediction> {
    with_times(points, station)
        .into_iter()
        .map(|(date_time, p)| Prediction {
            station_id: station.to_string(),
            date_time,
            predicted_wl: numeric(&p.v),
        })
        .collect()
}

pub(crate) fn high_low_predictions(station: &str, points: Vec<RawPoint>) -> Vec<HighLowPrediction> {
    with_times(points, station)
        .into_iter()
        .map(|(date_time, p)| HighLowPrediction {
            station_id: station.to_string(),
            date_time,
            predicted_wl: numeric(&p.v),
            hi_lo: text(&p.kind),
        })
        .collect()
}

pub(crate) fn currents(station: &str, points: Vec<RawPoint>) -> Vec<CurrentReading> {
    with_times(points, station)
        .into_iter()
        .map(|(date_time, p)| CurrentReading {
            station_id: station.to_string(),
            date_time,
            speed: numeric(&p.s),
            direction: numeric(&p.d),
            bin: numeric(&p.b),
        })
        .collect()
}

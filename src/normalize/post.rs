//! Ordering, hourly resampling and de-duplication of normalized records.

use crate::types::observations::Observation;
use chrono::{DurationRound, TimeDelta};
use std::collections::HashSet;

/// Stable sort on the record timestamp.
pub(crate) fn sort_by_time<T: Observation>(records: &mut [T]) {
    records.sort_by_key(|r| r.date_time());
}

/// Reduces records to one per hour, from the first bucket to the last.
///
/// Each hour keeps its first record, stamped with the start of the hour.
/// Hours without records in between get a blank record for the same station.
///
/// Expects `records` sorted by time.
pub(crate) fn resample_hourly<T: Observation>(records: Vec<T>) -> Vec<T> {
    let hour = TimeDelta::hours(1);
    let mut out: Vec<T> = Vec::new();
    for mut record in records {
        let Ok(bucket) = record.date_time().duration_trunc(hour) else {
            continue;
        };
        if let Some(last) = out.last() {
            let last_bucket = last.date_time();
            if last_bucket == bucket {
                continue;
            }
            let station = last.station_id().to_string();
            let mut gap = last_bucket + hour;
            while gap < bucket {
                out.push(T::blank(&station, gap));
                gap += hour;
            }
        }
        record.set_date_time(bucket);
        out.push(record);
    }
    out
}

/// Drops rows identical to an earlier row, keeping the first occurrence.
pub(crate) fn dedup<T: Observation>(records: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dates::parse_observation_time;
    use crate::types::observations::WaterLevel;
    use chrono::{DateTime, Utc};

    fn at(t: &str) -> DateTime<Utc> {
        parse_observation_time(t).unwrap()
    }

    fn level(t: &str, v: f64) -> WaterLevel {
        WaterLevel {
            station_id: "8454000".to_string(),
            date_time: at(t),
            water_level: Some(v),
            sigma: Some(0.01),
            flags: Some("0,0,0,0".to_string()),
            qc: Some("v".to_string()),
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let mut records = vec![
            level("2024-03-01 01:00", 3.0),
            level("2024-03-01 00:00", 1.0),
            level("2024-03-01 01:00", 4.0),
        ];
        sort_by_time(&mut records);
        let values: Vec<_> = records.iter().map(|r| r.water_level).collect();
        assert_eq!(values, vec![Some(1.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_resample_takes_first_of_each_hour() {
        let mut records = Vec::new();
        for minute in (0..120).step_by(6) {
            let t = format!("2024-03-01 {:02}:{:02}", minute / 60, minute % 60);
            records.push(level(&t, minute as f64));
        }
        let hourly = resample_hourly(records);
        assert_eq!(hourly.len(), 2);
        assert_eq!(hourly[0].date_time, at("2024-03-01 00:00"));
        assert_eq!(hourly[0].water_level, Some(0.0));
        assert_eq!(hourly[1].date_time, at("2024-03-01 01:00"));
        assert_eq!(hourly[1].water_level, Some(60.0));
    }

    #[test]
    fn test_resample_floors_timestamp_and_fills_gaps() {
        let hourly = resample_hourly(vec![
            level("2024-03-01 00:18", 1.0),
            level("2024-03-01 00:42", 2.0),
            level("2024-03-01 03:06", 3.0),
        ]);
        let times: Vec<_> = hourly.iter().map(|r| r.date_time).collect();
        assert_eq!(
            times,
            [
                at("2024-03-01 00:00"),
                at("2024-03-01 01:00"),
                at("2024-03-01 02:00"),
                at("2024-03-01 03:00"),
            ]
        );
        assert_eq!(hourly[0].water_level, Some(1.0));
        assert_eq!(hourly[3].water_level, Some(3.0));
        for gap in &hourly[1..3] {
            assert_eq!(gap.station_id, "8454000");
            assert_eq!(gap.water_level, None);
            assert_eq!(gap.sigma, None);
            assert_eq!(gap.flags, None);
            assert_eq!(gap.qc, None);
        }
    }

    #[test]
    fn test_resample_single_hour_outage() {
        let hourly = resample_hourly(vec![
            level("2024-03-01 00:00", 1.0),
            level("2024-03-01 02:00", 2.0),
        ]);
        assert_eq!(hourly.len(), 3);
        assert_eq!(hourly[1].date_time, at("2024-03-01 01:00"));
        assert_eq!(hourly[1].water_level, None);
    }

    #[test]
    fn test_dedup_keeps_first_of_identical_rows() {
        let records = vec![
            level("2024-03-01 00:00", 1.0),
            level("2024-03-01 00:00", 1.0),
            level("2024-03-01 00:06", 1.0),
            level("2024-03-01 00:00", 2.0),
        ];
        let unique = dedup(records);
        assert_eq!(unique.len(), 3);
        assert_eq!(unique[0].water_level, Some(1.0));
        assert_eq!(unique[2].water_level, Some(2.0));
    }
}

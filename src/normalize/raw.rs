//! Loosely typed view of one element of a response's data array.
//!
//! CO-OPS encodes numbers as strings (`"v": "1.234"`) and uses empty strings
//! for missing values, so every cell is kept as a `Value` and coerced on use.

use crate::types::dates::parse_observation_time;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawPoint {
    /// Timestamp.
    pub t: Option<Value>,
    /// Value (water level, predicted level).
    pub v: Option<Value>,
    /// Sigma, or speed for currents.
    pub s: Option<Value>,
    /// Flags.
    pub f: Option<Value>,
    /// Quality level.
    pub q: Option<Value>,
    /// High/low event code (`HH`, `H `, `L `, `LL`).
    pub ty: Option<Value>,
    /// Predicted high/low marker (`H`, `L`).
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    /// Current direction.
    pub d: Option<Value>,
    /// Current bin.
    pub b: Option<Value>,
}

/// Coerces a cell to a number. Anything that is not a finite number or a
/// string holding one becomes `None`.
pub(crate) fn numeric(cell: &Option<Value>) -> Option<f64> {
    let value = match cell.as_ref()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Coerces a cell to text. Numbers are rendered, null and containers are `None`.
pub(crate) fn text(cell: &Option<Value>) -> Option<String> {
    match cell.as_ref()? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Takes the data array under `key` out of a document.
///
/// Returns `None` when the key is absent or does not hold an array. Elements
/// that are not objects are dropped.
pub(crate) fn take_points(document: &mut Value, key: &str, station: &str) -> Option<Vec<RawPoint>> {
    let items = match document.get_mut(key)?.take() {
        Value::Array(items) => items,
        _ => return None,
    };
    let total = items.len();
    let points: Vec<RawPoint> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if points.len() < total {
        warn!(
            "Dropped {} malformed entries from station {}",
            total - points.len(),
            station
        );
    }
    Some(points)
}

/// Pairs each point with its parsed timestamp, dropping points whose
/// timestamp is missing or unreadable.
pub(crate) fn with_times(points: Vec<RawPoint>, station: &str) -> Vec<(DateTime<Utc>, RawPoint)> {
    let total = points.len();
    let timed: Vec<_> = points
        .into_iter()
        .filter_map(|p| {
            let at = text(&p.t).as_deref().and_then(parse_observation_time)?;
            Some((at, p))
        })
        .collect();
    if timed.len() < total {
        warn!(
            "Dropped {} rows with unreadable timestamps from station {}",
            total - timed.len(),
            station
        );
    }
    timed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(numeric(&Some(json!("1.234"))), Some(1.234));
        assert_eq!(numeric(&Some(json!(" -0.5 "))), Some(-0.5));
        assert_eq!(numeric(&Some(json!(2))), Some(2.0));
        assert_eq!(numeric(&Some(json!(""))), None);
        assert_eq!(numeric(&Some(json!("abc"))), None);
        assert_eq!(numeric(&Some(json!("NaN"))), None);
        assert_eq!(numeric(&Some(Value::Null)), None);
        assert_eq!(numeric(&None), None);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(text(&Some(json!("0,0,0,0"))), Some("0,0,0,0".to_string()));
        assert_eq!(text(&Some(json!(1))), Some("1".to_string()));
        assert_eq!(text(&Some(json!(null))), None);
        assert_eq!(text(&Some(json!([1]))), None);
    }

    #[test]
    fn test_take_points_skips_non_objects() {
        let mut doc = json!({"data": [{"t": "2024-03-01 00:00", "v": "1.0"}, 5, "x"]});
        let points = take_points(&mut doc, "data", "1").unwrap();
        assert_eq!(points.len(), 1);
        assert!(take_points(&mut json!({"data": {}}), "data", "1").is_none());
        assert!(take_points(&mut json!({}), "data", "1").is_none());
    }

    #[test]
    fn test_with_times_drops_bad_timestamps() {
        let points = vec![
            RawPoint {
                t: Some(json!("2024-03-01 00:00")),
                ..Default::default()
            },
            RawPoint {
                t: Some(json!("yesterday")),
                ..Default::default()
            },
            RawPoint::default(),
        ];
        assert_eq!(with_times(points, "1").len(), 1);
    }
}

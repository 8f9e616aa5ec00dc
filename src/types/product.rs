//! Defines the data products offered by the CO-OPS API and the request
//! parameters that go with them (datum, interval, units, time zone).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a product, datum, interval or similar code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
}

/// The category of time series requested from the service.
///
/// Each product has its own raw schema and is normalized into its own record
/// shape (see [`crate::Observations`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Preliminary or verified 6-minute water levels.
    WaterLevel,
    /// Verified hourly height water levels.
    HourlyHeight,
    /// Verified daily high/low water levels (HH, H, L, LL events).
    HighLow,
    /// Tide predictions, either as a series or as high/low events.
    Predictions,
    /// Observed current speed and direction.
    Currents,
}

impl ProductKind {
    pub(crate) fn wire_name(&self) -> &'static str {
        match self {
            ProductKind::WaterLevel => "water_level",
            ProductKind::HourlyHeight => "hourly_height",
            ProductKind::HighLow => "high_low",
            ProductKind::Predictions => "predictions",
            ProductKind::Currents => "currents",
        }
    }

    /// Key under which the series lives in a response body.
    pub(crate) fn data_key(&self) -> &'static str {
        match self {
            ProductKind::Predictions => "predictions",
            _ => "data",
        }
    }

    pub(crate) fn requires_datum(&self) -> bool {
        matches!(self, ProductKind::WaterLevel)
    }

    /// Only these products are thinned to one record per hour when an hourly
    /// interval is requested.
    pub(crate) fn resamples_hourly(&self) -> bool {
        matches!(self, ProductKind::WaterLevel | ProductKind::Currents)
    }
}

/// Formats a `ProductKind` using its API name.
///
/// ```
/// use coops_tides::ProductKind;
///
/// assert_eq!(ProductKind::HighLow.to_string(), "high_low");
/// ```
impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for ProductKind {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water_level" => Ok(ProductKind::WaterLevel),
            "hourly_height" => Ok(ProductKind::HourlyHeight),
            "high_low" => Ok(ProductKind::HighLow),
            "predictions" => Ok(ProductKind::Predictions),
            "currents" => Ok(ProductKind::Currents),
            other => Err(UnknownCode {
                kind: "product",
                value: other.to_string(),
            }),
        }
    }
}

/// Sampling interval of the returned series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    /// `h`: hourly values.
    Hourly,
    /// `hilo`: only high and low events (predictions).
    HighLow,
    /// A fixed number of minutes (`1`, `6`, `15`, `30`, `60`).
    Minutes(u16),
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Hourly => write!(f, "h"),
            Interval::HighLow => write!(f, "hilo"),
            Interval::Minutes(m) => write!(f, "{}", m),
        }
    }
}

impl FromStr for Interval {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(Interval::Hourly),
            "hilo" => Ok(Interval::HighLow),
            other => other.parse::<u16>().map(Interval::Minutes).map_err(|_| UnknownCode {
                kind: "interval",
                value: other.to_string(),
            }),
        }
    }
}

/// Reference level that water heights are expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Datum {
    /// Column-based reference datum.
    Crd,
    /// International Great Lakes Datum.
    Igld,
    /// Great Lakes low water datum.
    Lwd,
    /// Mean higher high water.
    Mhhw,
    /// Mean high water.
    Mhw,
    /// Mean tide level.
    Mtl,
    /// Mean sea level.
    Msl,
    /// Mean low water.
    Mlw,
    /// Mean lower low water.
    Mllw,
    /// North American Vertical Datum.
    Navd,
    /// Station datum.
    Stnd,
}

impl Datum {
    fn code(&self) -> &'static str {
        match self {
            Datum::Crd => "CRD",
            Datum::Igld => "IGLD",
            Datum::Lwd => "LWD",
            Datum::Mhhw => "MHHW",
            Datum::Mhw => "MHW",
            Datum::Mtl => "MTL",
            Datum::Msl => "MSL",
            Datum::Mlw => "MLW",
            Datum::Mllw => "MLLW",
            Datum::Navd => "NAVD",
            Datum::Stnd => "STND",
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Datum {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        [
            Datum::Crd,
            Datum::Igld,
            Datum::Lwd,
            Datum::Mhhw,
            Datum::Mhw,
            Datum::Mtl,
            Datum::Msl,
            Datum::Mlw,
            Datum::Mllw,
            Datum::Navd,
            Datum::Stnd,
        ]
        .into_iter()
        .find(|d| d.code() == upper)
        .ok_or_else(|| UnknownCode {
            kind: "datum",
            value: s.to_string(),
        })
    }
}

/// Unit system of returned values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Meters, Celsius, cm/s.
    #[default]
    Metric,
    /// Feet, Fahrenheit, knots.
    English,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Metric => write!(f, "metric"),
            Units::English => write!(f, "english"),
        }
    }
}

impl FromStr for Units {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "english" => Ok(Units::English),
            _ => Err(UnknownCode {
                kind: "units",
                value: s.to_string(),
            }),
        }
    }
}

/// Time zone the service expresses timestamps in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeZone {
    #[default]
    Gmt,
    /// Local standard time of the station.
    Lst,
    /// Local standard or daylight time of the station.
    LstLdt,
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZone::Gmt => write!(f, "gmt"),
            TimeZone::Lst => write!(f, "lst"),
            TimeZone::LstLdt => write!(f, "lst_ldt"),
        }
    }
}

impl FromStr for TimeZone {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gmt" => Ok(TimeZone::Gmt),
            "lst" => Ok(TimeZone::Lst),
            "lst_ldt" => Ok(TimeZone::LstLdt),
            _ => Err(UnknownCode {
                kind: "time zone",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_names_round_trip() {
        for product in [
            ProductKind::WaterLevel,
            ProductKind::HourlyHeight,
            ProductKind::HighLow,
            ProductKind::Predictions,
            ProductKind::Currents,
        ] {
            assert_eq!(product.to_string().parse::<ProductKind>(), Ok(product));
        }
        assert!("air_temperature".parse::<ProductKind>().is_err());
    }

    #[test]
    fn test_data_keys() {
        assert_eq!(ProductKind::Predictions.data_key(), "predictions");
        assert_eq!(ProductKind::HighLow.data_key(), "data");
        assert_eq!(ProductKind::WaterLevel.data_key(), "data");
    }

    #[test]
    fn test_interval_codes() {
        assert_eq!("h".parse::<Interval>(), Ok(Interval::Hourly));
        assert_eq!("hilo".parse::<Interval>(), Ok(Interval::HighLow));
        assert_eq!("6".parse::<Interval>(), Ok(Interval::Minutes(6)));
        assert_eq!(Interval::Minutes(15).to_string(), "15");
        assert!("daily".parse::<Interval>().is_err());
    }

    #[test]
    fn test_datum_parse_is_case_insensitive() {
        assert_eq!("mllw".parse::<Datum>(), Ok(Datum::Mllw));
        assert_eq!(Datum::Navd.to_string(), "NAVD");
        assert!("XYZ".parse::<Datum>().is_err());
    }

    #[test]
    fn test_units_and_time_zones() {
        assert_eq!("English".parse::<Units>(), Ok(Units::English));
        assert_eq!(Units::default().to_string(), "metric");
        assert_eq!("lst_ldt".parse::<TimeZone>(), Ok(TimeZone::LstLdt));
        assert_eq!(TimeZone::default(), TimeZone::Gmt);
        assert!("utc".parse::<TimeZone>().is_err());
    }
}

//! Query string construction for the CO-OPS `datagetter` endpoint.

use crate::request::error::RequestError;
use crate::request::fetch_request::FetchRequest;
use crate::types::dates::format_request_date;
use crate::types::station::StationId;
use chrono::{DateTime, Utc};
use url::Url;

/// Builds the query shared by every station of a batch.
pub(crate) fn build_base_url(
    endpoint: &str,
    request: &FetchRequest,
    begin: DateTime<Utc>,
    end: DateTime<Utc>,
    application: &str,
) -> Result<Url, RequestError> {
    let mut url = Url::parse(endpoint).map_err(|source| RequestError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("begin_date", &format_request_date(begin))
            .append_pair("end_date", &format_request_date(end))
            .append_pair("product", &request.product.to_string());
        if let Some(datum) = request.datum {
            pairs.append_pair("datum", &datum.to_string());
        }
        if let Some(interval) = request.interval {
            pairs.append_pair("interval", &interval.to_string());
        }
        pairs
            .append_pair("units", &request.units.to_string())
            .append_pair("time_zone", &request.time_zone.to_string())
            .append_pair("application", application)
            .append_pair("format", "json");
    }
    Ok(url)
}

/// Appends the station identifier to a base query.
pub(crate) fn station_url(base: &Url, station: &StationId) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("station", station.as_str());
    url
}

/// Reads the station identifier back out of a station query, for
/// [`crate::DocumentSource`] implementations that key documents by station.
pub fn station_of(url: &Url) -> Option<StationId> {
    url.query_pairs()
        .find(|(key, _)| key == "station")
        .map(|(_, value)| StationId::new(value.into_owned()))
}

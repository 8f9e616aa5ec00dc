//! The parameters of one batch request and their validation.

use crate::request::error::RequestError;
use crate::request::query::build_base_url;
use crate::types::dates::parse_request_date;
use crate::types::product::{Datum, Interval, ProductKind, TimeZone, Units};
use bon::Builder;
use chrono::{DateTime, Utc};
use url::Url;

/// Everything needed to query one product for a date range, minus the station.
///
/// Dates are accepted as text in any of the formats understood by
/// [`crate::parse_request_date`].
///
/// # Examples
///
/// ```
/// use coops_tides::{Datum, FetchRequest, ProductKind};
///
/// let request = FetchRequest::builder()
///     .begin_date("20240301")
///     .end_date("03/02/2024")
///     .product(ProductKind::WaterLevel)
///     .datum(Datum::Mllw)
///     .build();
/// assert_eq!(request.product, ProductKind::WaterLevel);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct FetchRequest {
    #[builder(into)]
    pub begin_date: String,
    #[builder(into)]
    pub end_date: String,
    pub product: ProductKind,
    /// Required for [`ProductKind::WaterLevel`].
    pub datum: Option<Datum>,
    pub interval: Option<Interval>,
    #[builder(default)]
    pub units: Units,
    #[builder(default)]
    pub time_zone: TimeZone,
    /// Overrides the configured application tag.
    #[builder(into)]
    pub application: Option<String>,
}

/// A request that passed validation, with its base query already built.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub product: ProductKind,
    pub interval: Option<Interval>,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub base_url: Url,
}

impl FetchRequest {
    /// Validates the request and builds the base query against `endpoint`.
    ///
    /// # Errors
    ///
    /// * [`RequestError::MissingDatum`] for water levels without a datum.
    /// * [`RequestError::InvalidDate`] if either date is in no accepted format.
    /// * [`RequestError::InvertedRange`] if the end date precedes the begin date.
    /// * [`RequestError::InvalidEndpoint`] if `endpoint` is not a URL.
    pub fn prepare(
        &self,
        endpoint: &str,
        default_application: &str,
    ) -> Result<PreparedRequest, RequestError> {
        if self.product.requires_datum() && self.datum.is_none() {
            return Err(RequestError::MissingDatum(self.product));
        }
        let begin = parse_request_date(&self.begin_date).map_err(|source| {
            RequestError::InvalidDate {
                field: "begin_date",
                source,
            }
        })?;
        let end = parse_request_date(&self.end_date).map_err(|source| RequestError::InvalidDate {
            field: "end_date",
            source,
        })?;
        if end < begin {
            return Err(RequestError::InvertedRange { begin, end });
        }

        let application = self.application.as_deref().unwrap_or(default_application);
        let base_url = build_base_url(endpoint, self, begin, end, application)?;

        Ok(PreparedRequest {
            product: self.product,
            interval: self.interval,
            begin,
            end,
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

    #[test]
    fn test_water_level_requires_datum() {
        let request = FetchRequest::builder()
            .begin_date("20240301")
            .end_date("20240302")
            .product(ProductKind::WaterLevel)
            .build();
        let err = request.prepare(ENDPOINT, "test").unwrap_err();
        assert!(matches!(err, RequestError::MissingDatum(ProductKind::WaterLevel)));
        assert!(err.to_string().contains("datum"));
    }

    #[test]
    fn test_other_products_do_not_require_datum() {
        for product in [ProductKind::Predictions, ProductKind::HighLow, ProductKind::Currents] {
            let request = FetchRequest::builder()
                .begin_date("20240301")
                .end_date("20240302")
                .product(product)
                .build();
            assert!(request.prepare(ENDPOINT, "test").is_ok(), "{product}");
        }
    }

    #[test]
    fn test_bad_dates_are_configuration_errors() {
        let request = FetchRequest::builder()
            .begin_date("2024-03-01")
            .end_date("20240302")
            .product(ProductKind::Predictions)
            .build();
        match request.prepare(ENDPOINT, "test") {
            Err(RequestError::InvalidDate { field, source }) => {
                assert_eq!(field, "begin_date");
                assert_eq!(source.input, "2024-03-01");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_date_error_message_lists_formats() {
        let request = FetchRequest::builder()
            .begin_date("2024-03-01")
            .end_date("20240302")
            .product(ProductKind::Predictions)
            .build();
        let err = crate::TidesError::from(request.prepare(ENDPOINT, "test").unwrap_err());
        let message = err.to_string();
        assert!(message.starts_with("Invalid begin_date"), "{message}");
        assert!(message.contains("2024-03-01"), "{message}");
        assert!(message.contains("yyyyMMdd"), "{message}");
        assert!(message.contains("MM/dd/yyyy HH:mm"), "{message}");
    }

    #[test]
    fn test_inverted_range() {
        let request = FetchRequest::builder()
            .begin_date("20240302")
            .end_date("20240301")
            .product(ProductKind::Predictions)
            .build();
        assert!(matches!(
            request.prepare(ENDPOINT, "test"),
            Err(RequestError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_invalid_endpoint() {
        let request = FetchRequest::builder()
            .begin_date("20240301")
            .end_date("20240302")
            .product(ProductKind::Predictions)
            .build();
        assert!(matches!(
            request.prepare("not a url", "test"),
            Err(RequestError::InvalidEndpoint { .. })
        ));
    }
}

//! The main entry point: validate, fetch, normalize, assemble.

use crate::assemble::{assemble, CombinedTable};
use crate::config::TidesConfig;
use crate::error::TidesError;
use crate::fetching::dispatcher::FetchDispatcher;
use crate::fetching::source::{DocumentSource, HttpSource};
use crate::frame::TideFrame;
use crate::request::fetch_request::FetchRequest;
use crate::types::product::{Datum, Interval, ProductKind, TimeZone, Units};
use crate::types::station::StationId;
use bon::bon;
use log::info;

/// Client for batch retrieval of CO-OPS station data.
///
/// Each call fetches one document per station with bounded concurrency,
/// normalizes every document into typed records and merges them into a
/// [`CombinedTable`]. Stations that fail or return nothing are reported on the
/// table instead of failing the call.
///
/// # Examples
///
/// ```no_run
/// # use coops_tides::{Datum, Interval, ProductKind, StationId, Tides, TidesError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), TidesError> {
/// let tides = Tides::new()?;
/// let stations: Vec<StationId> = vec![8454000u32.into(), 8452660u32.into()];
///
/// let table = tides
///     .get_data()
///     .stations(&stations)
///     .begin_date("20240301")
///     .end_date("20240307")
///     .product(ProductKind::WaterLevel)
///     .datum(Datum::Mllw)
///     .interval(Interval::Hourly)
///     .call()
///     .await?;
///
/// for row in table.rows() {
///     println!("{} {} {:?}", row.station_id, row.date_time, row.fields);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Tides<S = HttpSource> {
    config: TidesConfig,
    dispatcher: FetchDispatcher<S>,
}

impl Tides<HttpSource> {
    /// A client with [`TidesConfig::default`].
    pub fn new() -> Result<Self, TidesError> {
        Self::with_config(TidesConfig::default())
    }

    /// # Errors
    ///
    /// Returns [`TidesError::HttpClient`] if the HTTP client cannot be built.
    pub fn with_config(config: TidesConfig) -> Result<Self, TidesError> {
        let source = HttpSource::new(config.request_timeout).map_err(TidesError::HttpClient)?;
        Ok(Self::with_source(config, source))
    }
}

#[bon]
impl<S: DocumentSource> Tides<S> {
    /// A client that reads documents from `source` instead of the network.
    pub fn with_source(config: TidesConfig, source: S) -> Self {
        let dispatcher = FetchDispatcher::new(source, config.concurrency);
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &TidesConfig {
        &self.config
    }

    /// Fetches `product` for every station between `begin_date` and `end_date`.
    ///
    /// Dates are text in any format [`crate::parse_request_date`] accepts.
    /// `units` defaults to metric, `time_zone` to GMT and `application` to the
    /// configured tag.
    ///
    /// # Errors
    ///
    /// Returns [`TidesError::Request`] when the request is invalid (no datum
    /// for water levels, unreadable or inverted dates, bad endpoint). Nothing
    /// is fetched in that case. Per-station failures are not errors; see
    /// [`CombinedTable::skipped`].
    #[builder]
    pub async fn get_data(
        &self,
        stations: &[StationId],
        begin_date: &str,
        end_date: &str,
        product: ProductKind,
        datum: Option<Datum>,
        interval: Option<Interval>,
        units: Option<Units>,
        time_zone: Option<TimeZone>,
        application: Option<String>,
    ) -> Result<CombinedTable, TidesError> {
        let request = FetchRequest {
            begin_date: begin_date.to_string(),
            end_date: end_date.to_string(),
            product,
            datum,
            interval,
            units: units.unwrap_or_default(),
            time_zone: time_zone.unwrap_or_default(),
            application,
        };
        self.fetch(stations, &request).await
    }

    /// Same as [`Tides::get_data`], returning the rows as a lazy frame.
    #[builder]
    pub async fn get_frame(
        &self,
        stations: &[StationId],
        begin_date: &str,
        end_date: &str,
        product: ProductKind,
        datum: Option<Datum>,
        interval: Option<Interval>,
        units: Option<Units>,
        time_zone: Option<TimeZone>,
        application: Option<String>,
    ) -> Result<TideFrame, TidesError> {
        let table = self
            .get_data()
            .stations(stations)
            .begin_date(begin_date)
            .end_date(end_date)
            .product(product)
            .maybe_datum(datum)
            .maybe_interval(interval)
            .maybe_units(units)
            .maybe_time_zone(time_zone)
            .maybe_application(application)
            .call()
            .await?;
        Ok(table.to_frame()?)
    }

    /// Runs a prebuilt [`FetchRequest`] for `stations`.
    ///
    /// The request is validated before any station is contacted. After that,
    /// per-station failures are recorded in the returned table rather than
    /// failing the call.
    ///
    /// # Arguments
    ///
    /// * `stations` - The stations to query, in queue order.
    /// * `request` - Product, date range and optional query parameters.
    ///
    /// # Returns
    ///
    /// A [`CombinedTable`] with the rows of every station that returned data,
    /// plus the skipped and empty stations.
    ///
    /// # Errors
    ///
    /// Returns [`TidesError::Request`] if a date cannot be parsed, the range is
    /// inverted, or a water level product is requested without a datum.
    pub async fn fetch(
        &self,
        stations: &[StationId],
        request: &FetchRequest,
    ) -> Result<CombinedTable, TidesError> {
        let prepared = request.prepare(&self.config.endpoint, &self.config.application)?;
        info!(
            "Fetching {} for {} stations from {} to {}",
            prepared.product,
            stations.len(),
            prepared.begin,
            prepared.end
        );
        let documents = self
            .dispatcher
            .fetch_all(stations, &prepared.base_url)
            .await;
        Ok(assemble(documents, prepared.product, prepared.interval))
    }
}

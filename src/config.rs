use crate::fetching::dispatcher::DEFAULT_CONCURRENCY;
use bon::Builder;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";
pub const DEFAULT_APPLICATION: &str = "coops_tides";

/// Client settings. Every field has a default, so a partial config file or a
/// builder call with only the fields of interest is enough.
///
/// # Examples
///
/// ```
/// use coops_tides::TidesConfig;
/// use std::time::Duration;
///
/// let config = TidesConfig::builder()
///     .concurrency(4)
///     .request_timeout(Duration::from_secs(30))
///     .build();
/// assert_eq!(config.concurrency, 4);
/// assert_eq!(config.application, "coops_tides");
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Deserialize)]
#[serde(default)]
pub struct TidesConfig {
    /// Data getter URL every query is built on.
    #[builder(into, default = DEFAULT_ENDPOINT.to_string())]
    pub endpoint: String,
    /// Sent as the `application` query parameter unless a request overrides it.
    #[builder(into, default = DEFAULT_APPLICATION.to_string())]
    pub application: String,
    /// Maximum number of requests in flight at once. Zero behaves like one.
    #[builder(default = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
    pub request_timeout: Option<Duration>,
}

impl Default for TidesConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

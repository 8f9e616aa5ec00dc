//! Where station documents come from.

use crate::fetching::error::FetchError;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Retrieves one JSON document for a fully built station query.
///
/// The dispatcher polls many of these futures concurrently on one task, so
/// implementations do not need to be `Send`.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    async fn fetch(&self, url: &Url) -> Result<Value, FetchError>;
}

/// Fetches documents over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Creates a source, optionally bounding every request by `timeout`.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<Value, FetchError> {
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(url.to_string(), e))?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

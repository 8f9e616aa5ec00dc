use crate::request::error::RequestError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TidesError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to build data frame")]
    Frame(#[from] PolarsError),
}

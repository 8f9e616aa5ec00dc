pub mod error;
pub mod fetch_request;
pub(crate) mod query;

//! Traits describing the catalog backend and shared error types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::{CatalogQuery, RawSkip};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while loading the skip catalog.
pub enum CatalogError {
    /// Postcode or area was blank.
    #[error("Invalid query: {0}")]
    InvalidQuery(&'static str),
    /// Backend answered with a non-success status code.
    #[error("Catalog request failed with status {status}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
    },
    /// Network layer failed before a status was received.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Response body was not a list of catalog records.
    #[error("Decode error: {0}")]
    Decode(#[from] JsonError),
    /// A record carried values that cannot be priced.
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord {
        /// Identifier of the offending raw record.
        id: i64,
        /// What was wrong with it.
        reason: String,
    },
}

impl CatalogError {
    /// HTTP status code carried by the error, if the backend answered at all.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CatalogError::Status { status } => Some(*status),
            CatalogError::Network(err) => err.status().map(|status| status.as_u16()),
            CatalogError::InvalidQuery(_)
            | CatalogError::Decode(_)
            | CatalogError::InvalidRecord { .. } => None,
        }
    }
}

#[async_trait]
/// Trait for backends that serve raw skip records for a location.
pub trait CatalogPort: Send + Sync {
    /// Short name of the backend, used in logs.
    fn name(&self) -> &str;

    /// Fetch the raw catalog for a location with a single request.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the request fails, the status is not a success,
    /// or the body cannot be decoded.
    async fn raw_catalog(&self, query: &CatalogQuery) -> Result<Vec<RawSkip>, CatalogError>;
}

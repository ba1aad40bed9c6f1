//! Outbound IGDB API access
//!
//! [`IgdbApi`] is the seam the search flow and the passthrough handler depend
//! on; [`IgdbClient`] is the reqwest-backed implementation used in production.

pub mod client;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::IgdbError;

pub use client::IgdbClient;

/// One outbound call: `endpoint[/option[/identifier]]` plus query pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgdbRequest {
    pub endpoint: String,
    pub option: Option<String>,
    pub identifier: Option<String>,
    /// Forwarded in order, encoded as a standard query string
    pub query: Vec<(String, String)>,
}

impl IgdbRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            option: None,
            identifier: None,
            query: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.option = Some(option.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Successful upstream response, body bytes untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub body: Bytes,
}

#[async_trait]
pub trait IgdbApi: Send + Sync {
    /// Issue a single GET. Non-2xx responses and transport failures are errors;
    /// nothing is retried.
    async fn call(&self, request: &IgdbRequest) -> Result<RawResponse, IgdbError>;
}

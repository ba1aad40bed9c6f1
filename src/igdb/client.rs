//! reqwest-backed IGDB client

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{IgdbApi, IgdbRequest, RawResponse};
use crate::config::IgdbConfig;
use crate::errors::IgdbError;

#[derive(Clone)]
pub struct IgdbClient {
    client: Client,
    base_url: Url,
    api_key_header: String,
    api_key: String,
}

impl IgdbClient {
    pub fn new(config: &IgdbConfig) -> Result<Self, IgdbError> {
        let timeout = config
            .timeout()
            .map_err(|e| IgdbError::InvalidConfig(format!("{e:#}")))?;
        Self::with_timeout(config, timeout)
    }

    pub fn with_timeout(config: &IgdbConfig, timeout: Option<Duration>) -> Result<Self, IgdbError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| IgdbError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(IgdbError::InvalidUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            api_key_header: config.api_key_header.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Build `base/endpoint/[option/[identifier/]]`, each segment percent-encoded
    pub fn build_url(&self, request: &IgdbRequest) -> Result<Url, IgdbError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| IgdbError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(&request.endpoint);
            if let Some(option) = &request.option {
                segments.push(option);
                if let Some(identifier) = &request.identifier {
                    segments.push(identifier);
                }
            }
            // trailing slash
            segments.push("");
        }
        Ok(url)
    }
}

#[async_trait]
impl IgdbApi for IgdbClient {
    async fn call(&self, request: &IgdbRequest) -> Result<RawResponse, IgdbError> {
        let url = self.build_url(request)?;
        debug!("IGDB GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(self.api_key_header.as_str(), self.api_key.as_str())
            .query(&request.query)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!("IGDB returned {} for {}", status, url);
            return Err(IgdbError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(RawResponse { body })
    }
}

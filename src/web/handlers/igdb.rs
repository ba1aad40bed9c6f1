//! Generic IGDB passthrough
//!
//! `/igdb/{endpoint}[/{option}[/{identifier}]]` is forwarded to IGDB with the
//! query string intact. Nothing is cached or ingested here.

use axum::{
    extract::{Path, RawQuery, State},
    response::Response,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    errors::AppResult,
    igdb::IgdbRequest,
    web::{AppState, responses::raw_json},
};

#[derive(Debug, Deserialize)]
pub struct IgdbPath {
    pub endpoint: String,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
}

impl IgdbPath {
    fn into_request(self, raw_query: Option<&str>) -> IgdbRequest {
        IgdbRequest {
            endpoint: self.endpoint,
            option: self.option,
            identifier: self.identifier,
            query: parse_query(raw_query),
        }
    }
}

/// Decode a raw query string into ordered pairs
pub fn parse_query(raw_query: Option<&str>) -> Vec<(String, String)> {
    raw_query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

pub async fn passthrough(
    State(state): State<AppState>,
    Path(path): Path<IgdbPath>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    let request = path.into_request(query.as_deref());
    debug!(
        endpoint = %request.endpoint,
        option = ?request.option,
        identifier = ?request.identifier,
        "Forwarding IGDB request"
    );

    let response = state.igdb.call(&request).await?;
    Ok(raw_json(response.body))
}

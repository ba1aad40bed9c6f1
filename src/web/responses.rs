//! HTTP response helpers
//!
//! IGDB bodies are relayed as raw bytes, never re-serialized, so a client sees
//! exactly what was received or cached.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// Header telling clients whether a search was answered from the cache
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// A 200 response carrying a raw JSON body
pub fn raw_json(body: impl Into<Bytes>) -> Response {
    let body: Bytes = body.into();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

/// A raw JSON response tagged with its cache status
pub fn raw_json_with_cache_status(body: String, cache_hit: bool) -> Response {
    let mut response = raw_json(body);
    let value = if cache_hit { "HIT" } else { "MISS" };
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static(value));
    response
}

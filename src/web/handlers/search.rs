//! Search-with-cache endpoint

use axum::{
    extract::{RawQuery, State},
    response::Response,
};

use crate::{
    errors::{AppError, AppResult},
    web::{AppState, responses::raw_json_with_cache_status},
};

const TERM_PARAM: &str = "term";

/// Decode one form-encoded query component; `None` when it is not UTF-8
fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Extract the search term from a raw query string. The first `term` wins.
pub fn search_term(raw_query: Option<&str>) -> AppResult<String> {
    let pairs = raw_query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty());

    for pair in pairs {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode_component(key).as_deref() != Some(TERM_PARAM) {
            continue;
        }
        return decode_component(value)
            .ok_or_else(|| AppError::validation("query parameter 'term' is not valid UTF-8"));
    }

    Err(AppError::validation("missing query parameter 'term'"))
}

/// `GET /app/searchGame?term=...`
pub async fn search_game(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    let term = search_term(query.as_deref())?;

    let result = state.search_service.search(&term).await?;
    Ok(raw_json_with_cache_status(result.body, result.cache_hit))
}

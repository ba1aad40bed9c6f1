//! Static asset handlers
//!
//! Serves the embedded front-end bundle. Any path that is not an embedded
//! asset gets the JSON not-found response.

use axum::{
    http::{HeaderValue, Uri, header},
    response::{IntoResponse, Response},
};

use crate::{assets::StaticAssets, errors::AppError};

/// Fallback handler: an embedded asset by path, otherwise 404
pub async fn serve_embedded_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path.is_empty() {
        return AppError::NotFound.into_response();
    }

    match StaticAssets::get_asset(&format!("static/{path}")) {
        Some(file) => {
            let content_type = StaticAssets::get_content_type(path);
            (
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
                    (
                        header::CACHE_CONTROL,
                        HeaderValue::from_static("public, max-age=3600"),
                    ),
                ],
                file.data.into_owned(),
            )
                .into_response()
        }
        None => AppError::NotFound.into_response(),
    }
}

//! Error type definitions for the IGDB proxy
//!
//! The HTTP mapping lives next to the type so every handler reports failures
//! the same way: a JSON body `{"error": <code>}` whose code matches the status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Fixed message returned for unknown routes
pub const NOT_FOUND_MESSAGE: &str = "Endpoint does not exist";

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The IGDB call failed; `status` is the code reported to the client
    #[error("Upstream failure ({status}): {message}")]
    UpstreamFailure { status: u16, message: String },

    /// The IGDB body could not be decoded as a list of games
    #[error("Decode failure: {message}")]
    DecodeFailure { message: String },

    /// Unknown route
    #[error("Not found")]
    NotFound,

    /// Invalid or missing request input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Repository layer errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// An insert was ignored on a unique key but the conflicting row could not be read back
    #[error("Row missing after insert: {table} with {field} = {value}")]
    MissingAfterInsert {
        table: String,
        field: String,
        value: String,
    },
}

/// Errors raised by the outbound IGDB client
#[derive(Error, Debug)]
pub enum IgdbError {
    /// IGDB answered with a non-2xx status
    #[error("IGDB returned HTTP {status}")]
    Status { status: u16, body: String },

    /// Connection, DNS, TLS or timeout failure
    #[error("IGDB request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request URL could not be built from the configured base
    #[error("Invalid IGDB URL: {0}")]
    InvalidUrl(String),

    /// The client settings could not be applied
    #[error("Invalid IGDB client configuration: {0}")]
    InvalidConfig(String),
}

impl IgdbError {
    /// Status code reported to our own caller for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT.as_u16(),
            Self::Transport(e) => e
                .status()
                .map(|s| s.as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY.as_u16()),
            Self::InvalidUrl(_) => StatusCode::BAD_GATEWAY.as_u16(),
            Self::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

impl From<IgdbError> for AppError {
    fn from(err: IgdbError) -> Self {
        Self::UpstreamFailure {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a decode error with a custom message
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::DecodeFailure {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Codes outside 100..=999 cannot be sent; report them as a bad gateway.
            Self::UpstreamFailure { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::DecodeFailure { .. } => StatusCode::BAD_GATEWAY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        } else {
            warn!(status = status.as_u16(), "Request rejected: {}", self);
        }

        let body = match self {
            Self::NotFound => json!({ "error": NOT_FOUND_MESSAGE }),
            _ => json!({ "error": status.as_u16() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_propagated() {
        let err = AppError::from(IgdbError::Status {
            status: 503,
            body: String::new(),
        });
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_decode_failure_maps_to_bad_gateway() {
        assert_eq!(
            AppError::decode("expected a list").status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_unsendable_upstream_status_falls_back() {
        let err = AppError::UpstreamFailure {
            status: 0,
            message: "no status".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_invalid_url_reports_bad_gateway() {
        let err = IgdbError::InvalidUrl("cannot be a base".to_string());
        assert_eq!(err.status_code(), 502);
    }
}

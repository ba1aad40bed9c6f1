//! Centralized error handling for the IGDB proxy
//!
//! Errors are grouped by the layer that produces them:
//!
//! - **Application Errors** ([`AppError`]): what a request handler can fail with,
//!   each variant carrying its own HTTP status mapping
//! - **Repository Errors** ([`RepositoryError`]): data access layer failures
//! - **Upstream Errors** ([`IgdbError`]): failures of the outbound IGDB call
//!
//! # Usage
//!
//! ```rust
//! use igdb_proxy::errors::{AppError, AppResult};
//!
//! fn require_term(term: Option<String>) -> AppResult<String> {
//!     term.ok_or_else(|| AppError::validation("missing query parameter 'term'"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

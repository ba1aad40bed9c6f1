//! Service layer
//!
//! Services receive their collaborators through constructors; handlers only
//! translate HTTP to service calls.

pub mod search;

pub use search::{GameSearchService, SearchResult};

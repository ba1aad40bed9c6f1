//! Web handlers module
//!
//! HTTP request handlers organized by area. Handlers stay thin and delegate
//! to the IGDB client or the search service.

pub mod health;
pub mod igdb;
pub mod index;
pub mod search;
pub mod static_assets;

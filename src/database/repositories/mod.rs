//! SeaORM repository implementations
//!
//! These repositories are the row store behind the search flow. They work
//! across SQLite, PostgreSQL and MySQL.

pub mod game;
pub mod search_cache;
pub mod traits;

// Re-export for convenience
pub use game::GameSeaOrmRepository;
pub use search_cache::SearchCacheSeaOrmRepository;
pub use traits::{GameStore, RowStore, SearchCacheStore};

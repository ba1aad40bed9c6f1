//! Domain records persisted by the row store
//!
//! These are plain data types; the SeaORM entities in [`crate::entities`] are
//! converted into them at the repository boundary.

pub mod game;
pub mod search_cache;

pub use game::{GameFilter, GameRecord, NewGameRecord};
pub use search_cache::{CachedSearch, CachedSearchFilter, NewCachedSearch};

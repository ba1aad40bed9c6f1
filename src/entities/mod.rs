//! SeaORM entity definitions

pub mod prelude;

pub mod game;
pub mod search_cache;

pub use super::game::Entity as Game;
pub use super::search_cache::Entity as SearchCache;

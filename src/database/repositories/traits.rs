//! Row store abstraction shared by the SeaORM repositories

use async_trait::async_trait;

use crate::errors::RepositoryResult;
use crate::models::{
    CachedSearch, CachedSearchFilter, GameFilter, GameRecord, NewCachedSearch, NewGameRecord,
};

/// Read and append access to one kind of record
///
/// There is deliberately no update or delete: rows are written once and then
/// only ever read.
#[async_trait]
pub trait RowStore<Filter, NewRow, Row>: Send + Sync
where
    Filter: Send + 'static,
    NewRow: Send + 'static,
{
    /// All rows matching every field set in `filter`, oldest first.
    /// An empty filter matches every row.
    async fn get_rows(&self, filter: Filter) -> RepositoryResult<Vec<Row>>;

    /// Insert a row. If its unique key is already taken the existing row is
    /// returned unchanged.
    async fn add_row(&self, values: NewRow) -> RepositoryResult<Row>;
}

/// Row store for cached search responses
pub trait SearchCacheStore: RowStore<CachedSearchFilter, NewCachedSearch, CachedSearch> {}

impl<T> SearchCacheStore for T where T: RowStore<CachedSearchFilter, NewCachedSearch, CachedSearch> {}

/// Row store for ingested games
pub trait GameStore: RowStore<GameFilter, NewGameRecord, GameRecord> {}

impl<T> GameStore for T where T: RowStore<GameFilter, NewGameRecord, GameRecord> {}

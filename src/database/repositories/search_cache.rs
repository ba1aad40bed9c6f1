//! SeaORM-based search cache repository

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::RowStore;
use crate::entities::{prelude::SearchCache, search_cache};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{CachedSearch, CachedSearchFilter, NewCachedSearch};

/// SeaORM-based repository for cached search results
#[derive(Clone)]
pub struct SearchCacheSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl SearchCacheSeaOrmRepository {
    /// Create a new repository instance
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    async fn first_by_term(&self, term: &str) -> RepositoryResult<Option<CachedSearch>> {
        let model = SearchCache::find()
            .filter(search_cache::Column::Term.eq(term))
            .order_by_asc(search_cache::Column::Id)
            .one(&*self.connection)
            .await?;
        Ok(model.map(Self::model_to_domain))
    }

    fn model_to_domain(model: search_cache::Model) -> CachedSearch {
        CachedSearch {
            id: model.id,
            term: model.term,
            results: model.results,
        }
    }
}

#[async_trait]
impl RowStore<CachedSearchFilter, NewCachedSearch, CachedSearch> for SearchCacheSeaOrmRepository {
    async fn get_rows(&self, filter: CachedSearchFilter) -> RepositoryResult<Vec<CachedSearch>> {
        let mut query = SearchCache::find();
        if let Some(term) = filter.term {
            query = query.filter(search_cache::Column::Term.eq(term));
        }

        let models = query
            .order_by_asc(search_cache::Column::Id)
            .all(&*self.connection)
            .await?;

        Ok(models.into_iter().map(Self::model_to_domain).collect())
    }

    async fn add_row(&self, values: NewCachedSearch) -> RepositoryResult<CachedSearch> {
        let term = values.term.clone();
        let active_model = search_cache::ActiveModel {
            term: Set(values.term),
            results: Set(values.results),
            ..Default::default()
        };

        let inserted = SearchCache::insert(active_model)
            .on_conflict(
                OnConflict::column(search_cache::Column::Term)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&*self.connection)
            .await;

        let row = match inserted {
            Ok(result) => SearchCache::find_by_id(result.last_insert_id)
                .one(&*self.connection)
                .await?
                .map(Self::model_to_domain),
            Err(DbErr::RecordNotInserted) => {
                debug!("Search cache already holds term '{}', keeping first write", term);
                self.first_by_term(&term).await?
            }
            Err(e) => return Err(e.into()),
        };

        row.ok_or_else(|| RepositoryError::MissingAfterInsert {
            table: "search_cache".to_string(),
            field: "term".to_string(),
            value: term,
        })
    }
}

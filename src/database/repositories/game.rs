//! SeaORM-based game repository

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::RowStore;
use crate::entities::{game, prelude::Game};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{GameFilter, GameRecord, NewGameRecord};

/// SeaORM-based repository for games ingested from IGDB
#[derive(Clone)]
pub struct GameSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl GameSeaOrmRepository {
    /// Create a new repository instance
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    fn model_to_domain(model: game::Model) -> GameRecord {
        GameRecord {
            id: model.id,
            igdb_id: model.igdb_id,
            name: model.name,
            cover_url: model.cover_url,
            igdb_url: model.igdb_url,
        }
    }
}

#[async_trait]
impl RowStore<GameFilter, NewGameRecord, GameRecord> for GameSeaOrmRepository {
    async fn get_rows(&self, filter: GameFilter) -> RepositoryResult<Vec<GameRecord>> {
        let mut query = Game::find();
        if let Some(igdb_id) = filter.igdb_id {
            query = query.filter(game::Column::IgdbId.eq(igdb_id));
        }

        let models = query
            .order_by_asc(game::Column::Id)
            .all(&*self.connection)
            .await?;

        Ok(models.into_iter().map(Self::model_to_domain).collect())
    }

    async fn add_row(&self, values: NewGameRecord) -> RepositoryResult<GameRecord> {
        let igdb_id = values.igdb_id;
        let active_model = game::ActiveModel {
            igdb_id: Set(values.igdb_id),
            name: Set(values.name),
            cover_url: Set(values.cover_url),
            igdb_url: Set(values.igdb_url),
            ..Default::default()
        };

        let inserted = Game::insert(active_model)
            .on_conflict(
                OnConflict::column(game::Column::IgdbId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&*self.connection)
            .await;

        let model = match inserted {
            Ok(result) => {
                Game::find_by_id(result.last_insert_id)
                    .one(&*self.connection)
                    .await?
            }
            Err(DbErr::RecordNotInserted) => {
                debug!("Game {} already ingested, keeping first write", igdb_id);
                Game::find()
                    .filter(game::Column::IgdbId.eq(igdb_id))
                    .one(&*self.connection)
                    .await?
            }
            Err(e) => return Err(e.into()),
        };

        model
            .map(Self::model_to_domain)
            .ok_or_else(|| RepositoryError::MissingAfterInsert {
                table: "game".to_string(),
                field: "igdb_id".to_string(),
                value: igdb_id.to_string(),
            })
    }
}

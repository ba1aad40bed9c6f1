//! Initial schema: search result cache and ingested games
//!
//! `search_cache.term` and `game.igdb_id` carry unique indexes so concurrent
//! misses for the same term, or concurrent ingestion of the same game, cannot
//! produce duplicate rows. Inserts rely on these indexes to ignore conflicts.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchCache::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchCache::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchCache::Term).string().not_null())
                    .col(ColumnDef::new(SearchCache::Results).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_cache_term")
                    .table(SearchCache::Table)
                    .col(SearchCache::Term)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Game::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Game::IgdbId).big_integer().not_null())
                    .col(ColumnDef::new(Game::Name).string().not_null())
                    .col(ColumnDef::new(Game::CoverUrl).string().null())
                    .col(ColumnDef::new(Game::IgdbUrl).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_igdb_id")
                    .table(Game::Table)
                    .col(Game::IgdbId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SearchCache::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchCache {
    Table,
    Id,
    Term,
    Results,
}

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
    IgdbId,
    Name,
    CoverUrl,
    IgdbUrl,
}

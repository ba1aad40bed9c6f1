//! Search-and-cache flow
//!
//! A search is answered from the cache when the exact term has been seen
//! before. Otherwise IGDB is queried once, the normalized body is cached
//! forever under the term, and every game in it is ingested into the game
//! table (first write wins). Cached entries are never refreshed or expired.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::database::repositories::{GameStore, SearchCacheStore};
use crate::errors::{AppError, AppResult};
use crate::igdb::{IgdbApi, IgdbRequest};
use crate::models::{CachedSearchFilter, GameFilter, NewCachedSearch, NewGameRecord};

/// IGDB endpoint queried for searches
pub const SEARCH_ENDPOINT: &str = "games";
/// Fields requested for every search
pub const SEARCH_FIELDS: &str = "id,name,url,cover.url";
/// Maximum number of games requested per search
pub const SEARCH_LIMIT: &str = "5";

/// Body to return for a search and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub body: String,
    pub cache_hit: bool,
}

/// One element of the IGDB search response
#[derive(Debug, Deserialize)]
struct IgdbGame {
    id: i64,
    name: String,
    url: String,
    #[serde(default)]
    cover: Option<IgdbCover>,
}

#[derive(Debug, Deserialize)]
struct IgdbCover {
    url: String,
}

impl From<IgdbGame> for NewGameRecord {
    fn from(game: IgdbGame) -> Self {
        Self {
            igdb_id: game.id,
            name: game.name,
            cover_url: game.cover.map(|c| c.url),
            igdb_url: game.url,
        }
    }
}

/// Remove every carriage return and line feed from an upstream body
pub fn normalize_body(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

#[derive(Clone)]
pub struct GameSearchService {
    igdb: Arc<dyn IgdbApi>,
    search_cache: Arc<dyn SearchCacheStore>,
    games: Arc<dyn GameStore>,
}

impl GameSearchService {
    pub fn new(
        igdb: Arc<dyn IgdbApi>,
        search_cache: Arc<dyn SearchCacheStore>,
        games: Arc<dyn GameStore>,
    ) -> Self {
        Self {
            igdb,
            search_cache,
            games,
        }
    }

    /// Answer a search for `term`, consulting IGDB only on a cache miss
    pub async fn search(&self, term: &str) -> AppResult<SearchResult> {
        let cached = self
            .search_cache
            .get_rows(CachedSearchFilter::by_term(term))
            .await?;

        if let Some(hit) = cached.into_iter().next() {
            debug!("Search cache hit for '{}'", term);
            return Ok(SearchResult {
                body: hit.results,
                cache_hit: true,
            });
        }

        info!("Search cache miss for '{}', querying IGDB", term);
        let request = Self::search_request(term);
        let response = self.igdb.call(&request).await?;
        let text = std::str::from_utf8(&response.body)
            .map_err(|e| AppError::decode(format!("search response is not UTF-8: {e}")))?;
        let body = normalize_body(text);

        self.search_cache
            .add_row(NewCachedSearch {
                term: term.to_string(),
                results: body.clone(),
            })
            .await?;

        let ingested = self.ingest(&body).await?;
        debug!("Ingested {} new games for '{}'", ingested, term);

        Ok(SearchResult {
            body,
            cache_hit: false,
        })
    }

    fn search_request(term: &str) -> IgdbRequest {
        IgdbRequest::new(SEARCH_ENDPOINT)
            .with_query("search", term)
            .with_query("fields", SEARCH_FIELDS)
            .with_query("limit", SEARCH_LIMIT)
    }

    /// Store every game not yet known by IGDB id. Stops at the first malformed
    /// entry; games stored before it are kept.
    async fn ingest(&self, body: &str) -> AppResult<usize> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(body)
            .map_err(|e| AppError::decode(format!("search response is not a JSON list: {e}")))?;

        let mut inserted = 0;
        for entry in entries {
            let game: IgdbGame = serde_json::from_value(entry)
                .map_err(|e| AppError::decode(format!("malformed game in search response: {e}")))?;

            let existing = self.games.get_rows(GameFilter::by_igdb_id(game.id)).await?;
            if !existing.is_empty() {
                continue;
            }

            self.games.add_row(game.into()).await?;
            inserted += 1;
        }

        Ok(inserted)
    }
}

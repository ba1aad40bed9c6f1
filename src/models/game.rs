use serde::{Deserialize, Serialize};

/// A game ingested from IGDB search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: i32,
    /// IGDB's own identifier, unique across records
    pub igdb_id: i64,
    pub name: String,
    pub cover_url: Option<String>,
    pub igdb_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameRecord {
    pub igdb_id: i64,
    pub name: String,
    pub cover_url: Option<String>,
    pub igdb_url: String,
}

/// Exact-match filter; unset fields do not constrain the query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    pub igdb_id: Option<i64>,
}

impl GameFilter {
    pub fn by_igdb_id(igdb_id: i64) -> Self {
        Self {
            igdb_id: Some(igdb_id),
        }
    }
}

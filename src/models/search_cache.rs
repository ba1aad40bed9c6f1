use serde::{Deserialize, Serialize};

/// Raw IGDB response body stored for a search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSearch {
    pub id: i32,
    pub term: String,
    /// JSON text exactly as it was returned to the first caller
    pub results: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCachedSearch {
    pub term: String,
    pub results: String,
}

/// Exact-match filter; unset fields do not constrain the query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedSearchFilter {
    pub term: Option<String>,
}

impl CachedSearchFilter {
    pub fn by_term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
        }
    }
}

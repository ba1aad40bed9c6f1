//! End-to-end tests for the HTTP surface
//!
//! The router runs against an in-memory SQLite database and a scripted IGDB
//! double, so nothing leaves the process.

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use igdb_proxy::{
    config::{Config, DatabaseConfig},
    database::{
        Database,
        repositories::{GameSeaOrmRepository, RowStore, SearchCacheSeaOrmRepository},
    },
    errors::IgdbError,
    igdb::{IgdbApi, IgdbRequest, RawResponse},
    models::{CachedSearchFilter, GameFilter},
    web::{AppState, create_router},
};

const TWO_GAMES: &str = "[\n  {\"id\": 1942, \"name\": \"The Witcher 3\", \"url\": \"https://www.igdb.com/games/the-witcher-3\", \"cover\": {\"id\": 89386, \"url\": \"//images.igdb.com/t_thumb/co1wyy.jpg\"}},\r\n  {\"id\": 80, \"name\": \"The Witcher\", \"url\": \"https://www.igdb.com/games/the-witcher\"}\n]";

struct ScriptedIgdb {
    reply: Result<String, u16>,
    calls: Mutex<Vec<IgdbRequest>>,
}

impl ScriptedIgdb {
    fn replying(body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(body.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<IgdbRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IgdbApi for ScriptedIgdb {
    async fn call(&self, request: &IgdbRequest) -> Result<RawResponse, IgdbError> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(body) => Ok(RawResponse {
                body: body.clone().into(),
            }),
            Err(status) => Err(IgdbError::Status {
                status: *status,
                body: "{\"message\":\"upstream says no\"}".to_string(),
            }),
        }
    }
}

async fn setup(igdb: Arc<ScriptedIgdb>) -> (TestServer, AppState) {
    let config = Config {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        },
        ..Default::default()
    };
    let database = Database::new(&config.database).await.unwrap();
    database.migrate().await.unwrap();

    let state = AppState::new(config, database, igdb);
    let server = TestServer::new(create_router(state.clone())).unwrap();
    (server, state)
}

#[tokio::test]
async fn test_passthrough_forwards_path_segments() {
    let igdb = ScriptedIgdb::replying("[{\"id\":1}]\n");
    let (server, _) = setup(igdb.clone()).await;

    let response = server.get("/igdb/games/1").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "[{\"id\":1}]\n");
    assert_eq!(response.header("content-type"), "application/json");

    let calls = igdb.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, "games");
    assert_eq!(calls[0].option.as_deref(), Some("1"));
    assert_eq!(calls[0].identifier, None);
    assert!(calls[0].query.is_empty());
}

#[tokio::test]
async fn test_passthrough_with_all_segments_and_query() {
    let igdb = ScriptedIgdb::replying("[]");
    let (server, _) = setup(igdb.clone()).await;

    server
        .get("/igdb/games/1942/covers")
        .add_query_param("fields", "id,url")
        .add_query_param("search", "the witcher")
        .await
        .assert_status_ok();

    let calls = igdb.calls();
    assert_eq!(calls[0].endpoint, "games");
    assert_eq!(calls[0].option.as_deref(), Some("1942"));
    assert_eq!(calls[0].identifier.as_deref(), Some("covers"));
    assert_eq!(
        calls[0].query,
        vec![
            ("fields".to_string(), "id,url".to_string()),
            ("search".to_string(), "the witcher".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_passthrough_does_not_touch_the_store() {
    let igdb = ScriptedIgdb::replying(TWO_GAMES);
    let (server, state) = setup(igdb).await;

    server.get("/igdb/games").await.assert_status_ok();

    let games = GameSeaOrmRepository::new(state.database.connection());
    assert!(games.get_rows(GameFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_passthrough_relays_upstream_status() {
    let (server, _) = setup(ScriptedIgdb::failing(401)).await;

    let response = server.get("/igdb/games").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "error": 401 }));
}

#[tokio::test]
async fn test_unknown_route_returns_fixed_not_found() {
    let (server, _) = setup(ScriptedIgdb::replying("[]")).await;

    for path in ["/nope", "/igdb", "/igdb/games/1/covers/extra", "/app"] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Endpoint does not exist" }),
            "path {path}"
        );
    }
}

#[tokio::test]
async fn test_search_miss_then_hit() {
    let igdb = ScriptedIgdb::replying(TWO_GAMES);
    let (server, state) = setup(igdb.clone()).await;

    let first = server
        .get("/app/searchGame")
        .add_query_param("term", "witcher")
        .await;
    first.assert_status_ok();
    assert_eq!(first.header("x-cache"), "MISS");
    let body = first.text();
    assert!(!body.contains('\n') && !body.contains('\r'));

    let second = server
        .get("/app/searchGame")
        .add_query_param("term", "witcher")
        .await;
    second.assert_status_ok();
    assert_eq!(second.header("x-cache"), "HIT");
    assert_eq!(second.text(), body);

    let calls = igdb.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, "games");
    assert_eq!(
        calls[0].query,
        vec![
            ("search".to_string(), "witcher".to_string()),
            ("fields".to_string(), "id,name,url,cover.url".to_string()),
            ("limit".to_string(), "5".to_string()),
        ]
    );

    let cache = SearchCacheSeaOrmRepository::new(state.database.connection());
    let rows = cache
        .get_rows(CachedSearchFilter::by_term("witcher"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].results, body);

    let games = GameSeaOrmRepository::new(state.database.connection());
    let stored = games.get_rows(GameFilter::default()).await.unwrap();
    assert_eq!(stored.len(), 2);
    let witcher3 = stored.iter().find(|g| g.igdb_id == 1942).unwrap();
    assert_eq!(
        witcher3.cover_url.as_deref(),
        Some("//images.igdb.com/t_thumb/co1wyy.jpg")
    );
    let witcher = stored.iter().find(|g| g.igdb_id == 80).unwrap();
    assert_eq!(witcher.cover_url, None);
}

#[tokio::test]
async fn test_search_upstream_failure_is_not_cached() {
    let igdb = ScriptedIgdb::failing(503);
    let (server, state) = setup(igdb.clone()).await;

    let response = server
        .get("/app/searchGame")
        .add_query_param("term", "zelda")
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>(), json!({ "error": 503 }));

    let cache = SearchCacheSeaOrmRepository::new(state.database.connection());
    assert!(
        cache
            .get_rows(CachedSearchFilter::by_term("zelda"))
            .await
            .unwrap()
            .is_empty()
    );

    // A failed search is retried upstream next time
    server
        .get("/app/searchGame")
        .add_query_param("term", "zelda")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(igdb.calls().len(), 2);
}

#[tokio::test]
async fn test_search_without_term_is_rejected() {
    let igdb = ScriptedIgdb::replying("[]");
    let (server, _) = setup(igdb.clone()).await;

    let response = server.get("/app/searchGame").await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>(), json!({ "error": 400 }));
    assert!(igdb.calls().is_empty());
}

#[tokio::test]
async fn test_search_with_repeated_term_uses_the_first() {
    let igdb = ScriptedIgdb::replying("[]");
    let (server, _) = setup(igdb.clone()).await;

    let response = server.get("/app/searchGame?term=a&term=b").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/json");

    let calls = igdb.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query[0], ("search".to_string(), "a".to_string()));
}

#[tokio::test]
async fn test_search_with_non_utf8_term_is_rejected() {
    let igdb = ScriptedIgdb::replying("[]");
    let (server, state) = setup(igdb.clone()).await;

    let response = server.get("/app/searchGame?term=%FF").await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>(), json!({ "error": 400 }));
    assert!(igdb.calls().is_empty());

    let cache = SearchCacheSeaOrmRepository::new(state.database.connection());
    assert!(
        cache
            .get_rows(CachedSearchFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_search_with_empty_term_is_forwarded() {
    let igdb = ScriptedIgdb::replying("[]");
    let (server, _) = setup(igdb.clone()).await;

    server
        .get("/app/searchGame?term=")
        .await
        .assert_status_ok();
    assert_eq!(igdb.calls()[0].query[0], ("search".to_string(), String::new()));
}

#[tokio::test]
async fn test_search_with_undecodable_body_fails() {
    let (server, _) = setup(ScriptedIgdb::replying("{\"not\":\"a list\"}")).await;

    let response = server
        .get("/app/searchGame")
        .add_query_param("term", "broken")
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>(), json!({ "error": 502 }));
}

#[tokio::test]
async fn test_index_and_assets_are_served() {
    let (server, _) = setup(ScriptedIgdb::replying("[]")).await;

    let index = server.get("/").await;
    index.assert_status_ok();
    assert!(index.text().contains("<html"));

    let script = server.get("/app.js").await;
    script.assert_status_ok();
    assert_eq!(
        script.header("content-type"),
        "application/javascript; charset=utf-8"
    );
}

#[tokio::test]
async fn test_health_reports_database() {
    let (server, _) = setup(ScriptedIgdb::replying("[]")).await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "SQLite");
}

#[tokio::test]
async fn test_cors_headers_present() {
    let (server, _) = setup(ScriptedIgdb::replying("[]")).await;

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://example.com"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

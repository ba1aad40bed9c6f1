//! Web layer
//!
//! Builds the axum router, owns the shared [`AppState`] and runs the HTTP
//! server with graceful shutdown.

use anyhow::Result;
use axum::{Router, middleware::from_fn, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::{
    config::Config,
    database::{
        Database,
        repositories::{GameSeaOrmRepository, SearchCacheSeaOrmRepository},
    },
    igdb::IgdbApi,
    services::GameSearchService,
};

pub mod handlers;
pub mod middleware;
pub mod responses;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub database: Database,
    pub igdb: Arc<dyn IgdbApi>,
    pub search_service: GameSearchService,
}

impl AppState {
    pub fn new(config: Config, database: Database, igdb: Arc<dyn IgdbApi>) -> Self {
        let search_cache = Arc::new(SearchCacheSeaOrmRepository::new(database.connection()));
        let games = Arc::new(GameSeaOrmRepository::new(database.connection()));
        let search_service = GameSearchService::new(igdb.clone(), search_cache, games);

        Self {
            config,
            database,
            igdb,
            search_service,
        }
    }
}

/// Every route the proxy serves, with middleware applied
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(handlers::health::health_check))
        .route("/igdb/{endpoint}", get(handlers::igdb::passthrough))
        .route("/igdb/{endpoint}/{option}", get(handlers::igdb::passthrough))
        .route(
            "/igdb/{endpoint}/{option}/{identifier}",
            get(handlers::igdb::passthrough),
        )
        .route("/app/searchGame", get(handlers::search::search_game))
        .fallback(handlers::static_assets::serve_embedded_asset)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", state.config.web.host, state.config.web.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!(
                    "Invalid listen address {}:{}: {}",
                    state.config.web.host,
                    state.config.web.port,
                    e
                )
            })?;

        Ok(Self {
            app: create_router(state),
            addr,
        })
    }

    /// Bind, report the bind outcome through `ready_signal`, then serve until
    /// SIGINT or SIGTERM
    pub async fn serve_with_signal(
        self,
        ready_signal: tokio::sync::oneshot::Sender<Result<()>>,
    ) -> Result<()> {
        let listener = match tokio::net::TcpListener::bind(&self.addr).await {
            Ok(listener) => listener,
            Err(e) => {
                let message = format!("Failed to bind to {}: {}", self.addr, e);
                error!("{}", message);
                let _ = ready_signal.send(Err(anyhow::anyhow!("{}", message)));
                return Err(e.into());
            }
        };

        info!("Web server listening on http://{}", self.addr);
        let _ = ready_signal.send(Ok(()));

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web server stopped");
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
                    _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}

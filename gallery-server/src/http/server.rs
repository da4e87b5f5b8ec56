//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing and timeout middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the pool is closed

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, StatusCode};
use axum::Router;
use gallery_core::GalleryConfig;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{DbError, PaintingDao};
use crate::service::PaintingService;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:7070)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7070)),
            cors_permissive: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&GalleryConfig> for ServerConfig {
    fn from(config: &GalleryConfig) -> Self {
        Self {
            bind_addr: config.bind_addr,
            cors_permissive: config.cors_permissive,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: PaintingService,
}

impl AppState {
    pub fn new(service: PaintingService) -> Self {
        Self { service }
    }
}

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        let port = config.bind_addr.port();
        let origins: Vec<HeaderValue> = ["localhost", "127.0.0.1"]
            .iter()
            .filter_map(|host| format!("http://{}:{}", host, port).parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::health::router())
        .merge(routes::paintings::router())
        .layer(cors)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// The pool is owned by the server from here on: the table is created if
/// missing, and the pool is closed after the listener stops.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&db_path).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: SqlitePool, config: ServerConfig) -> Result<(), ServerError> {
    let dao = PaintingDao::new(pool.clone());
    dao.ensure_table().await?;

    let state = AppState::new(PaintingService::new(dao));
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    served.map_err(ServerError::from)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("schema setup failed: {0}")]
    Database(#[from] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::service::MockStore;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 7070);
        assert!(!config.cors_permissive);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_from_gallery_config() {
        let gallery = GalleryConfig {
            cors_permissive: true,
            request_timeout_secs: 5,
            ..GalleryConfig::default()
        };

        let config = ServerConfig::from(&gallery);
        assert!(config.cors_permissive);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn health_endpoint() {
        let state = AppState::new(PaintingService::new(MockStore::new()));
        let app = build_router(state, &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_request_times_out_with_408() {
        use async_trait::async_trait;
        use gallery_core::Painting;

        use crate::service::PaintingStore;

        struct SlowStore;

        #[async_trait]
        impl PaintingStore for SlowStore {
            async fn insert(&self, _: &Painting) -> Result<(), DbError> {
                Ok(())
            }
            async fn get_all(&self) -> Result<Vec<Painting>, DbError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
            async fn get_all_by_year(&self, _: i32) -> Result<Vec<Painting>, DbError> {
                Ok(Vec::new())
            }
            async fn get_oldest_year(&self) -> Result<Option<i32>, DbError> {
                Ok(None)
            }
        }

        let config = ServerConfig {
            request_timeout: Duration::from_millis(50),
            ..ServerConfig::default()
        };
        let app = build_router(AppState::new(PaintingService::new(SlowStore)), &config);

        let response = app
            .oneshot(Request::builder().uri("/painting").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let state = AppState::new(PaintingService::new(MockStore::new()));
        let app = build_router(state, &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/painting/year").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

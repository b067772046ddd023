//! HTTP surface of the patient directory
//!
//! A small axum router over a shared `DatasetStore`. The store is loaded
//! before the listener binds, so a missing or broken dataset fails startup
//! instead of the first request.

pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use crate::query::ParameterLimits;
use crate::snapshot::DatasetStore;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub limits: ParameterLimits,
}

impl AppState {
    #[must_use]
    pub const fn new(store: Arc<DatasetStore>, limits: ParameterLimits) -> Self {
        Self { store, limits }
    }
}

/// Build the router
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/api/patients", get(handlers::list_patients))
        .route("/api/patients/medical-issues", get(handlers::medical_issues))
        .route("/health", get(handlers::health))
        .with_state(state);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Load the dataset, bind the configured address and serve until Ctrl-C
pub async fn serve(config: &DirectoryConfig) -> Result<()> {
    let store = DatasetStore::open(config.data_path.clone(), config.refresh).await?;
    let state = AppState::new(Arc::new(store), config.parameter_limits());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(DirectoryError::Server)?;
    let local_addr = listener.local_addr().map_err(DirectoryError::Server)?;
    log::info!(
        "Patient directory listening on http://{local_addr} (refresh: {})",
        config.refresh
    );

    serve_listener(listener, router(state, config.enable_cors)).await
}

/// Serve an already-bound listener until Ctrl-C
pub async fn serve_listener(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(DirectoryError::Server)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received, stopping server");
}

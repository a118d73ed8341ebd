//! HTTP surface
//!
//! The same routes are served under `/v0.1` and `/latest`:
//! - `GET /version`
//! - `GET /quantity-kinds`
//! - `GET /quantity-kind?iri=...`
//! - `GET /unit?iri=...`
//! - `GET /unit/quantity-kind?iri=...`

pub mod error;
pub mod handlers;

use axum::http::header::CONTENT_DISPOSITION;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Settings;
use crate::errors::Result;
use crate::service::ConceptService;

pub use error::ApiError;

pub const API_VERSION: &str = "v0.1";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConceptService>,
}

impl AppState {
    pub fn new(service: ConceptService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/version", get(handlers::version))
        .route("/quantity-kinds", get(handlers::quantity_kinds))
        .route("/quantity-kind", get(handlers::quantity_kind_data))
        .route("/unit", get(handlers::unit_data))
        .route("/unit/quantity-kind", get(handlers::unit_quantity_kind))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([CONTENT_DISPOSITION]);

    Router::new()
        .nest(&format!("/{}", API_VERSION), api_routes())
        .nest("/latest", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is interrupted
pub async fn serve(settings: &Settings, state: AppState) -> Result<()> {
    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Units API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

pub mod authz;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::authz::PermissionEngine;
use crate::config::PlacementConfig;
use crate::services::Database;
use service_core::error::AppError;

/// Shared application state.
///
/// The engine wraps its own handle to the database; both are cheap
/// pool-backed clones.
#[derive(Clone)]
pub struct AppState {
    pub config: PlacementConfig,
    pub db: Database,
    pub engine: PermissionEngine<Database>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: String,
    version: String,
}

/// Service health: verifies database connectivity.
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.db.health_check().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        service: state.config.service_name.clone(),
        version: state.config.service_version.clone(),
    }))
}

/// Build the application router.
///
/// Only the operational surface lives here; the CRUD controllers that
/// consume the permission engine are wired up elsewhere.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! # REST API for System Endpoints
//!
//! Health probe and configuration introspection. The config endpoint only
//! ever reports non-secret operational parameters.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::backend::ledger::LedgerConnection;
use crate::backend::AppState;
use shared::{ConfigResponse, HealthResponse};

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Report the operational parameters this instance runs with.
/// The credential value itself is never included, only whether one is set.
pub async fn get_config<C: LedgerConnection>(
    State(state): State<AppState<C>>,
) -> impl IntoResponse {
    info!("GET /api/config");

    Json(ConfigResponse {
        status: "ok".to_string(),
        server_url: state.config.ledger.server_url.clone(),
        budget_id: state.config.ledger.budget_id.clone(),
        password_configured: state.config.ledger.password_configured(),
    })
}

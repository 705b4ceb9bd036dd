//! # REST API for Imports
//!
//! Endpoint for submitting a batch of aggregator transactions to the ledger.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::backend::io::rest;
use crate::backend::ledger::LedgerConnection;
use crate::backend::AppState;
use shared::{ImportRequest, ImportResponse};

/// Convert and commit one batch of source transactions
pub async fn import_transactions<C: LedgerConnection>(
    State(state): State<AppState<C>>,
    Json(request): Json<ImportRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/import - account: {}, transactions: {}",
        request.account_id,
        request.transactions.len()
    );

    match state
        .importer
        .import_batch(&request.account_id, &request.transactions)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ImportResponse {
                status: "ok".to_string(),
                imported: result.imported_count,
                result: result.details,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to import transactions: {}", e);
            rest::error_response(&e)
        }
    }
}

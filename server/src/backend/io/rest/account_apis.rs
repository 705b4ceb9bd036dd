//! # REST API for Accounts
//!
//! Read-only endpoint exposing the ledger's account list.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::backend::io::rest;
use crate::backend::ledger::LedgerConnection;
use crate::backend::AppState;
use shared::AccountsResponse;

/// List the accounts known to the target ledger
pub async fn list_accounts<C: LedgerConnection>(
    State(state): State<AppState<C>>,
) -> impl IntoResponse {
    info!("GET /api/accounts");

    match state.importer.list_accounts().await {
        Ok(accounts) => (
            StatusCode::OK,
            Json(AccountsResponse {
                status: "ok".to_string(),
                accounts,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list accounts: {}", e);
            rest::error_response(&e)
        }
    }
}

//! # Backend Module
//!
//! Contains all the logic for bridging an open-banking aggregator feed into
//! a remote personal-finance ledger.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (converter, session-scoped importer)
//!     ↓
//! Ledger Layer (session client for the remote ledger service)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Load process-wide configuration once and wire up the importer
//! - Set up the REST API router
//! - Normalize aggregator transactions into the ledger's record shape
//! - Guarantee every ledger session is closed, on every exit path

pub mod config;
pub mod domain;
pub mod io;
pub mod ledger;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::backend::config::Config;
use crate::backend::domain::ImporterService;
use crate::backend::io::rest;
use crate::backend::ledger::http::HttpLedgerConnection;
use crate::backend::ledger::LedgerConnection;

/// Main application state shared across request handlers
#[derive(Clone)]
pub struct AppState<C: LedgerConnection> {
    pub importer: Arc<ImporterService<C>>,
    pub config: Arc<Config>,
}

/// Initialize the backend with the production ledger client
pub fn initialize_backend(config: Config) -> anyhow::Result<AppState<HttpLedgerConnection>> {
    let connection = HttpLedgerConnection::new(&config.ledger.server_url)?;
    let importer = ImporterService::new(connection, config.ledger.clone(), config.importer.clone());

    Ok(AppState {
        importer: Arc::new(importer),
        config: Arc::new(config),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router<C: LedgerConnection>(state: AppState<C>) -> Router {
    let api_routes = Router::new()
        .route("/import", post(rest::import_apis::import_transactions::<C>))
        .route("/accounts", get(rest::account_apis::list_accounts::<C>))
        .route("/config", get(rest::system_apis::get_config::<C>))
        .route("/health", get(rest::system_apis::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

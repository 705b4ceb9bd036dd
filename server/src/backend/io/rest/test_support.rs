//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::backend::config::{Config, ImporterConfig, LedgerConfig};
use crate::backend::domain::ImporterService;
use crate::backend::ledger::test_support::MockLedgerConnection;
use crate::backend::AppState;

pub fn test_state(connection: MockLedgerConnection) -> AppState<MockLedgerConnection> {
    test_state_with_password(connection, None)
}

pub fn test_state_with_password(
    connection: MockLedgerConnection,
    password: Option<&str>,
) -> AppState<MockLedgerConnection> {
    let config = Config {
        bind_address: "127.0.0.1:0".to_string(),
        ledger: LedgerConfig {
            server_url: "http://localhost:5006".to_string(),
            budget_id: "budget-1".to_string(),
            password: password.map(str::to_string),
        },
        importer: ImporterConfig::default(),
    };

    let importer = ImporterService::new(connection, config.ledger.clone(), config.importer.clone());

    AppState {
        importer: Arc::new(importer),
        config: Arc::new(config),
    }
}

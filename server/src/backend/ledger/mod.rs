//! # Ledger Client Traits
//!
//! This module defines the capability traits through which the domain layer
//! talks to the remote ledger service. The traits abstract away the wire
//! protocol, allowing the importer to run against the production HTTP client
//! or a test double without modification.
//!
//! The ledger's own storage and sync internals are opaque behind this
//! session API: open a session, synchronize the working copy, read or write,
//! close the session.

pub mod http;

#[cfg(test)]
pub mod test_support;

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::config::LedgerConfig;
use shared::{Account, ImportOutcome, NormalizedTransaction};

/// Errors reported by a ledger client implementation
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger server could not be reached
    #[error("ledger server unreachable: {0}")]
    Transport(String),
    /// The ledger server answered, but refused or garbled the request
    #[error("ledger server rejected request: {0}")]
    Rejected(String),
}

/// One client instance drives exactly one session against the remote ledger.
///
/// Callers are expected to invoke the methods in session order: open,
/// synchronize, then reads/writes, then close. The domain layer enforces
/// that ordering; implementations only provide the transport.
#[async_trait]
pub trait LedgerClient: Send {
    /// Open a session against the ledger server
    async fn open_session(&mut self, config: &LedgerConfig) -> Result<(), LedgerError>;

    /// Synchronize the session's local working copy of the given budget
    async fn synchronize(&mut self, budget_id: &str) -> Result<(), LedgerError>;

    /// Read the ledger's account list
    async fn list_accounts(&mut self) -> Result<Vec<Account>, LedgerError>;

    /// Submit one normalized batch to the ledger's write API.
    /// The ledger is the sole authority on duplicate suppression; duplicate
    /// `imported_id`s are forwarded untouched.
    async fn submit_transactions(
        &mut self,
        account_id: &str,
        transactions: &[NormalizedTransaction],
    ) -> Result<ImportOutcome, LedgerError>;

    /// Release the session and its working copy
    async fn close_session(&mut self) -> Result<(), LedgerError>;
}

/// Factory for per-request ledger clients.
///
/// Sessions are never shared or pooled across requests; every unit of work
/// gets its own client instance from this factory.
pub trait LedgerConnection: Send + Sync + Clone + 'static {
    /// The type of LedgerClient this connection creates
    type Client: LedgerClient + 'static;

    /// Create a fresh client for one session
    fn create_client(&self) -> Self::Client;
}

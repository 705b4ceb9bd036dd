//! # Session-Scoped Importer
//!
//! Orchestrates every interaction with the remote ledger inside a scoped
//! session: open, synchronize, operate, close. The close step runs on every
//! exit path — normal return, validation error, upstream error, timeout,
//! caller cancellation — and never masks the failure that preceded it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time;
use tracing::{debug, warn};

use crate::backend::config::{ImporterConfig, LedgerConfig};
use crate::backend::domain::converter;
use crate::backend::domain::errors::ImportError;
use crate::backend::domain::session::Session;
use crate::backend::ledger::LedgerConnection;
use shared::{Account, ImportOutcome, NormalizedTransaction, SourceTransaction};

/// What one import request achieved at the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    /// Transactions the ledger acknowledged as newly added
    pub imported_count: usize,
    /// Per-transaction detail reported back by the ledger
    pub details: ImportOutcome,
}

enum SessionOp {
    ListAccounts,
    SubmitBatch {
        account_id: String,
        transactions: Vec<NormalizedTransaction>,
    },
}

enum SessionOutcome {
    Accounts(Vec<Account>),
    Submitted(ImportOutcome),
}

pub struct ImporterService<C: LedgerConnection> {
    connection: C,
    ledger: LedgerConfig,
    session_timeout: Duration,
    /// Serializes session lifetimes; the ledger's working copy is not
    /// assumed safe for concurrent mutation (default: one at a time).
    session_gate: Arc<Semaphore>,
}

impl<C: LedgerConnection> ImporterService<C> {
    pub fn new(connection: C, ledger: LedgerConfig, options: ImporterConfig) -> Self {
        Self {
            connection,
            ledger,
            session_timeout: options.session_timeout,
            session_gate: Arc::new(Semaphore::new(options.max_concurrent_sessions.max(1))),
        }
    }

    /// Read the ledger's account list through one scoped session
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ImportError> {
        match self.run_session(SessionOp::ListAccounts).await? {
            SessionOutcome::Accounts(accounts) => Ok(accounts),
            SessionOutcome::Submitted(_) => {
                Err(ImportError::Session("mismatched session outcome".to_string()))
            }
        }
    }

    /// Convert a batch and submit it to the ledger through one scoped
    /// session, preserving input order.
    pub async fn import_batch(
        &self,
        account_id: &str,
        transactions: &[SourceTransaction],
    ) -> Result<ImportResult, ImportError> {
        if account_id.trim().is_empty() {
            return Err(ImportError::Validation(
                "account_id must be present and non-empty".to_string(),
            ));
        }

        // Reject-whole-batch: one malformed record fails the request before
        // any session is opened.
        for (index, tx) in transactions.iter().enumerate() {
            converter::validate(tx)
                .map_err(|reason| ImportError::Validation(format!("transaction {index}: {reason}")))?;
        }

        // An empty batch never needs the ledger; short-circuit before a
        // session is opened.
        if transactions.is_empty() {
            return Ok(ImportResult {
                imported_count: 0,
                details: ImportOutcome::default(),
            });
        }

        let normalized: Vec<NormalizedTransaction> = transactions
            .iter()
            .map(|tx| converter::normalize(tx, account_id))
            .collect();

        debug!(
            "Importing {} transactions into account {}",
            normalized.len(),
            account_id
        );

        let op = SessionOp::SubmitBatch {
            account_id: account_id.to_string(),
            transactions: normalized,
        };
        match self.run_session(op).await? {
            SessionOutcome::Submitted(details) => Ok(ImportResult {
                imported_count: details.added.len(),
                details,
            }),
            SessionOutcome::Accounts(_) => {
                Err(ImportError::Session("mismatched session outcome".to_string()))
            }
        }
    }

    /// Run one operation inside a scoped session.
    ///
    /// The body executes on its own task so that caller cancellation cannot
    /// skip the close step. The open-through-operate span is bounded by the
    /// session timeout; close always runs afterwards, and a close failure
    /// never masks an earlier error.
    async fn run_session(&self, op: SessionOp) -> Result<SessionOutcome, ImportError> {
        let gate = Arc::clone(&self.session_gate);
        let connection = self.connection.clone();
        let ledger = self.ledger.clone();
        let timeout = self.session_timeout;

        let handle = tokio::spawn(async move {
            let _permit = gate
                .acquire_owned()
                .await
                .map_err(|_| ImportError::Session("session gate closed".to_string()))?;

            let mut session = Session::new(connection.create_client());

            let work = time::timeout(timeout, async {
                session.open(&ledger).await?;
                session.synchronize(&ledger.budget_id).await?;
                match op {
                    SessionOp::ListAccounts => {
                        session.list_accounts().await.map(SessionOutcome::Accounts)
                    }
                    SessionOp::SubmitBatch {
                        account_id,
                        transactions,
                    } => session
                        .submit_transactions(&account_id, &transactions)
                        .await
                        .map(SessionOutcome::Submitted),
                }
            })
            .await;

            // Close exactly once per opened session, bounded so a hanging
            // ledger cannot wedge the task.
            let close_result = match time::timeout(timeout, session.close()).await {
                Ok(result) => result,
                Err(_) => Err(ImportError::Session(format!(
                    "session close timed out after {}s",
                    timeout.as_secs()
                ))),
            };

            match work {
                Err(_elapsed) => {
                    if let Err(close_err) = close_result {
                        warn!("Session close failed after timeout: {}", close_err);
                    }
                    Err(ImportError::Timeout(timeout.as_secs()))
                }
                Ok(Err(err)) => {
                    if let Err(close_err) = close_result {
                        warn!("Session close failed after earlier error: {}", close_err);
                    }
                    Err(err)
                }
                Ok(Ok(outcome)) => {
                    close_result?;
                    Ok(outcome)
                }
            }
        });

        handle
            .await
            .map_err(|e| ImportError::Session(format!("session task failed: {e}")))?
    }
}

//! Test doubles for the ledger client traits.
//!
//! The mock records every client call in order and tracks how many sessions
//! are live at once, so tests can verify sequencing rather than timing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::backend::config::LedgerConfig;
use crate::backend::ledger::{LedgerClient, LedgerConnection, LedgerError};
use shared::{Account, ImportOutcome, NormalizedTransaction};

/// Knobs for scripted failures and delays
#[derive(Debug, Clone, Default)]
pub struct MockBehavior {
    pub fail_open: bool,
    pub fail_synchronize: bool,
    pub fail_submit: bool,
    pub fail_close: bool,
    pub accounts: Vec<Account>,
    /// Delay injected into `synchronize`, for timeout and overlap tests
    pub synchronize_delay: Duration,
}

struct MockInner {
    behavior: MockBehavior,
    events: Mutex<Vec<String>>,
    submitted: Mutex<Vec<(String, Vec<NormalizedTransaction>)>>,
    live_sessions: AtomicUsize,
    max_live_sessions: AtomicUsize,
}

#[derive(Clone)]
pub struct MockLedgerConnection {
    inner: Arc<MockInner>,
}

impl MockLedgerConnection {
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::default())
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            inner: Arc::new(MockInner {
                behavior,
                events: Mutex::new(Vec::new()),
                submitted: Mutex::new(Vec::new()),
                live_sessions: AtomicUsize::new(0),
                max_live_sessions: AtomicUsize::new(0),
            }),
        }
    }

    /// Every client call, in the order it happened
    pub fn events(&self) -> Vec<String> {
        self.inner.events.lock().unwrap().clone()
    }

    pub fn count_of(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    /// Batches passed to `submit_transactions`, with their target account
    pub fn submitted(&self) -> Vec<(String, Vec<NormalizedTransaction>)> {
        self.inner.submitted.lock().unwrap().clone()
    }

    /// The most sessions ever open at the same time
    pub fn max_live_sessions(&self) -> usize {
        self.inner.max_live_sessions.load(Ordering::SeqCst)
    }
}

impl LedgerConnection for MockLedgerConnection {
    type Client = MockLedgerClient;

    fn create_client(&self) -> MockLedgerClient {
        MockLedgerClient {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub struct MockLedgerClient {
    inner: Arc<MockInner>,
}

impl MockLedgerClient {
    fn record(&self, event: &str) {
        self.inner.events.lock().unwrap().push(event.to_string());
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn open_session(&mut self, _config: &LedgerConfig) -> Result<(), LedgerError> {
        self.record("open");
        if self.inner.behavior.fail_open {
            return Err(LedgerError::Rejected("open refused".to_string()));
        }
        let live = self.inner.live_sessions.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.max_live_sessions.fetch_max(live, Ordering::SeqCst);
        Ok(())
    }

    async fn synchronize(&mut self, _budget_id: &str) -> Result<(), LedgerError> {
        let delay = self.inner.behavior.synchronize_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.record("synchronize");
        if self.inner.behavior.fail_synchronize {
            return Err(LedgerError::Transport("sync refused".to_string()));
        }
        Ok(())
    }

    async fn list_accounts(&mut self) -> Result<Vec<Account>, LedgerError> {
        self.record("list_accounts");
        Ok(self.inner.behavior.accounts.clone())
    }

    async fn submit_transactions(
        &mut self,
        account_id: &str,
        transactions: &[NormalizedTransaction],
    ) -> Result<ImportOutcome, LedgerError> {
        self.record("submit");
        if self.inner.behavior.fail_submit {
            return Err(LedgerError::Transport("write refused".to_string()));
        }
        self.inner
            .submitted
            .lock()
            .unwrap()
            .push((account_id.to_string(), transactions.to_vec()));
        Ok(ImportOutcome {
            added: transactions
                .iter()
                .map(|tx| tx.imported_id.clone())
                .collect(),
            updated: Vec::new(),
        })
    }

    async fn close_session(&mut self) -> Result<(), LedgerError> {
        self.record("close");
        self.inner.live_sessions.fetch_sub(1, Ordering::SeqCst);
        if self.inner.behavior.fail_close {
            return Err(LedgerError::Rejected("close refused".to_string()));
        }
        Ok(())
    }
}

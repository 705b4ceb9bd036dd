//! # Session State Machine
//!
//! One `Session` wraps one ledger client for one unit of work. The state
//! machine enforces the session protocol:
//!
//! ```text
//! Closed -> Opening -> Open -> Synchronizing -> Synchronized -> Working
//!                                                    |
//!                                          Closing -> Closed
//! ```
//!
//! Re-entrant opens are forbidden, operations are rejected outside the state
//! that allows them, and `close` touches the remote ledger only for a
//! session that actually opened.

use crate::backend::config::LedgerConfig;
use crate::backend::domain::errors::ImportError;
use crate::backend::ledger::LedgerClient;
use shared::{Account, ImportOutcome, NormalizedTransaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Opening,
    Open,
    Synchronizing,
    Synchronized,
    Working,
    Closing,
}

pub struct Session<L: LedgerClient> {
    client: L,
    state: SessionState,
    was_opened: bool,
}

impl<L: LedgerClient> Session<L> {
    pub fn new(client: L) -> Self {
        Self {
            client,
            state: SessionState::Closed,
            was_opened: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Open the session. Errors are lifecycle failures; a session instance
    /// can be opened at most once.
    pub async fn open(&mut self, config: &LedgerConfig) -> Result<(), ImportError> {
        if self.state != SessionState::Closed || self.was_opened {
            return Err(ImportError::Session(
                "re-entrant session open".to_string(),
            ));
        }
        self.state = SessionState::Opening;
        self.client
            .open_session(config)
            .await
            .map_err(|e| ImportError::Session(e.to_string()))?;
        self.was_opened = true;
        self.state = SessionState::Open;
        Ok(())
    }

    /// Synchronize the working copy of the given budget
    pub async fn synchronize(&mut self, budget_id: &str) -> Result<(), ImportError> {
        self.expect(SessionState::Open, "synchronize")?;
        self.state = SessionState::Synchronizing;
        self.client
            .synchronize(budget_id)
            .await
            .map_err(|e| ImportError::UpstreamUnavailable(e.to_string()))?;
        self.state = SessionState::Synchronized;
        Ok(())
    }

    pub async fn list_accounts(&mut self) -> Result<Vec<Account>, ImportError> {
        self.begin_work("list accounts")?;
        self.client
            .list_accounts()
            .await
            .map_err(|e| ImportError::UpstreamUnavailable(e.to_string()))
    }

    pub async fn submit_transactions(
        &mut self,
        account_id: &str,
        transactions: &[NormalizedTransaction],
    ) -> Result<ImportOutcome, ImportError> {
        self.begin_work("submit transactions")?;
        self.client
            .submit_transactions(account_id, transactions)
            .await
            .map_err(|e| ImportError::UpstreamUnavailable(e.to_string()))
    }

    /// Release the session. Invoked exactly once per opened session; a
    /// session that never opened is a local no-op.
    pub async fn close(&mut self) -> Result<(), ImportError> {
        if !self.was_opened {
            self.state = SessionState::Closed;
            return Ok(());
        }
        if self.state == SessionState::Closed {
            return Err(ImportError::Session("session closed twice".to_string()));
        }
        self.state = SessionState::Closing;
        let result = self
            .client
            .close_session()
            .await
            .map_err(|e| ImportError::Session(e.to_string()));
        self.state = SessionState::Closed;
        result
    }

    fn expect(&self, expected: SessionState, operation: &str) -> Result<(), ImportError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ImportError::Session(format!(
                "{operation} requires a {expected:?} session, found {:?}",
                self.state
            )))
        }
    }

    fn begin_work(&mut self, operation: &str) -> Result<(), ImportError> {
        self.expect(SessionState::Synchronized, operation)?;
        self.state = SessionState::Working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ledger::test_support::{MockBehavior, MockLedgerConnection};
    use crate::backend::ledger::LedgerConnection;

    fn ledger_config() -> LedgerConfig {
        LedgerConfig {
            server_url: "http://localhost:5006".to_string(),
            budget_id: "budget-1".to_string(),
            password: None,
        }
    }

    #[tokio::test]
    async fn walks_the_full_protocol_in_order() {
        let connection = MockLedgerConnection::new();
        let mut session = Session::new(connection.create_client());
        assert_eq!(session.state(), SessionState::Closed);

        session.open(&ledger_config()).await.unwrap();
        assert_eq!(session.state(), SessionState::Open);

        session.synchronize("budget-1").await.unwrap();
        assert_eq!(session.state(), SessionState::Synchronized);

        session.list_accounts().await.unwrap();
        assert_eq!(session.state(), SessionState::Working);

        session.close().await.unwrap();
        assert_eq!(session.state(), SessionState::Closed);

        assert_eq!(
            connection.events(),
            vec!["open", "synchronize", "list_accounts", "close"]
        );
    }

    #[tokio::test]
    async fn rejects_re_entrant_open() {
        let connection = MockLedgerConnection::new();
        let mut session = Session::new(connection.create_client());
        session.open(&ledger_config()).await.unwrap();

        let err = session.open(&ledger_config()).await.unwrap_err();
        assert!(matches!(err, ImportError::Session(_)));
        // The remote ledger saw only one open.
        assert_eq!(connection.count_of("open"), 1);
    }

    #[tokio::test]
    async fn rejects_work_before_synchronize() {
        let connection = MockLedgerConnection::new();
        let mut session = Session::new(connection.create_client());
        session.open(&ledger_config()).await.unwrap();

        let err = session.list_accounts().await.unwrap_err();
        assert!(matches!(err, ImportError::Session(_)));
        assert_eq!(connection.count_of("list_accounts"), 0);
    }

    #[tokio::test]
    async fn close_is_a_no_op_when_open_never_succeeded() {
        let connection = MockLedgerConnection::with_behavior(MockBehavior {
            fail_open: true,
            ..MockBehavior::default()
        });
        let mut session = Session::new(connection.create_client());

        assert!(session.open(&ledger_config()).await.is_err());
        session.close().await.unwrap();

        assert_eq!(connection.count_of("close"), 0);
    }

    #[tokio::test]
    async fn close_twice_is_a_lifecycle_error() {
        let connection = MockLedgerConnection::new();
        let mut session = Session::new(connection.create_client());
        session.open(&ledger_config()).await.unwrap();

        session.close().await.unwrap();
        assert!(session.close().await.is_err());
        assert_eq!(connection.count_of("close"), 1);
    }
}

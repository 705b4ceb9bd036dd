//! HTTP implementation of the ledger client traits, speaking JSON to the
//! ledger server's session API with `reqwest`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::config::LedgerConfig;
use crate::backend::ledger::{LedgerClient, LedgerConnection, LedgerError};
use shared::{Account, ImportOutcome, NormalizedTransaction};

/// Shared connection parameters for the ledger server.
///
/// Cloning is cheap; the underlying `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct HttpLedgerConnection {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLedgerConnection {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl LedgerConnection for HttpLedgerConnection {
    type Client = HttpLedgerClient;

    fn create_client(&self) -> HttpLedgerClient {
        HttpLedgerClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session_token: None,
        }
    }
}

/// One HTTP-backed ledger session
pub struct HttpLedgerClient {
    http: reqwest::Client,
    base_url: String,
    session_token: Option<String>,
}

#[derive(Serialize)]
struct OpenSessionRequest<'a> {
    password: Option<&'a str>,
}

#[derive(Deserialize)]
struct OpenSessionResponse {
    token: String,
}

#[derive(Serialize)]
struct SynchronizeRequest<'a> {
    budget_id: &'a str,
}

#[derive(Deserialize)]
struct AccountsPayload {
    accounts: Vec<Account>,
}

#[derive(Serialize)]
struct SubmitTransactionsRequest<'a> {
    transactions: &'a [NormalizedTransaction],
}

impl HttpLedgerClient {
    fn token(&self) -> Result<&str, LedgerError> {
        self.session_token
            .as_deref()
            .ok_or_else(|| LedgerError::Rejected("no open session".to_string()))
    }
}

/// Fail on non-success statuses, carrying the server's own message back
async fn checked(response: reqwest::Response) -> Result<reqwest::Response, LedgerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(LedgerError::Rejected(format!("{status} {body}")))
}

fn transport(error: reqwest::Error) -> LedgerError {
    LedgerError::Transport(error.to_string())
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn open_session(&mut self, config: &LedgerConfig) -> Result<(), LedgerError> {
        let url = format!("{}/sessions", self.base_url);
        let body = OpenSessionRequest {
            password: config.password.as_deref(),
        };
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let opened: OpenSessionResponse = checked(response)
            .await?
            .json()
            .await
            .map_err(|e| LedgerError::Rejected(format!("unexpected session payload: {e}")))?;

        debug!("Opened ledger session");
        self.session_token = Some(opened.token);
        Ok(())
    }

    async fn synchronize(&mut self, budget_id: &str) -> Result<(), LedgerError> {
        let url = format!("{}/sessions/{}/sync", self.base_url, self.token()?);
        let response = self
            .http
            .post(&url)
            .json(&SynchronizeRequest { budget_id })
            .send()
            .await
            .map_err(transport)?;
        checked(response).await?;

        debug!("Synchronized budget {}", budget_id);
        Ok(())
    }

    async fn list_accounts(&mut self) -> Result<Vec<Account>, LedgerError> {
        let url = format!("{}/sessions/{}/accounts", self.base_url, self.token()?);
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let payload: AccountsPayload = checked(response)
            .await?
            .json()
            .await
            .map_err(|e| LedgerError::Rejected(format!("unexpected accounts payload: {e}")))?;

        Ok(payload.accounts)
    }

    async fn submit_transactions(
        &mut self,
        account_id: &str,
        transactions: &[NormalizedTransaction],
    ) -> Result<ImportOutcome, LedgerError> {
        let url = format!(
            "{}/sessions/{}/accounts/{}/transactions",
            self.base_url,
            self.token()?,
            account_id
        );
        let response = self
            .http
            .post(&url)
            .json(&SubmitTransactionsRequest { transactions })
            .send()
            .await
            .map_err(transport)?;
        let outcome: ImportOutcome = checked(response)
            .await?
            .json()
            .await
            .map_err(|e| LedgerError::Rejected(format!("unexpected import payload: {e}")))?;

        debug!(
            "Submitted {} transactions to account {}",
            transactions.len(),
            account_id
        );
        Ok(outcome)
    }

    async fn close_session(&mut self) -> Result<(), LedgerError> {
        let url = format!("{}/sessions/{}", self.base_url, self.token()?);
        let response = self.http.delete(&url).send().await.map_err(transport)?;
        checked(response).await?;

        debug!("Closed ledger session");
        self.session_token = None;
        Ok(())
    }
}

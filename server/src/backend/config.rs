//! # Configuration
//!
//! Process-wide configuration, loaded once at startup from the environment
//! and passed into constructors. Nothing in the domain layer reads the
//! environment at call time.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Connection parameters for the remote ledger service
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Base URL of the ledger server
    pub server_url: String,
    /// Identifier of the budget file to synchronize
    pub budget_id: String,
    /// Optional encryption passphrase for the ledger's local working copy
    pub password: Option<String>,
}

impl LedgerConfig {
    pub fn password_configured(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Session behavior knobs for the importer
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Bound on one session's open-through-close span
    pub session_timeout: Duration,
    /// How many ledger sessions may be live at once. The ledger's working
    /// copy is not assumed safe for concurrent mutation, so this defaults
    /// to 1.
    pub max_concurrent_sessions: usize,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            session_timeout: Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECONDS),
            max_concurrent_sessions: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub ledger: LedgerConfig,
    pub importer: ImporterConfig,
}

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_LEDGER_SERVER_URL: &str = "http://localhost:5006";
const DEFAULT_SESSION_TIMEOUT_SECONDS: u64 = 30;

impl Config {
    /// Read configuration from the environment.
    ///
    /// `LEDGER_BUDGET_ID` is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let ledger = LedgerConfig {
            server_url: env::var("LEDGER_SERVER_URL")
                .unwrap_or_else(|_| DEFAULT_LEDGER_SERVER_URL.to_string()),
            budget_id: env::var("LEDGER_BUDGET_ID").context("LEDGER_BUDGET_ID must be set")?,
            password: env::var("LEDGER_PASSWORD").ok().filter(|p| !p.is_empty()),
        };

        let session_timeout = match env::var("SESSION_TIMEOUT_SECONDS") {
            Ok(raw) => Duration::from_secs(parse_positive_u64("SESSION_TIMEOUT_SECONDS", &raw)?),
            Err(_) => Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECONDS),
        };
        let max_concurrent_sessions = match env::var("MAX_CONCURRENT_SESSIONS") {
            Ok(raw) => parse_positive_u64("MAX_CONCURRENT_SESSIONS", &raw)? as usize,
            Err(_) => 1,
        };

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            ledger,
            importer: ImporterConfig {
                session_timeout,
                max_concurrent_sessions,
            },
        })
    }
}

fn parse_positive_u64(name: &str, raw: &str) -> Result<u64> {
    let value: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{name} must be a positive integer, got {raw:?}"))?;
    if value == 0 {
        anyhow::bail!("{name} must be greater than zero");
    }
    Ok(value)
}

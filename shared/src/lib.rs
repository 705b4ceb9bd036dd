use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a bank transaction as reported by the aggregator feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money leaving the account
    Debit,
    /// Money entering the account
    Credit,
}

/// One bank transaction in the aggregator's own schema.
///
/// The sign convention of `amount` is inconsistent at the source; the
/// direction of money movement is authoritative in `transaction_type` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTransaction {
    /// Timestamp string whose leading 10 characters are an ISO calendar date
    pub timestamp: String,
    /// Free-text description from the bank
    pub description: String,
    pub transaction_type: TransactionType,
    /// Decimal amount in major currency units, sign unreliable
    pub amount: Decimal,
    /// Opaque id, stable per source event; the ledger's de-duplication key
    pub transaction_id: String,
    /// Cleaned-up merchant name, when the aggregator could resolve one
    #[serde(default)]
    pub merchant_name: Option<String>,
    /// Merchant street address, when known
    #[serde(default)]
    pub address: Option<String>,
}

/// One transaction in the shape the ledger's write API accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    /// Ledger account the transaction belongs to
    pub account_id: String,
    /// Calendar date (YYYY-MM-DD), no time component
    pub date: String,
    /// Never empty: merchant name when present, otherwise the description
    pub payee_name: String,
    /// Integer minor currency units; negative = outflow, positive = inflow
    pub amount_minor_units: i64,
    /// Verbatim copy of the source `transaction_id`
    pub imported_id: String,
    /// Description and address joined with " | ", absent parts omitted
    #[serde(default)]
    pub notes: Option<String>,
}

/// Ledger account as reported by the ledger service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Whether the account has been closed in the ledger
    #[serde(default)]
    pub closed: bool,
}

/// Per-transaction detail the ledger reports back for one submitted batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Imported ids the ledger acknowledged as newly added
    pub added: Vec<String>,
    /// Imported ids the ledger matched to existing transactions (duplicates)
    pub updated: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Target ledger account id
    pub account_id: String,
    /// Batch of source transactions, order preserved through conversion
    pub transactions: Vec<SourceTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub status: String,
    /// Number of transactions the ledger acknowledged as newly added
    pub imported: usize,
    pub result: ImportOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub status: String,
    pub accounts: Vec<Account>,
}

/// Non-secret operational parameters; never carries the credential value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub status: String,
    pub server_url: String,
    pub budget_id: String,
    /// Whether an encryption passphrase is configured for the working copy
    pub password_configured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

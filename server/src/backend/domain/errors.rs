use thiserror::Error;

/// Error taxonomy for the import pipeline.
///
/// Conversion problems are caught as `Validation` before any session is
/// opened; everything else maps onto the phase of the session that failed.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Malformed or missing required field in a source transaction
    #[error("invalid transaction: {0}")]
    Validation(String),
    /// The ledger service could not be reached or synchronized
    #[error("ledger service unavailable: {0}")]
    UpstreamUnavailable(String),
    /// Session lifecycle failure independent of the data
    #[error("ledger session failure: {0}")]
    Session(String),
    /// The session exceeded its configured time budget
    #[error("ledger session timed out after {0}s")]
    Timeout(u64),
}

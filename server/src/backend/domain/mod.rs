//! # Domain Module
//!
//! Contains the business logic for bridging aggregator transactions into
//! the remote ledger. It operates independently of the HTTP surface and of
//! the ledger client's wire protocol.
//!
//! ## Module Organization
//!
//! - **converter**: pure conversion from the source transaction schema to
//!   the ledger's record shape (sign normalization, minor-unit scaling,
//!   payee and notes derivation)
//! - **session**: the session state machine for one unit of work against
//!   the remote ledger
//! - **import_service**: the session-scoped importer orchestrating open,
//!   synchronize, operate, close — with close guaranteed on every exit path
//! - **errors**: the error taxonomy surfaced to callers
//!
//! ## Business Rules
//!
//! - The sign of a normalized amount is decided by the transaction type
//!   alone, never by the raw sign of the source amount
//! - The imported id is copied verbatim so the ledger can suppress
//!   duplicates across resubmissions
//! - A malformed record rejects the whole batch before any session opens
//! - Every opened session is closed exactly once, whatever happens

pub mod converter;
pub mod errors;
pub mod import_service;
pub mod session;

pub use errors::ImportError;
pub use import_service::{ImportResult, ImporterService};
pub use session::{Session, SessionState};

//! # Converter
//!
//! Pure conversion from the aggregator's transaction schema to the ledger's
//! record shape. No I/O, no shared state. `validate` rejects malformed
//! records up front so that `normalize` is total: same input in, same
//! output out, for any record that passed validation.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use shared::{NormalizedTransaction, SourceTransaction, TransactionType};

/// Separator between description and address in the notes field.
/// Chosen to be unlikely inside either field.
const NOTES_SEPARATOR: &str = " | ";

/// Length of the calendar-date portion of a source timestamp (YYYY-MM-DD)
const DATE_PREFIX_LEN: usize = 10;

/// Check one source transaction before conversion.
///
/// Returns the reason a record is unusable; the importer turns this into a
/// batch-level validation error.
pub fn validate(source: &SourceTransaction) -> Result<(), String> {
    if source.transaction_id.trim().is_empty() {
        return Err("transaction_id must be present and non-empty".to_string());
    }

    let date = date_prefix(&source.timestamp);
    if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        return Err(format!(
            "timestamp {:?} does not start with a calendar date",
            source.timestamp
        ));
    }

    if payee_for(source).trim().is_empty() {
        return Err("either merchant_name or description must be non-empty".to_string());
    }

    // The minor-unit value must fit an i64 after scaling by 100.
    let max_major_units = Decimal::from(i64::MAX) / Decimal::ONE_HUNDRED;
    if source.amount.abs() > max_major_units {
        return Err(format!(
            "amount {} exceeds the representable minor-unit range",
            source.amount
        ));
    }

    Ok(())
}

/// Convert one source transaction into the ledger's record shape.
///
/// The sign of the result is determined solely by the transaction type:
/// DEBIT forces an outflow (≤ 0), CREDIT an inflow (≥ 0), whatever sign the
/// source amount carried. Amounts are scaled to minor units and rounded
/// half-away-from-zero. The imported id is copied verbatim; it is the
/// ledger's de-duplication key.
pub fn normalize(source: &SourceTransaction, account_id: &str) -> NormalizedTransaction {
    NormalizedTransaction {
        account_id: account_id.to_string(),
        date: date_prefix(&source.timestamp),
        payee_name: payee_for(source).to_string(),
        amount_minor_units: to_minor_units(signed_amount(source)),
        imported_id: source.transaction_id.clone(),
        notes: assemble_notes(&source.description, source.address.as_deref()),
    }
}

fn signed_amount(source: &SourceTransaction) -> Decimal {
    match source.transaction_type {
        TransactionType::Debit => -source.amount.abs(),
        TransactionType::Credit => source.amount.abs(),
    }
}

fn to_minor_units(amount: Decimal) -> i64 {
    let scaled = (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    // Validation bounds amounts to the i64 minor-unit range; saturate
    // rather than panic if an unvalidated value slips through.
    scaled.to_i64().unwrap_or(if scaled.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn payee_for(source: &SourceTransaction) -> &str {
    match source.merchant_name.as_deref() {
        Some(merchant) if !merchant.trim().is_empty() => merchant,
        _ => &source.description,
    }
}

fn assemble_notes(description: &str, address: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [Some(description), address]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(NOTES_SEPARATOR))
    }
}

fn date_prefix(timestamp: &str) -> String {
    timestamp.chars().take(DATE_PREFIX_LEN).collect()
}

//! CSV import for finance records
//!
//! One format: `category,label,amount,currency`, with the currency column
//! optional. Every row is hashed for duplicate detection, so re-importing
//! the same file is a no-op.

use csv::ReaderBuilder;
use sha2::{Digest, Sha256};
use std::io::Read;
use tracing::debug;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Category, Currency, NewFinanceRecord, RecordSource};

/// Outcome of an import run
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct ImportSummary {
    /// Rows inserted
    pub imported: usize,
    /// Rows skipped (duplicates and blank padding rows)
    pub skipped: usize,
}

/// Generate a unique hash for deduplication
///
/// Covers the owning profile and the full logical row, so identical rows
/// imported into two profiles both insert, while a re-import into the
/// same profile is skipped.
fn generate_hash(
    profile_id: i64,
    category: Category,
    label: &str,
    amount: f64,
    currency: Currency,
) -> String {
    let key = format!(
        "{}|{}|{}|{}|{}",
        profile_id,
        category.as_str(),
        label,
        amount,
        currency.as_str()
    );
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '€', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}

/// Import finance records from CSV
///
/// Rows with an empty label and no amount are treated as padding from
/// the entry form and skipped. A missing or empty currency cell falls
/// back to `default_currency`.
pub fn import_records<R: Read>(
    db: &Database,
    profile_id: i64,
    reader: R,
    default_currency: Currency,
) -> Result<ImportSummary> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let header_ok = headers.len() >= 3
        && ["category", "label", "amount"]
            .iter()
            .enumerate()
            .all(|(i, name)| {
                headers
                    .get(i)
                    .map(|h| h.trim().eq_ignore_ascii_case(name))
                    .unwrap_or(false)
            });
    if !header_ok {
        return Err(Error::Import(
            "Unrecognized header, expected category,label,amount[,currency]".into(),
        ));
    }

    let mut summary = ImportSummary::default();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2; // 1-based, header is line 1

        let label = record.get(1).unwrap_or("").trim();
        let amount_str = record.get(2).unwrap_or("").trim();

        // Blank padding rows from the entry form
        if label.is_empty() {
            let no_amount = amount_str.is_empty()
                || parse_amount(amount_str).map(|a| a == 0.0).unwrap_or(false);
            if no_amount {
                summary.skipped += 1;
                continue;
            }
        }

        let category_str = record.get(0).unwrap_or("").trim();
        let category: Category = category_str.parse().map_err(|_| {
            Error::Import(format!("Line {}: unknown category '{}'", line, category_str))
        })?;

        let amount = parse_amount(amount_str).map_err(|_| {
            Error::Import(format!("Line {}: unable to parse amount '{}'", line, amount_str))
        })?;

        let currency = match record.get(3).map(str::trim) {
            Some(code) if !code.is_empty() => code.parse().map_err(|_| {
                Error::Import(format!("Line {}: unknown currency '{}'", line, code))
            })?,
            _ => default_currency,
        };

        let import_hash = generate_hash(profile_id, category, label, amount, currency);

        let inserted = db.insert_record(
            profile_id,
            &NewFinanceRecord {
                category,
                label: label.to_string(),
                amount,
                currency,
                source: RecordSource::Import,
                import_hash: Some(import_hash),
            },
        )?;

        match inserted {
            Some(_) => summary.imported += 1,
            None => summary.skipped += 1,
        }
    }

    debug!(
        "Imported {} records for profile {} ({} skipped)",
        summary.imported, profile_id, summary.skipped
    );
    Ok(summary)
}

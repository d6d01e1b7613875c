//! Finance record operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{Category, Currency, FinanceRecord, NewFinanceRecord};

impl Database {
    /// Insert a finance record (skips duplicates based on import_hash)
    ///
    /// Returns `None` when the record carries an import_hash that already
    /// exists, so CSV re-imports are idempotent. Manual records have no
    /// hash and always insert.
    pub fn insert_record(&self, profile_id: i64, record: &NewFinanceRecord) -> Result<Option<i64>> {
        let conn = self.conn()?;

        // Check for duplicate
        if let Some(hash) = &record.import_hash {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM finance_records WHERE import_hash = ?",
                    params![hash],
                    |row| row.get(0),
                )
                .ok();

            if existing.is_some() {
                return Ok(None); // Duplicate, skip
            }
        }

        conn.execute(
            r#"
            INSERT INTO finance_records (profile_id, category, label, amount, currency, source, import_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                profile_id,
                record.category.as_str(),
                record.label,
                record.amount,
                record.currency.as_str(),
                record.source.as_str(),
                record.import_hash,
            ],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// List records for a profile, optionally filtered to one category
    ///
    /// Newest first, with id as a tiebreaker so same-second inserts keep
    /// a stable order.
    pub fn list_records(
        &self,
        profile_id: i64,
        category: Option<Category>,
    ) -> Result<Vec<FinanceRecord>> {
        let conn = self.conn()?;

        let records = match category {
            Some(category) => {
                let mut stmt = conn.prepare(
                    "SELECT id, profile_id, category, label, amount, currency, source, import_hash, created_at, updated_at
                     FROM finance_records
                     WHERE profile_id = ? AND category = ?
                     ORDER BY created_at DESC, id DESC",
                )?;
                let rows = stmt
                    .query_map(params![profile_id, category.as_str()], |row| {
                        Self::row_to_record(row)
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, profile_id, category, label, amount, currency, source, import_hash, created_at, updated_at
                     FROM finance_records
                     WHERE profile_id = ?
                     ORDER BY created_at DESC, id DESC",
                )?;
                let rows = stmt
                    .query_map(params![profile_id], |row| Self::row_to_record(row))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };

        Ok(records)
    }

    /// Get a single record by ID
    pub fn get_record(&self, id: i64) -> Result<Option<FinanceRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, profile_id, category, label, amount, currency, source, import_hash, created_at, updated_at
             FROM finance_records WHERE id = ?",
        )?;

        let record = stmt
            .query_row(params![id], |row| Self::row_to_record(row))
            .optional()?;

        Ok(record)
    }

    /// Update a record's label and/or amount
    ///
    /// Returns false when neither field was given or the record does not
    /// exist.
    pub fn update_record(&self, id: i64, label: Option<&str>, amount: Option<f64>) -> Result<bool> {
        if label.is_none() && amount.is_none() {
            return Ok(false);
        }

        let conn = self.conn()?;

        // Use explicit transaction for atomicity when multiple fields updated
        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| {
            if let Some(label) = label {
                conn.execute(
                    "UPDATE finance_records SET label = ? WHERE id = ?",
                    params![label, id],
                )?;
            }
            if let Some(amount) = amount {
                conn.execute(
                    "UPDATE finance_records SET amount = ? WHERE id = ?",
                    params![amount, id],
                )?;
            }
            conn.execute(
                "UPDATE finance_records SET updated_at = CURRENT_TIMESTAMP WHERE id = ?",
                params![id],
            )
        })();

        match result {
            Ok(rows) => {
                conn.execute("COMMIT", [])?;
                Ok(rows > 0)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e.into())
            }
        }
    }

    /// Delete a record permanently
    pub fn delete_record(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM finance_records WHERE id = ?", params![id])?;
        Ok(rows > 0)
    }

    /// Count records for a profile
    pub fn count_records(&self, profile_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM finance_records WHERE profile_id = ?",
            params![profile_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Helper to convert a row to FinanceRecord
    /// Column order: id, profile_id, category, label, amount, currency, source,
    ///               import_hash, created_at, updated_at
    pub(crate) fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<FinanceRecord> {
        let category_str: String = row.get(2)?;
        let currency_str: String = row.get(5)?;
        let source_str: Option<String> = row.get(6)?;
        let created_at_str: String = row.get(8)?;
        let updated_at_str: Option<String> = row.get(9)?;
        Ok(FinanceRecord {
            id: row.get(0)?,
            profile_id: row.get(1)?,
            category: category_str.parse().map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    format!("unknown category: {category_str}").into(),
                )
            })?,
            label: row.get(3)?,
            amount: row.get(4)?,
            currency: Currency::from_db_code(&currency_str),
            source: source_str.and_then(|s| s.parse().ok()).unwrap_or_default(),
            import_hash: row.get(7)?,
            created_at: parse_datetime(&created_at_str),
            updated_at: updated_at_str.map(|s| parse_datetime(&s)),
        })
    }
}

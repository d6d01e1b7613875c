//! Profile operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Currency, NewProfile, Profile};

impl Database {
    /// Create a new profile
    ///
    /// Usernames are unique; a taken name maps to `Error::Conflict` so
    /// callers can surface it without poking at SQLite error codes.
    pub fn create_profile(&self, profile: &NewProfile) -> Result<i64> {
        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO profiles (username, display_name, currency) VALUES (?, ?, ?)",
            params![
                profile.username,
                profile.display_name,
                profile.currency.as_str()
            ],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::Conflict(format!(
                    "username '{}'",
                    profile.username
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a profile by ID
    pub fn get_profile(&self, id: i64) -> Result<Option<Profile>> {
        let conn = self.conn()?;
        let profile = conn
            .query_row(
                "SELECT id, username, display_name, currency, created_at, updated_at
                 FROM profiles WHERE id = ?",
                params![id],
                |row| Self::row_to_profile(row),
            )
            .optional()?;

        Ok(profile)
    }

    /// Get a profile by username (exact match)
    pub fn get_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        let conn = self.conn()?;
        let profile = conn
            .query_row(
                "SELECT id, username, display_name, currency, created_at, updated_at
                 FROM profiles WHERE username = ?",
                params![username],
                |row| Self::row_to_profile(row),
            )
            .optional()?;

        Ok(profile)
    }

    /// List all profiles
    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, display_name, currency, created_at, updated_at
             FROM profiles ORDER BY username",
        )?;

        let profiles = stmt
            .query_map([], |row| Self::row_to_profile(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(profiles)
    }

    /// Update a profile's display name and/or preferred currency
    pub fn update_profile(
        &self,
        id: i64,
        display_name: Option<&str>,
        currency: Option<Currency>,
    ) -> Result<bool> {
        if display_name.is_none() && currency.is_none() {
            return Ok(false);
        }

        let conn = self.conn()?;

        // Use explicit transaction for atomicity when multiple fields updated
        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| {
            if let Some(display_name) = display_name {
                conn.execute(
                    "UPDATE profiles SET display_name = ? WHERE id = ?",
                    params![display_name, id],
                )?;
            }
            if let Some(currency) = currency {
                conn.execute(
                    "UPDATE profiles SET currency = ? WHERE id = ?",
                    params![currency.as_str(), id],
                )?;
            }
            conn.execute(
                "UPDATE profiles SET updated_at = CURRENT_TIMESTAMP WHERE id = ?",
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

    /// Check whether a username is free to register
    pub fn username_available(&self, username: &str) -> Result<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM profiles WHERE username = ?",
            params![username],
            |row| row.get(0),
        )?;
        Ok(count == 0)
    }

    /// Delete a profile and all of its finance records
    ///
    /// Foreign keys are enforced per connection, so the records are
    /// removed explicitly rather than relying on a cascade.
    pub fn delete_profile(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| {
            conn.execute(
                "DELETE FROM finance_records WHERE profile_id = ?",
                params![id],
            )?;
            conn.execute("DELETE FROM profiles WHERE id = ?", params![id])
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

    /// Helper to convert a row to Profile
    /// Column order: id, username, display_name, currency, created_at, updated_at
    pub(crate) fn row_to_profile(row: &rusqlite::Row) -> rusqlite::Result<Profile> {
        let currency_str: String = row.get(3)?;
        let created_at_str: String = row.get(4)?;
        let updated_at_str: Option<String> = row.get(5)?;
        Ok(Profile {
            id: row.get(0)?,
            username: row.get(1)?,
            display_name: row.get(2)?,
            currency: Currency::from_db_code(&currency_str),
            created_at: parse_datetime(&created_at_str),
            updated_at: updated_at_str.map(|s| parse_datetime(&s)),
        })
    }
}

//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `profiles` - Profile onboarding and settings
//! - `records` - Finance record CRUD
//! - `audit` - Append-only audit log of mutating operations

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::{Error, Result};

mod audit;
mod profiles;
mod records;

pub use audit::AuditEntry;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "KEEL_DB_KEY";

/// Derive an encryption key from a passphrase using Argon2
///
/// Uses a fixed application salt so the same passphrase always produces the same key,
/// regardless of database path. This allows moving/renaming/restoring the database freely.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Fixed application salt - changing this would invalidate all existing encrypted databases
    const APP_SALT: &[u8; 16] = b"keel-salt-v1-fix";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    // Derive key using Argon2id
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    // Extract the hash portion for use as SQLCipher key (hex encoded)
    let hash_str = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(hash_str.as_bytes()))
}

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Create a new database connection pool with encryption
    ///
    /// Requires `KEEL_DB_KEY` environment variable to be set.
    /// The database will be encrypted using SQLCipher with a key derived
    /// from the passphrase via Argon2.
    ///
    /// Returns an error if `KEEL_DB_KEY` is not set. Use `new_unencrypted()`
    /// for development/testing without encryption.
    pub fn new(path: &str) -> Result<Self> {
        let encryption_key = std::env::var(DB_KEY_ENV).ok();
        match encryption_key {
            Some(key) => Self::new_with_key(path, Some(&key)),
            None => Err(Error::Encryption(format!(
                "Database encryption required. Set {} environment variable with your passphrase, \
                or use --no-encrypt for unencrypted databases (not recommended for production).",
                DB_KEY_ENV
            ))),
        }
    }

    /// Create a new unencrypted database connection pool
    ///
    /// WARNING: This creates an unencrypted database. Only use for development
    /// or testing. For production, use `new()` with `KEEL_DB_KEY` set.
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Create a new database with an explicit encryption key
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);

        let pool = if let Some(pass) = passphrase {
            let key = derive_key(pass)?;
            let key_pragma = format!("PRAGMA key = 'x\"{}\"';", key);

            // Use with_init to set the key on every new connection
            let manager = manager.with_init(move |conn| {
                conn.execute_batch(&key_pragma)?;
                Ok(())
            });

            Pool::builder().max_size(10).build(manager)?
        } else {
            Pool::builder().max_size(10).build(manager)?
        };

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create an in-memory database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because SQLCipher
    /// has issues with in-memory databases in the connection pool.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!("/tmp/keel_test_{}.db", id);

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new_unencrypted(&path)
    }

    /// Check if the database is encrypted
    pub fn is_encrypted(&self) -> Result<bool> {
        let conn = self.conn()?;
        // SQLCipher sets cipher_version if encryption is active
        let result: rusqlite::Result<String> =
            conn.query_row("PRAGMA cipher_version;", [], |row| row.get(0));
        Ok(result.is_ok() && std::env::var(DB_KEY_ENV).is_ok())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Soft reset: clear all finance data but preserve profiles
    ///
    /// Clears: finance_records, audit_log
    /// Preserves: profiles
    pub fn soft_reset(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            DELETE FROM finance_records;
            DELETE FROM audit_log;
            "#,
        )?;

        info!("Database soft reset complete");
        Ok(())
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- Performance pragmas for local storage (SSD/M.2 recommended)
            -- WAL mode: better concurrency, readers don't block writers
            -- Note: creates -wal and -shm sidecar files alongside the database
            PRAGMA journal_mode = WAL;

            -- Cache size: ~8MB (2000 pages * 4KB default page size)
            PRAGMA cache_size = 2000;

            -- Synchronous NORMAL: good balance of safety and performance
            -- FULL is safer but slower; NORMAL is safe for most power-loss scenarios
            PRAGMA synchronous = NORMAL;

            -- Store temp tables in memory (faster for complex queries)
            PRAGMA temp_store = MEMORY;

            -- Profiles (tracked users)
            CREATE TABLE IF NOT EXISTS profiles (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                display_name TEXT,
                currency TEXT NOT NULL DEFAULT 'USD',      -- preferred reporting currency
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME
            );

            -- Finance records (the four position categories)
            CREATE TABLE IF NOT EXISTS finance_records (
                id INTEGER PRIMARY KEY,
                profile_id INTEGER NOT NULL REFERENCES profiles(id),
                category TEXT NOT NULL,                    -- inflow, outflow, asset, liability
                label TEXT NOT NULL,
                amount REAL NOT NULL,
                currency TEXT NOT NULL DEFAULT 'USD',      -- USD, EUR, HUF
                source TEXT DEFAULT 'manual',              -- manual, import
                import_hash TEXT UNIQUE,                   -- SHA-256 dedup key for imported rows
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME
            );

            -- Index for the per-profile, per-category fetches the scorers run
            CREATE INDEX IF NOT EXISTS idx_records_profile ON finance_records(profile_id);
            CREATE INDEX IF NOT EXISTS idx_records_profile_category ON finance_records(profile_id, category);

            -- Audit log (tracks mutating operations)
            CREATE TABLE IF NOT EXISTS audit_log (
                id INTEGER PRIMARY KEY,
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
                actor TEXT NOT NULL,
                action TEXT NOT NULL,
                entity_type TEXT,
                entity_id INTEGER,
                details TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_audit_log_actor ON audit_log(actor);
            CREATE INDEX IF NOT EXISTS idx_audit_log_timestamp ON audit_log(timestamp);
            CREATE INDEX IF NOT EXISTS idx_audit_log_action ON audit_log(action);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status
//! - `cmd_reset` - Clear finance data

use std::path::Path;

use anyhow::{Context, Result};
use keel_core::db::Database;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Database path must be valid UTF-8"))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Create a profile: keel onboard --username you");
    println!("  2. Add records: keel add you inflow Salary 4200");
    println!("  3. Start web UI: keel serve");

    Ok(())
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    use keel_core::db::DB_KEY_ENV;
    use std::fs;

    println!();
    println!("📊 Keel Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    // Check encryption status
    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }

    // Try to open the database and show counts
    if db_path.exists() {
        match open_db(db_path, no_encrypt) {
            Ok(db) => {
                let profiles = db.list_profiles()?;
                let mut records = 0;
                for profile in &profiles {
                    records += db.count_records(profile.id)?;
                }
                println!();
                println!("   Profiles: {}", profiles.len());
                println!("   Records: {}", records);
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                } else if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}

/// Clear finance records and the audit log, keeping profiles
pub fn cmd_reset(db_path: &Path, yes: bool, no_encrypt: bool) -> Result<()> {
    use std::io::{self, Write};

    if !db_path.exists() {
        anyhow::bail!("Database not found: {}", db_path.display());
    }

    if !yes {
        print!("⚠️  This will delete all finance records and the audit log.\n");
        print!("   Profiles will be preserved.\n\n");
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let db = open_db(db_path, no_encrypt)?;
    db.soft_reset()?;

    println!("✅ Database reset complete.");
    println!("   Cleared: finance records, audit log");
    println!("   Preserved: profiles");

    Ok(())
}

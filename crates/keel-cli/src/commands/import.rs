//! CSV import command implementation

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use keel_core::db::Database;
use keel_core::import::import_records;

use super::profiles::resolve_profile;

pub fn cmd_import(db: &Database, user: &str, file: &Path) -> Result<()> {
    let profile = resolve_profile(db, user)?;

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;

    println!(
        "📥 Importing {} for '{}'...",
        file.display(),
        profile.username
    );

    let summary = import_records(db, profile.id, csv_file, profile.currency)?;

    db.log_audit(
        "cli",
        "import",
        Some("record"),
        None,
        Some(&format!(
            "profile={}, imported={}, skipped={}",
            profile.id, summary.imported, summary.skipped
        )),
    )?;

    println!("✅ Import complete!");
    println!("   Imported: {}", summary.imported);
    println!("   Skipped (duplicates or blank): {}", summary.skipped);

    if summary.imported > 0 {
        println!();
        println!("   Run 'keel insights {}' to score the result.", profile.username);
    }

    Ok(())
}

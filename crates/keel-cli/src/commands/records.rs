//! Finance record command implementations (add, list, edit, delete)

use anyhow::Result;
use keel_core::db::Database;
use keel_core::models::{Category, Currency, NewFinanceRecord, RecordSource};

use super::profiles::resolve_profile;
use super::truncate;

/// Add a single record
pub fn cmd_add(
    db: &Database,
    user: &str,
    category: &str,
    label: &str,
    amount: f64,
    currency: Option<&str>,
) -> Result<()> {
    let profile = resolve_profile(db, user)?;

    let category: Category = category.parse().map_err(|e: String| {
        anyhow::anyhow!("{} (valid: inflow, outflow, asset, liability)", e)
    })?;

    let label = label.trim();
    if label.is_empty() {
        anyhow::bail!("Label must not be empty");
    }

    let currency: Currency = match currency {
        Some(code) => code
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{} (valid: USD, EUR, HUF)", e))?,
        None => profile.currency,
    };

    let record_id = db
        .insert_record(
            profile.id,
            &NewFinanceRecord {
                category,
                label: label.to_string(),
                amount,
                currency,
                source: RecordSource::Manual,
                import_hash: None,
            },
        )?
        .ok_or_else(|| anyhow::anyhow!("Record not inserted"))?;

    db.log_audit(
        "cli",
        "create",
        Some("record"),
        Some(record_id),
        Some(&format!("category={}, label={}", category, label)),
    )?;

    println!(
        "✅ Added {} '{}' {}{:.2} for '{}' (id: {})",
        category,
        label,
        currency.symbol(),
        amount,
        profile.username,
        record_id
    );

    Ok(())
}

/// List records for a profile
pub fn cmd_records_list(
    db: &Database,
    user: &str,
    category: Option<&str>,
    limit: usize,
) -> Result<()> {
    let profile = resolve_profile(db, user)?;

    let category: Option<Category> = match category {
        Some(s) => Some(s.parse().map_err(|e: String| {
            anyhow::anyhow!("{} (valid: inflow, outflow, asset, liability)", e)
        })?),
        None => None,
    };

    let records = db.list_records(profile.id, category)?;

    if records.is_empty() {
        println!("No records found for '{}'. Add one with:", profile.username);
        println!("  keel add {} inflow Salary 4200", profile.username);
        return Ok(());
    }

    println!();
    println!("💵 Records for '{}'", profile.username);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>4} │ {:9} │ {:20} │ {:>12} │ {:8} │ {:6} │ {}",
        "ID", "Category", "Label", "Amount", "Currency", "Source", "Created"
    );
    println!("   ─────┼───────────┼──────────────────────┼──────────────┼──────────┼────────┼────────────");

    for record in records.iter().take(limit) {
        println!(
            "   {:>4} │ {:9} │ {:20} │ {:>12.2} │ {:8} │ {:6} │ {}",
            record.id,
            record.category.as_str(),
            truncate(&record.label, 20),
            record.amount,
            record.currency.as_str(),
            record.source.as_str(),
            record.created_at.format("%Y-%m-%d")
        );
    }

    if records.len() > limit {
        println!();
        println!(
            "   ({} more; raise with --limit)",
            records.len() - limit
        );
    }

    Ok(())
}

/// Edit a record's label and/or amount
pub fn cmd_records_edit(
    db: &Database,
    id: i64,
    label: Option<&str>,
    amount: Option<f64>,
) -> Result<()> {
    let record = db
        .get_record(id)?
        .ok_or_else(|| anyhow::anyhow!("Record not found: {}", id))?;

    if label.is_none() && amount.is_none() {
        anyhow::bail!("Nothing to change. Pass --label and/or --amount.");
    }

    db.update_record(id, label, amount)?;

    db.log_audit(
        "cli",
        "update",
        Some("record"),
        Some(id),
        Some(&format!("label={:?}, amount={:?}", label, amount)),
    )?;

    let updated_label = label.unwrap_or(&record.label);
    println!("✅ Updated record '{}' (id: {})", updated_label, id);

    Ok(())
}

/// Delete a record
pub fn cmd_records_delete(db: &Database, id: i64) -> Result<()> {
    let record = db
        .get_record(id)?
        .ok_or_else(|| anyhow::anyhow!("Record not found: {}", id))?;

    db.delete_record(id)?;

    db.log_audit(
        "cli",
        "delete",
        Some("record"),
        Some(id),
        Some(&format!(
            "category={}, label={}",
            record.category, record.label
        )),
    )?;

    println!(
        "✅ Deleted {} '{}' (id: {})",
        record.category, record.label, id
    );

    Ok(())
}

//! Profile command implementations (onboard, list, set-currency, delete)

use anyhow::Result;
use keel_core::db::Database;
use keel_core::models::{Currency, NewProfile, Profile};

use super::truncate;

/// Resolve a profile by id or username
pub fn resolve_profile(db: &Database, user: &str) -> Result<Profile> {
    // First try as an ID
    if let Ok(id) = user.parse::<i64>() {
        if let Some(profile) = db.get_profile(id)? {
            return Ok(profile);
        }
    }

    if let Some(profile) = db.get_profile_by_username(user)? {
        return Ok(profile);
    }

    anyhow::bail!("Profile not found: {}", user)
}

/// Onboard a new profile
pub fn cmd_onboard(
    db: &Database,
    username: &str,
    display_name: Option<&str>,
    currency: Option<&str>,
) -> Result<()> {
    let username = username.trim();
    if username.is_empty() {
        anyhow::bail!("Username must not be empty");
    }

    let currency: Currency = match currency {
        Some(code) => code
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{} (valid: USD, EUR, HUF)", e))?,
        None => Currency::Usd,
    };

    let profile_id = db.create_profile(&NewProfile {
        username: username.to_string(),
        display_name: display_name.map(String::from),
        currency,
    })?;

    db.log_audit(
        "cli",
        "onboard",
        Some("profile"),
        Some(profile_id),
        Some(&format!("username={}", username)),
    )?;

    println!(
        "✅ Onboarded '{}' in {} (id: {})",
        username, currency, profile_id
    );
    println!();
    println!("Next steps:");
    println!("  keel add {} inflow Salary 4200", username);
    println!("  keel import {} sheet.csv", username);

    Ok(())
}

/// List all profiles
pub fn cmd_profiles_list(db: &Database) -> Result<()> {
    let profiles = db.list_profiles()?;

    if profiles.is_empty() {
        println!("No profiles found. Create one with:");
        println!("  keel onboard --username you");
        return Ok(());
    }

    println!();
    println!("👤 Profiles");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>4} │ {:16} │ {:20} │ {:8} │ {}",
        "ID", "Username", "Display name", "Currency", "Created"
    );
    println!("   ─────┼──────────────────┼──────────────────────┼──────────┼────────────");

    for profile in profiles {
        let display_name = profile.display_name.as_deref().unwrap_or("-");
        println!(
            "   {:>4} │ {:16} │ {:20} │ {:8} │ {}",
            profile.id,
            truncate(&profile.username, 16),
            truncate(display_name, 20),
            profile.currency.as_str(),
            profile.created_at.format("%Y-%m-%d")
        );
    }

    Ok(())
}

/// Set a profile's preferred reporting currency
pub fn cmd_profiles_set_currency(db: &Database, user: &str, currency: &str) -> Result<()> {
    let profile = resolve_profile(db, user)?;

    let currency: Currency = currency
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{} (valid: USD, EUR, HUF)", e))?;

    db.update_profile(profile.id, None, Some(currency))?;

    db.log_audit(
        "cli",
        "update",
        Some("profile"),
        Some(profile.id),
        Some(&format!("currency={}", currency)),
    )?;

    println!(
        "✅ Set currency for '{}' to {} (id: {})",
        profile.username, currency, profile.id
    );

    Ok(())
}

/// Delete a profile and all of its records
pub fn cmd_profiles_delete(db: &Database, user: &str, yes: bool) -> Result<()> {
    use std::io::{self, Write};

    let profile = resolve_profile(db, user)?;
    let record_count = db.count_records(profile.id)?;

    if !yes {
        print!(
            "⚠️  This will delete profile '{}' and its {} records.\n\n",
            profile.username, record_count
        );
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    db.delete_profile(profile.id)?;

    db.log_audit(
        "cli",
        "delete",
        Some("profile"),
        Some(profile.id),
        Some(&format!("username={}", profile.username)),
    )?;

    println!(
        "✅ Deleted profile '{}' and {} records",
        profile.username, record_count
    );

    Ok(())
}

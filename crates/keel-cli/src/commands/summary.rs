//! Summary command implementation (totals and ratios)

use anyhow::Result;
use keel_core::db::Database;
use keel_core::models::Currency;
use keel_core::stats::build_summary;

use super::profiles::resolve_profile;

pub fn cmd_summary(db: &Database, user: &str, currency: Option<&str>, json: bool) -> Result<()> {
    let profile = resolve_profile(db, user)?;

    let currency: Currency = match currency {
        Some(code) => code
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{} (valid: USD, EUR, HUF)", e))?,
        None => profile.currency,
    };

    let summary = build_summary(db, profile.id, currency)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let sym = summary.currency.symbol();

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Keel Summary               │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Profile:      {} ({})", profile.username, summary.currency);
    println!("  Records:      {}", summary.record_count);
    println!();
    println!("  Inflows:      {}{:.2}", sym, summary.inflow_total);
    println!("  Outflows:     {}{:.2}", sym, summary.outflow_total);
    println!("  Assets:       {}{:.2}", sym, summary.asset_total);
    println!("  Liabilities:  {}{:.2}", sym, summary.liability_total);
    println!();
    println!("  Net worth:       {}{:.2}", sym, summary.ratios.net_worth);
    println!("  Savings ratio:   {:.1}%", summary.ratios.savings_ratio);
    println!("  Debt-to-asset:   {:.1}%", summary.ratios.debt_to_asset);
    println!("  Liquidity ratio: {:.1}%", summary.ratios.liquidity_ratio);
    println!();
    println!("  ❤️  Health score: {:.0}/100", summary.ratios.health_score);
    println!();

    if summary.record_count == 0 {
        println!("  No records yet. Add some with 'keel add {} ...'", profile.username);
    }

    Ok(())
}

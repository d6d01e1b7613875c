//! Insight scoring command implementation

use anyhow::Result;
use keel_core::db::Database;
use keel_core::insights::{AnalysisContext, InsightCategory, InsightEngine, Severity};

use super::profiles::resolve_profile;

pub fn cmd_insights(db: &Database, user: &str, category: Option<&str>, json: bool) -> Result<()> {
    let profile = resolve_profile(db, user)?;

    let engine = InsightEngine::new();
    let ctx = AnalysisContext::new(db, profile.id, profile.currency);

    let reports = match category {
        Some(s) => {
            let category: InsightCategory = s.parse().map_err(|e: String| {
                anyhow::anyhow!("{} (valid: inflow, outflow, asset, liability)", e)
            })?;
            vec![engine.analyze_category(&ctx, category)?]
        }
        None => engine.analyze_all(&ctx)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!();
    println!("🔍 Insights for '{}'", profile.username);
    println!("   ─────────────────────────────────────────────────────────────");

    for report in &reports {
        let icon = match report.severity {
            Severity::Severe => "🔴",
            Severity::Warning => "🟡",
            Severity::Neutral => "🟢",
        };

        println!(
            "   {} {} (level {})",
            icon, report.category, report.warning_level
        );
        println!("      {}", report.message);
        println!();
    }

    Ok(())
}

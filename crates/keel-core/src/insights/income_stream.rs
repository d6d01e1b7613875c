//! Income stream insight
//!
//! Scores inflow health from two angles: how much of the income recurring
//! spending eats (liquidity) and how many streams the income arrives
//! through (diversity). Both totals are normalized into the profile
//! currency before the ratio is taken.

use crate::error::Result;
use crate::models::Category;
use crate::stats::category_total;

use super::engine::{AnalysisContext, Insight};
use super::types::{InsightCategory, InsightReport, Severity};

/// Insight that scores income concentration and liquidity
pub struct IncomeStreamInsight;

impl IncomeStreamInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IncomeStreamInsight {
    fn default() -> Self {
        Self::new()
    }
}

/// Score already-fetched inflow facts
///
/// `income_sources` is the number of inflow records; the totals must share
/// one currency.
pub fn score_income_streams(
    income_sources: usize,
    total_inflow: f64,
    total_outflow: f64,
) -> InsightReport {
    // Expense-to-income ratio drives the liquidity score:
    // ratio <= 0.3 scores 0 (comfortable), ratio >= 1.0 scores 1 (stretched).
    // A zero inflow total cannot form a ratio; treat it as fully stretched
    // instead of letting 0/0 turn into NaN.
    let liquidity_score = if total_inflow == 0.0 {
        1.0
    } else {
        let ratio = total_outflow / total_inflow;
        ((ratio - 0.3) / 0.7).clamp(0.0, 1.0)
    };

    // More sources = safer, with diminishing returns after a few.
    // Logistic curve centered at two sources keeps the transition smooth.
    let diversity_score = 1.0 / (1.0 + (income_sources as f64 - 2.0).exp());

    // Weighted combination: liquidity matters more than diversity
    let combined = 0.6 * liquidity_score + 0.4 * diversity_score;
    let warning_level = (combined * 100.0).round() as u8;

    let (severity, mut message) = if warning_level < 30 {
        (
            Severity::Neutral,
            "Your income and spending structure look healthy.".to_string(),
        )
    } else if warning_level < 60 {
        (
            Severity::Warning,
            "You have some financial concentration or liquidity risk. Consider adding an extra income stream or reducing recurring expenses."
                .to_string(),
        )
    } else {
        (
            Severity::Severe,
            "Your finances are highly concentrated and illiquid. Diversifying income or cutting expenses is strongly advised."
                .to_string(),
        )
    };

    if income_sources == 1 {
        message.push_str(" (Only one stream of income detected.)");
    } else if income_sources > 5 {
        message.push_str(
            " (You have many small income streams — ensure they’re manageable and consistent.)",
        );
    }

    InsightReport {
        category: InsightCategory::Inflow,
        severity,
        warning_level,
        message,
    }
}

impl Insight for IncomeStreamInsight {
    fn category(&self) -> InsightCategory {
        InsightCategory::Inflow
    }

    fn name(&self) -> &'static str {
        "Income Streams"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<InsightReport> {
        // Both totals are required; an empty category short-circuits as
        // InsufficientData before any arithmetic runs.
        let inflow = category_total(ctx.db, ctx.profile_id, Category::Inflow, ctx.currency)?;
        let outflow = category_total(ctx.db, ctx.profile_id, Category::Outflow, ctx.currency)?;

        Ok(score_income_streams(
            inflow.records.len(),
            inflow.total,
            outflow.total,
        ))
    }
}

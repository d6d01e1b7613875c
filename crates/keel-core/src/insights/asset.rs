//! Asset insight
//!
//! Scores how spread out the asset base is. Like the outflow scorer this
//! works on raw amounts; diversity of labels is the signal.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{Category, FinanceRecord};

use super::engine::{AnalysisContext, Insight};
use super::types::{InsightCategory, InsightReport, Severity};

/// Insight that scores asset diversification
pub struct AssetInsight;

impl AssetInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AssetInsight {
    fn default() -> Self {
        Self::new()
    }
}

/// Score an already-fetched asset record set
pub fn score_assets(records: &[FinanceRecord]) -> InsightReport {
    let total: f64 = records.iter().map(|r| r.amount).sum();
    let categories = records
        .iter()
        .map(|r| r.label.as_str())
        .collect::<HashSet<_>>()
        .len();

    // Logistic curve centered at two categories; diminishing returns
    // once the base is spread over a handful of them
    let diversity_score = 1.0 / (1.0 + (categories as f64 - 2.0).exp());

    let (severity, mut message) = if total == 0.0 {
        (
            Severity::Severe,
            "No assets detected. Begin by accumulating savings or investments.".to_string(),
        )
    } else if categories <= 1 {
        (
            Severity::Warning,
            "All your assets are concentrated in a single category (e.g., only cash or only stocks)."
                .to_string(),
        )
    } else if categories < 3 {
        (
            Severity::Warning,
            "Consider diversifying your asset base for better financial resilience.".to_string(),
        )
    } else {
        (
            Severity::Neutral,
            "Your asset portfolio shows healthy diversification.".to_string(),
        )
    };

    if total > 0.0 && categories > 5 {
        message.push_str(
            " (Many asset categories detected. Make sure complicated holdings remain manageable.)",
        );
    }

    let warning_level = (diversity_score * 100.0).round() as u8;

    InsightReport {
        category: InsightCategory::Asset,
        severity,
        warning_level,
        message,
    }
}

impl Insight for AssetInsight {
    fn category(&self) -> InsightCategory {
        InsightCategory::Asset
    }

    fn name(&self) -> &'static str {
        "Asset Diversification"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<InsightReport> {
        let records = ctx.db.list_records(ctx.profile_id, Some(Category::Asset))?;
        Ok(score_assets(&records))
    }
}

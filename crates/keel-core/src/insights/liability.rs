//! Liability insight
//!
//! Concentration risk runs the other way here: one large obligation is
//! riskier than several small ones, whatever the label spread of the
//! outflows funding it. Raw amounts, no conversion.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{Category, FinanceRecord};

use super::engine::{AnalysisContext, Insight};
use super::types::{InsightCategory, InsightReport, Severity};

/// Insight that scores liability concentration
pub struct LiabilityInsight;

impl LiabilityInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LiabilityInsight {
    fn default() -> Self {
        Self::new()
    }
}

/// Score an already-fetched liability record set
pub fn score_liabilities(records: &[FinanceRecord]) -> InsightReport {
    let total: f64 = records.iter().map(|r| r.amount).sum();
    let sources = records
        .iter()
        .map(|r| r.label.as_str())
        .collect::<HashSet<_>>()
        .len();

    // Everything owed to a single place is the risky shape
    let concentrated = sources == 1 && total > 0.0;

    let (severity, message) = if total == 0.0 {
        (
            Severity::Neutral,
            "You have no recorded liabilities—great job controlling your debts!",
        )
    } else if concentrated {
        (
            Severity::Severe,
            "All your liabilities are concentrated in one area. This poses a repayment risk if conditions change.",
        )
    } else {
        (
            if total > 20000.0 {
                Severity::Warning
            } else {
                Severity::Neutral
            },
            "Your liabilities are diversified, but monitor overall debt to ensure manageability.",
        )
    };

    // Level is computed from shape alone, so even a debt-free profile
    // carries a mid-range "keep watching" score
    let warning_level = if concentrated {
        90
    } else if records.len() > 5 {
        30
    } else {
        60
    };

    InsightReport {
        category: InsightCategory::Liability,
        severity,
        warning_level,
        message: message.to_string(),
    }
}

impl Insight for LiabilityInsight {
    fn category(&self) -> InsightCategory {
        InsightCategory::Liability
    }

    fn name(&self) -> &'static str {
        "Liability Concentration"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<InsightReport> {
        let records = ctx
            .db
            .list_records(ctx.profile_id, Some(Category::Liability))?;
        Ok(score_liabilities(&records))
    }
}

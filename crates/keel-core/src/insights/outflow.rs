//! Outflow insight
//!
//! Looks at how spending spreads across labels. Sums are taken over raw
//! amounts without currency conversion; the signal here is shape, not
//! magnitude.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{Category, FinanceRecord};

use super::engine::{AnalysisContext, Insight};
use super::types::{InsightCategory, InsightReport, Severity};

/// Insight that scores expense concentration
pub struct OutflowInsight;

impl OutflowInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OutflowInsight {
    fn default() -> Self {
        Self::new()
    }
}

/// Score an already-fetched outflow record set
pub fn score_outflows(records: &[FinanceRecord]) -> InsightReport {
    let total: f64 = records.iter().map(|r| r.amount).sum();
    let categories = records
        .iter()
        .map(|r| r.label.as_str())
        .collect::<HashSet<_>>()
        .len();

    let (severity, message) = if total == 0.0 {
        (
            Severity::Warning,
            "No expenses detected. Be sure you are logging all regular outflows.",
        )
    } else if categories <= 2 {
        (
            Severity::Warning,
            "Your spending is concentrated in a few categories. Ensure key expenses are not being missed.",
        )
    } else if categories > 6 {
        (
            Severity::Warning,
            "Highly diversified outflows—review categories for unnecessary or duplicate expenses.",
        )
    } else {
        (Severity::Neutral, "Your expense structure appears balanced.")
    };

    // Urgency tracks how much data there is to reason about, not the
    // message branch: sparse logs are the most suspect.
    let warning_level = if records.len() < 3 {
        60
    } else if records.len() > 10 {
        20
    } else {
        35
    };

    InsightReport {
        category: InsightCategory::Outflow,
        severity,
        warning_level,
        message: message.to_string(),
    }
}

impl Insight for OutflowInsight {
    fn category(&self) -> InsightCategory {
        InsightCategory::Outflow
    }

    fn name(&self) -> &'static str {
        "Outflow Structure"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<InsightReport> {
        // An empty set is a legitimate state here and scores as "no
        // expenses detected" rather than erroring.
        let records = ctx.db.list_records(ctx.profile_id, Some(Category::Outflow))?;
        Ok(score_outflows(&records))
    }
}

//! Aggregate totals over finance records

use serde::Serialize;

use crate::currency::convert;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Category, Currency, FinanceRecord};
use crate::ratios::{calculate_ratios, FinancialRatios, PositionTotals};

/// A converted total plus the records it was computed from
///
/// Carrying the fetched records lets callers reuse one query for both the
/// total and record-level facts like the stream count.
#[derive(Debug, Clone)]
pub struct AggregateTotal {
    pub total: f64,
    pub records: Vec<FinanceRecord>,
}

/// Sum a record set in the target currency
///
/// Each amount is converted individually. An empty slice totals 0.0.
pub fn collate_total(records: &[FinanceRecord], target: Currency) -> f64 {
    records
        .iter()
        .map(|r| convert(r.amount, r.currency, target))
        .sum()
}

/// Fetch one category for a profile and total it in the target currency
///
/// An empty category is an `InsufficientData` error here, for callers that
/// cannot score without data. Callers for which empty is an ordinary state
/// (the summary) list and collate directly instead.
pub fn category_total(
    db: &Database,
    profile_id: i64,
    category: Category,
    target: Currency,
) -> Result<AggregateTotal> {
    let records = db.list_records(profile_id, Some(category))?;
    if records.is_empty() {
        return Err(Error::InsufficientData(format!(
            "no {} records to aggregate",
            category
        )));
    }

    let total = collate_total(&records, target);
    Ok(AggregateTotal { total, records })
}

/// Position totals and derived ratios for one profile, in one currency
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub currency: Currency,
    pub inflow_total: f64,
    pub outflow_total: f64,
    pub asset_total: f64,
    pub liability_total: f64,
    pub record_count: usize,
    pub ratios: FinancialRatios,
}

/// Build the dashboard summary for a profile
///
/// Empty categories contribute 0.0; a brand-new profile summarizes cleanly
/// to zeros rather than erroring.
pub fn build_summary(
    db: &Database,
    profile_id: i64,
    currency: Currency,
) -> Result<FinancialSummary> {
    let inflows = db.list_records(profile_id, Some(Category::Inflow))?;
    let outflows = db.list_records(profile_id, Some(Category::Outflow))?;
    let assets = db.list_records(profile_id, Some(Category::Asset))?;
    let liabilities = db.list_records(profile_id, Some(Category::Liability))?;

    let record_count = inflows.len() + outflows.len() + assets.len() + liabilities.len();
    let totals = PositionTotals {
        inflow: collate_total(&inflows, currency),
        outflow: collate_total(&outflows, currency),
        assets: collate_total(&assets, currency),
        liabilities: collate_total(&liabilities, currency),
    };

    Ok(FinancialSummary {
        currency,
        inflow_total: totals.inflow,
        outflow_total: totals.outflow,
        asset_total: totals.assets,
        liability_total: totals.liabilities,
        record_count,
        ratios: calculate_ratios(&totals),
    })
}

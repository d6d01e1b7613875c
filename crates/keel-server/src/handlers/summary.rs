//! Summary handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use keel_core::models::Currency;
use keel_core::stats::{build_summary, FinancialSummary};

/// Query parameters for the summary
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Reporting currency override (defaults to the profile currency)
    pub currency: Option<String>,
}

/// GET /api/profiles/:id/summary - Totals and ratios for a profile
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<FinancialSummary>, AppError> {
    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    let currency: Currency = match params.currency.as_deref() {
        Some(code) => code
            .parse()
            .map_err(|_| AppError::bad_request(&format!("Unknown currency: {}", code)))?,
        None => profile.currency,
    };

    let summary = build_summary(&state.db, id, currency)?;
    Ok(Json(summary))
}

//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use keel_core::insights::{AnalysisContext, InsightCategory, InsightEngine, InsightReport};

/// GET /api/profiles/:id/insights - All computable reports
///
/// Analyzers without enough data to score are skipped rather than
/// failing the whole response.
pub async fn list_insights(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<InsightReport>>, AppError> {
    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    let engine = InsightEngine::new();
    let ctx = AnalysisContext::new(&state.db, id, profile.currency);
    let reports = engine.analyze_all(&ctx)?;

    Ok(Json(reports))
}

/// GET /api/profiles/:id/insights/:category - One category's report
///
/// Returns 422 when the category has too little data to score.
pub async fn get_category_insight(
    State(state): State<Arc<AppState>>,
    Path((id, category)): Path<(i64, String)>,
) -> Result<Json<InsightReport>, AppError> {
    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    let insight_category: InsightCategory = category
        .parse()
        .map_err(|_| AppError::bad_request(&format!("Unknown insight category: {}", category)))?;

    let engine = InsightEngine::new();
    let ctx = AnalysisContext::new(&state.db, id, profile.currency);
    let report = engine.analyze_category(&ctx, insight_category)?;

    Ok(Json(report))
}

//! Finance record handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{get_user, AppError, AppState, SuccessResponse};
use keel_core::models::{Category, Currency, FinanceRecord, NewFinanceRecord, RecordSource};

/// Query parameters for listing records
#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    /// Filter by category (inflow, outflow, asset, liability)
    pub category: Option<String>,
}

/// Request body for adding a single record
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub category: String,
    pub label: String,
    pub amount: f64,
    pub currency: Option<String>,
}

/// Request body for editing a record
#[derive(Debug, Deserialize)]
pub struct UpdateRecordRequest {
    pub label: Option<String>,
    pub amount: Option<f64>,
}

/// One row of the entry form
#[derive(Debug, Deserialize)]
pub struct BatchRow {
    pub label: String,
    #[serde(default)]
    pub amount: f64,
}

/// Request body mirroring the four-column entry form
#[derive(Debug, Default, Deserialize)]
pub struct BatchRecordsRequest {
    #[serde(default)]
    pub inflows: Vec<BatchRow>,
    #[serde(default)]
    pub outflows: Vec<BatchRow>,
    #[serde(default)]
    pub assets: Vec<BatchRow>,
    #[serde(default)]
    pub liabilities: Vec<BatchRow>,
}

/// Response for the batch insert
#[derive(Serialize)]
pub struct BatchInsertResponse {
    pub inserted: usize,
}

/// GET /api/profiles/:id/records - List records for a profile
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<RecordsQuery>,
) -> Result<Json<Vec<FinanceRecord>>, AppError> {
    // Verify profile exists
    state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    let category: Option<Category> = match params.category.as_deref() {
        Some(s) => Some(
            s.parse()
                .map_err(|_| AppError::bad_request(&format!("Unknown category: {}", s)))?,
        ),
        None => None,
    };

    let records = state.db.list_records(id, category)?;
    Ok(Json(records))
}

/// POST /api/profiles/:id/records - Add one record
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<FinanceRecord>, AppError> {
    let user = get_user(request.headers());

    // Verify profile exists (also supplies the fallback currency)
    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    let bytes = axum::body::to_bytes(request.into_body(), 1024 * 10)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    let req: CreateRecordRequest =
        serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))?;

    let category: Category = req
        .category
        .parse()
        .map_err(|_| AppError::bad_request(&format!("Unknown category: {}", req.category)))?;

    let label = req.label.trim();
    if label.is_empty() {
        return Err(AppError::bad_request("Label must not be empty"));
    }

    let currency: Currency = match req.currency.as_deref() {
        Some(code) => code
            .parse()
            .map_err(|_| AppError::bad_request(&format!("Unknown currency: {}", code)))?,
        None => profile.currency,
    };

    let record_id = state
        .db
        .insert_record(
            id,
            &NewFinanceRecord {
                category,
                label: label.to_string(),
                amount: req.amount,
                currency,
                source: RecordSource::Manual,
                import_hash: None,
            },
        )?
        .ok_or_else(|| AppError::internal("Record not inserted"))?;

    state.db.log_audit(
        &user,
        "create",
        Some("record"),
        Some(record_id),
        Some(&format!("category={}, label={}", category, label)),
    )?;

    let record = state
        .db
        .get_record(record_id)?
        .ok_or_else(|| AppError::internal("Record not found after creation"))?;

    Ok(Json(record))
}

/// POST /api/profiles/:id/records/batch - Insert the entry form in one call
///
/// Fully blank rows (no label, zero amount) are form padding and dropped.
pub async fn create_records_batch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<BatchInsertResponse>, AppError> {
    let user = get_user(request.headers());

    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    let bytes = axum::body::to_bytes(request.into_body(), 1024 * 64)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    let req: BatchRecordsRequest =
        serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))?;

    let mut rows: Vec<(Category, BatchRow)> = Vec::new();
    for (category, group) in [
        (Category::Inflow, req.inflows),
        (Category::Outflow, req.outflows),
        (Category::Asset, req.assets),
        (Category::Liability, req.liabilities),
    ] {
        for row in group {
            if row.label.trim().is_empty() && row.amount == 0.0 {
                continue;
            }
            rows.push((category, row));
        }
    }

    if rows.is_empty() {
        return Err(AppError::bad_request("no valid finance entries to insert"));
    }

    let mut inserted = 0;
    for (category, row) in rows {
        if state
            .db
            .insert_record(
                id,
                &NewFinanceRecord {
                    category,
                    label: row.label.trim().to_string(),
                    amount: row.amount,
                    currency: profile.currency,
                    source: RecordSource::Manual,
                    import_hash: None,
                },
            )?
            .is_some()
        {
            inserted += 1;
        }
    }

    state.db.log_audit(
        &user,
        "batch_insert",
        Some("record"),
        None,
        Some(&format!("profile={}, count={}", id, inserted)),
    )?;

    Ok(Json(BatchInsertResponse { inserted }))
}

/// PUT /api/records/:id - Edit a record's label and/or amount
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = get_user(request.headers());

    // Verify record exists
    state
        .db
        .get_record(id)?
        .ok_or_else(|| AppError::not_found(&format!("Record {} not found", id)))?;

    let bytes = axum::body::to_bytes(request.into_body(), 1024 * 10)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    let req: UpdateRecordRequest =
        serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))?;

    if req.label.is_none() && req.amount.is_none() {
        return Err(AppError::bad_request("No fields to update"));
    }

    state
        .db
        .update_record(id, req.label.as_deref(), req.amount)?;

    state.db.log_audit(
        &user,
        "update",
        Some("record"),
        Some(id),
        Some(&format!(
            "label={:?}, amount={:?}",
            req.label, req.amount
        )),
    )?;

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/records/:id - Delete a record
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = get_user(request.headers());

    // Verify record exists
    let record = state
        .db
        .get_record(id)?
        .ok_or_else(|| AppError::not_found(&format!("Record {} not found", id)))?;

    state.db.delete_record(id)?;

    state.db.log_audit(
        &user,
        "delete",
        Some("record"),
        Some(id),
        Some(&format!("category={}, label={}", record.category, record.label)),
    )?;

    Ok(Json(SuccessResponse { success: true }))
}

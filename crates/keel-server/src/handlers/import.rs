//! CSV import handler

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};

use crate::{get_user, AppError, AppState, MAX_UPLOAD_SIZE};
use keel_core::import::{import_records, ImportSummary};

/// POST /api/profiles/:id/import - Import records from CSV
///
/// Expects multipart form with:
/// - file: CSV file (required, max 2MB)
pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, AppError> {
    let user = get_user(&headers);

    // Verify profile exists (also supplies the fallback currency)
    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    let mut file_data: Option<Vec<u8>> = None;
    let mut total_size: usize = 0;

    // Extract fields from multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Failed to read form field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::bad_request("Failed to read file data"))?;
            total_size += bytes.len();

            // Check file size limit
            if total_size > MAX_UPLOAD_SIZE {
                return Err(AppError::bad_request(&format!(
                    "File too large. Maximum size is {} MB",
                    MAX_UPLOAD_SIZE / 1024 / 1024
                )));
            }

            file_data = Some(bytes.to_vec());
        }
    }

    let file_data = file_data.ok_or_else(|| AppError::bad_request("Missing file field"))?;

    let summary = import_records(&state.db, id, file_data.as_slice(), profile.currency)?;

    // Audit log
    state.db.log_audit(
        &user,
        "import",
        Some("record"),
        None,
        Some(&format!(
            "profile={}, imported={}, skipped={}",
            id, summary.imported, summary.skipped
        )),
    )?;

    Ok(Json(summary))
}

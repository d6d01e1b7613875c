//! Profile management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{get_user, AppError, AppState, SuccessResponse};
use keel_core::models::{Currency, NewProfile, Profile};

/// Request body for onboarding a profile
#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub username: String,
    pub display_name: Option<String>,
    pub currency: Option<String>,
}

/// Request body for updating a profile
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub currency: Option<String>,
}

/// Query parameters for the availability check
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub username: String,
}

/// Response for the availability check
#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// GET /api/profiles - List all profiles
pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let profiles = state.db.list_profiles()?;
    Ok(Json(profiles))
}

/// POST /api/profiles - Onboard a new profile
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Profile>, AppError> {
    let user = get_user(request.headers());

    // Extract JSON body
    let bytes = axum::body::to_bytes(request.into_body(), 1024 * 10)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    let req: CreateProfileRequest =
        serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))?;

    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request("Username must not be empty"));
    }

    let currency: Currency = match req.currency.as_deref() {
        Some(code) => code
            .parse()
            .map_err(|_| AppError::bad_request(&format!("Unknown currency: {}", code)))?,
        None => Currency::Usd,
    };

    let profile_id = state.db.create_profile(&NewProfile {
        username: username.to_string(),
        display_name: req.display_name.clone(),
        currency,
    })?;

    // Audit log
    state.db.log_audit(
        &user,
        "onboard",
        Some("profile"),
        Some(profile_id),
        Some(&format!("username={}", username)),
    )?;

    let profile = state
        .db
        .get_profile(profile_id)?
        .ok_or_else(|| AppError::internal("Profile not found after creation"))?;

    Ok(Json(profile))
}

/// GET /api/profiles/availability - Check whether a username is free
pub async fn check_username_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let available = state.db.username_available(params.username.trim())?;
    Ok(Json(AvailabilityResponse { available }))
}

/// GET /api/profiles/:id - Get a single profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    Ok(Json(profile))
}

/// PUT /api/profiles/:id - Update display name and/or currency
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Profile>, AppError> {
    let user = get_user(request.headers());

    // Verify profile exists
    state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    let bytes = axum::body::to_bytes(request.into_body(), 1024 * 10)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    let req: UpdateProfileRequest =
        serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))?;

    let currency: Option<Currency> = match req.currency.as_deref() {
        Some(code) => Some(
            code.parse()
                .map_err(|_| AppError::bad_request(&format!("Unknown currency: {}", code)))?,
        ),
        None => None,
    };

    if req.display_name.is_none() && currency.is_none() {
        return Err(AppError::bad_request("No fields to update"));
    }

    state
        .db
        .update_profile(id, req.display_name.as_deref(), currency)?;

    state.db.log_audit(
        &user,
        "update",
        Some("profile"),
        Some(id),
        Some(&format!(
            "display_name={:?}, currency={:?}",
            req.display_name, req.currency
        )),
    )?;

    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::internal("Profile not found after update"))?;

    Ok(Json(profile))
}

/// DELETE /api/profiles/:id - Delete a profile and its records
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = get_user(request.headers());

    // Verify profile exists
    let profile = state
        .db
        .get_profile(id)?
        .ok_or_else(|| AppError::not_found(&format!("Profile {} not found", id)))?;

    state.db.delete_profile(id)?;

    state.db.log_audit(
        &user,
        "delete",
        Some("profile"),
        Some(id),
        Some(&format!("username={}", profile.username)),
    )?;

    Ok(Json(SuccessResponse { success: true }))
}

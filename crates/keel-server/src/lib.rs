//! Keel Web Server
//!
//! Axum-based REST API for the Keel personal finance tracker.
//!
//! Security features:
//! - API key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Input validation (pagination limits, upload size limits)
//! - Audit logging for all mutating API access
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use keel_core::db::Database;

mod handlers;

/// Maximum CSV upload size (2 MB)
pub const MAX_UPLOAD_SIZE: usize = 2 * 1024 * 1024;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as "Bearer <key>" in the Authorization header
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// Authentication middleware - validates Bearer API keys
///
/// API keys are compared using constant-time comparison to prevent
/// timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        info!(user = "api-key", path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate an API key against the configured keys using constant-time comparison
/// to prevent timing attacks.
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    for key in valid_keys {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        if provided_bytes.len() == key_bytes.len() {
            if provided_bytes.ct_eq(key_bytes).into() {
                return true;
            }
        }
    }
    false
}

/// Extract the acting identity from request headers (for audit logging)
/// Returns "api-key" for API key auth, or "local-dev" for unauthenticated
pub fn get_user(headers: &axum::http::HeaderMap) -> String {
    if headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .is_some()
    {
        return "api-key".to_string();
    }

    "local-dev".to_string()
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    let api_routes = Router::new()
        // Profiles
        .route(
            "/profiles",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route(
            "/profiles/availability",
            get(handlers::check_username_availability),
        )
        .route(
            "/profiles/:id",
            get(handlers::get_profile)
                .put(handlers::update_profile)
                .delete(handlers::delete_profile),
        )
        // Finance records
        .route(
            "/profiles/:id/records",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route(
            "/profiles/:id/records/batch",
            post(handlers::create_records_batch),
        )
        .route(
            "/records/:id",
            put(handlers::update_record).delete(handlers::delete_record),
        )
        // Import
        .route("/profiles/:id/import", post(handlers::import_csv))
        // Insights
        .route("/profiles/:id/insights", get(handlers::list_insights))
        .route(
            "/profiles/:id/insights/:category",
            get(handlers::get_category_insight),
        )
        // Summary
        .route("/profiles/:id/summary", get(handlers::get_summary))
        // Audit log
        .route("/audit", get(handlers::list_audit_log));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    // Security headers
    // CSP: restrict scripts to same-origin, allow inline styles for the bundled UI
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' blob: data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unprocessable(msg: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<keel_core::Error> for AppError {
    fn from(err: keel_core::Error) -> Self {
        use keel_core::Error as CoreError;

        let status = match &err {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::InvalidData(_) | CoreError::Import(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            Self {
                status,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(err.into()),
            }
        } else {
            Self {
                status,
                message: err.to_string(),
                internal: None,
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred".to_string(),
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;

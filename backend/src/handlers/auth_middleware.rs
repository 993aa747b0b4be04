use std::sync::Arc;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{error::ApiError, AppState};

// Admin routes are closed entirely when no ADMIN_API_TOKEN is configured
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.admin_api_token.as_deref() else {
        return Err(ApiError::Forbidden("Admin access is disabled".to_string()));
    };

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("No authorization token provided".to_string()))?;

    if token != expected {
        warn!("Rejected admin request with invalid token");
        return Err(ApiError::Unauthorized("Invalid token".to_string()));
    }

    Ok(next.run(request).await)
}

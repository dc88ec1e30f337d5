use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims, Role};
use crate::error::ApiError;
use crate::state::AppState;

use super::is_public_path;

/// Authenticated principal derived from a verified token. Attached to the
/// request as an extension for the lifetime of that request only.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { username: claims.sub, role: claims.rol }
    }
}

/// Request gate. Allow-listed paths pass through untouched; every other
/// request must carry `Authorization: Bearer <token>` with a currently valid
/// token or is rejected with 401 before any handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::verify_token(&state.keys, token)
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    tracing::debug!("Token accepted for user {} ({})", claims.sub, claims.rol);
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get("authorization")
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token),
        Some(_) => Err("Empty bearer token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}

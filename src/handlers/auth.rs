//! POST /auth/login - credential check and token issuance

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{self, password, Role};
use crate::config;
use crate::database::repository;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: String,
    pub expires_in: u64,
}

/// Either failure path (unknown user, wrong password) reports the same
/// generic 401 so the response does not reveal which check failed.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = repository::users::find_by_username(&state.pool, &req.username).await?;

    let user = match user {
        Some(user) => user,
        None => {
            password::verify_dummy(&req.password);
            return Err(ApiError::unauthorized("Invalid credentials"));
        }
    };

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let role: Role = user.role.parse().map_err(|_| {
        tracing::error!("User {} has unknown role '{}'", user.username, user.role);
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;

    let token = auth::issue_token(&state.keys, &user.username, role).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;

    tracing::info!("User {} logged in ({})", user.username, role);

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        role: role.to_string(),
        expires_in: config::config().security.jwt_expiry_hours * 3600,
    }))
}

//! Admin login handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::extractors::auth::mint_token;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// POST /api/v1/auth/login - Exchange admin credentials for an API token.
///
/// The token is returned once in plaintext; only its SHA-256 hash is
/// stored. 401 on wrong credentials, 500 when none are configured.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    state.admin.verify(&body.username, &body.password)?;

    let token = mint_token(&state.db_pool).await?;
    tracing::info!(username = %body.username, "admin login succeeded");

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

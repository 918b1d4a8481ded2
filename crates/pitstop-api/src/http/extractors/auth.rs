//! Admin token authentication extractor.
//!
//! Extracts and verifies admin tokens from:
//! - `Authorization: Bearer <token>` header
//! - `X-API-Key: <token>` header
//!
//! Tokens are minted by `POST /api/v1/auth/login`, SHA-256 hashed, and
//! compared against the `admin_tokens` table.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::Row;

use pitstop_infra::sqlite::pool::DatabasePool;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated request marker. Extracting this validates the admin token.
pub struct Authenticated;

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;

        if verify_token(&state.db_pool, &token).await? {
            Ok(Authenticated)
        } else {
            Err(AppError::Unauthorized(
                "Invalid admin token. Log in via POST /api/v1/auth/login and pass the token via 'Authorization: Bearer <token>' or 'X-API-Key: <token>'.".to_string(),
            ))
        }
    }
}

/// Extract the admin token from request headers.
fn extract_token(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <token>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    // Try X-API-Key header
    if let Some(token) = parts.headers.get("x-api-key") {
        let token_str = token.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-API-Key header encoding".to_string())
        })?;
        return Ok(token_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing admin token. Provide via 'Authorization: Bearer <token>' or 'X-API-Key: <token>' header.".to_string(),
    ))
}

/// Compute the SHA-256 hash of a token (lowercase hex).
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{digest:x}")
}

/// Check a token against the `admin_tokens` table.
///
/// Updates `last_used_at` on a match (best effort, never fails the request).
pub async fn verify_token(pool: &DatabasePool, token: &str) -> Result<bool, AppError> {
    let token_hash = hash_token(token);

    let result = sqlx::query("SELECT id FROM admin_tokens WHERE token_hash = ?")
        .bind(&token_hash)
        .fetch_optional(&pool.reader)
        .await
        .map_err(|e| AppError::Internal(format!("Database error: {e}")))?;

    match result {
        Some(row) => {
            let id: String = row.get("id");
            let now = chrono::Utc::now().to_rfc3339();
            let _ = sqlx::query("UPDATE admin_tokens SET last_used_at = ? WHERE id = ?")
                .bind(&now)
                .bind(&id)
                .execute(&pool.writer)
                .await;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Mint a new admin token and store its hash.
///
/// Returns the plaintext token (shown to the caller once).
pub async fn mint_token(pool: &DatabasePool) -> Result<String, AppError> {
    let mut token_bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut token_bytes);
    let token = format!(
        "pit_{}",
        token_bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>()
    );

    let token_hash = hash_token(&token);
    let id = uuid::Uuid::now_v7().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO admin_tokens (id, token_hash, created_at) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&token_hash)
        .bind(&now)
        .execute(&pool.writer)
        .await
        .map_err(|e| AppError::Internal(format!("Database error: {e}")))?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let hash = hash_token("pit_abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("pit_abc"));
        assert_ne!(hash, hash_token("pit_abd"));
    }

    #[tokio::test]
    async fn test_minted_token_verifies() {
        let (_dir, pool) = test_pool().await;

        let token = mint_token(&pool).await.unwrap();
        assert!(token.starts_with("pit_"));
        assert!(verify_token(&pool, &token).await.unwrap());
        assert!(!verify_token(&pool, "pit_forged").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_updates_last_used_at() {
        let (_dir, pool) = test_pool().await;

        let token = mint_token(&pool).await.unwrap();
        assert!(verify_token(&pool, &token).await.unwrap());

        let (last_used_at,): (Option<String>,) =
            sqlx::query_as("SELECT last_used_at FROM admin_tokens")
                .fetch_one(&pool.reader)
                .await
                .unwrap();
        assert!(last_used_at.is_some());
    }
}

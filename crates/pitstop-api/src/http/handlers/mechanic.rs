//! Mechanic CRUD handlers for the REST API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use pitstop_core::repository::mechanic::MechanicRepository;
use pitstop_types::mechanic::{CreateMechanicRequest, Mechanic};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// GET /api/v1/mechanics - List the roster, ordered by name.
pub async fn list_mechanics(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<Mechanic>>, AppError> {
    let mechanics = state.mechanics.list().await?;
    Ok(Json(mechanics))
}

/// POST /api/v1/mechanics - Add a mechanic.
pub async fn create_mechanic(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<CreateMechanicRequest>,
) -> Result<(StatusCode, Json<Mechanic>), AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("mechanic name is required".to_string()));
    }

    let mechanic = state.mechanics.create(name).await?;
    Ok((StatusCode::CREATED, Json(mechanic)))
}

/// DELETE /api/v1/mechanics/:id - Remove a mechanic. 404 when absent.
pub async fn delete_mechanic(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.mechanics.delete(id).await?;
    Ok(Json(json!({"message": "mechanic deleted"})))
}

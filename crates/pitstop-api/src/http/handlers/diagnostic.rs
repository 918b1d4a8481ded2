//! Diagnostic CRUD handlers for the REST API.
//!
//! The webhook is the main producer of diagnostics; these endpoints
//! serve the admin panel (listing, manual entry, cleanup).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use pitstop_core::repository::diagnostic::DiagnosticRepository;
use pitstop_types::diagnostic::{Diagnostic, DiagnosticDraft, DiagnosticType};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// Default page size when the client does not pass `limit`.
const DEFAULT_LIST_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiagnosticRequest {
    pub mechanic: String,
    pub car_number: String,
    pub mileage: i64,
    pub diagnostic_type: DiagnosticType,
}

/// GET /api/v1/diagnostics - List records, newest first.
pub async fn list_diagnostics(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Diagnostic>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(1);
    let diagnostics = state.diagnostics.list(limit).await?;
    Ok(Json(diagnostics))
}

/// GET /api/v1/diagnostics/:id - Get one record. 404 when absent.
pub async fn get_diagnostic(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<i64>,
) -> Result<Json<Diagnostic>, AppError> {
    let diagnostic = state
        .diagnostics
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("diagnostic {id} not found")))?;
    Ok(Json(diagnostic))
}

/// POST /api/v1/diagnostics - Create a record manually.
pub async fn create_diagnostic(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<CreateDiagnosticRequest>,
) -> Result<(StatusCode, Json<Diagnostic>), AppError> {
    let mechanic = body.mechanic.trim();
    let car_number = body.car_number.trim();
    if mechanic.is_empty() || car_number.is_empty() {
        return Err(AppError::Validation(
            "mechanic and carNumber are required".to_string(),
        ));
    }
    if body.mileage <= 0 {
        return Err(AppError::Validation("mileage must be positive".to_string()));
    }

    let draft = DiagnosticDraft {
        mechanic: mechanic.to_string(),
        car_number: car_number.to_string(),
        mileage: body.mileage,
        diagnostic_type: body.diagnostic_type,
    };
    let diagnostic = state.diagnostics.save(&draft).await?;
    Ok((StatusCode::CREATED, Json(diagnostic)))
}

/// DELETE /api/v1/diagnostics/:id - Remove a record. 404 when absent.
pub async fn delete_diagnostic(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.diagnostics.delete(id).await?;
    Ok(Json(json!({"message": "diagnostic deleted"})))
}

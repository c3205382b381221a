//! # DDD Handlers
//!
//! Read-only gateway surface for Direct Distance Dialing codes.

use crate::web::errors::ApiError;
use crate::web::response_types::ResultEnvelope;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// GET /api/v1/ddd
pub async fn get_all(State(state): State<AppState>) -> Result<Response, ApiError> {
    let codes = state
        .ddd
        .get_all()
        .await
        .map_err(|e| ApiError::from_gateway(e, "02X01"))?;

    Ok(Json(ResultEnvelope::ok(codes)).into_response())
}

/// GET /api/v1/ddd/{id} - 204 when absent
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let ddd = state
        .ddd
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_gateway(e, "02X02"))?;

    Ok(match ddd {
        Some(ddd) => Json(ResultEnvelope::ok(ddd)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

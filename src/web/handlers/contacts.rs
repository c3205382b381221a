//! # Contact Handlers
//!
//! Inbound gateway surface for contacts. Reads answer from the orchestrator
//! (204 for absence); writes validate the payload, then return 202 Accepted
//! with the published command echoed - the mutation itself is applied
//! asynchronously by a downstream consumer.

use crate::web::errors::ApiError;
use crate::web::response_types::ResultEnvelope;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn phone_pattern() -> &'static Regex {
    PHONE_PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4,5}-[0-9]{4}$").expect("phone pattern is valid")
    })
}

/// Inbound contact payload for creates and edits
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub ddd_id: i32,
}

impl ContactPayload {
    /// Check every field rule, returning one message per violation
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.is_empty() || self.name.chars().count() > 100 {
            errors.push("Name field must contain between 1 and 100 characters".to_string());
        }

        if !phone_pattern().is_match(&self.phone) {
            errors.push("Phone field is not a valid phone number".to_string());
        }

        if !is_plausible_email(&self.email) {
            errors.push("Email field is not a valid email".to_string());
        }

        if !(11..=99).contains(&self.ddd_id) {
            errors.push("DDD Id field must contain a value between 11 and 99".to_string());
        }

        errors
    }
}

fn is_plausible_email(email: &str) -> bool {
    let len = email.chars().count();
    if !(3..=255).contains(&len) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.starts_with('.')
        }
        None => false,
    }
}

/// GET /api/v1/contacts
pub async fn get_all(State(state): State<AppState>) -> Result<Response, ApiError> {
    let contacts = state
        .contacts
        .get_all()
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X01"))?;

    Ok(Json(ResultEnvelope::ok(contacts)).into_response())
}

/// GET /api/v1/contacts/{id} - 204 when absent
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let contact = state
        .contacts
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X02"))?;

    Ok(match contact {
        Some(contact) => Json(ResultEnvelope::ok(contact)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /api/v1/contacts/ddd-code/{id} - cached, DDD-validated
pub async fn get_all_by_ddd(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let contacts = state
        .contacts
        .get_all_by_ddd(id)
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X03"))?;

    Ok(Json(ResultEnvelope::ok(contacts)).into_response())
}

/// GET /api/v1/contacts/persistence-error-test/{fail}
///
/// Diagnostic passthrough that exercises the circuit breaker against the
/// backend's forced-failure endpoint.
pub async fn resilience_test(
    State(state): State<AppState>,
    Path(fail): Path<bool>,
) -> Result<Response, ApiError> {
    let body = state
        .contacts
        .resilience_test(fail)
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X04"))?;

    Ok(Json(ResultEnvelope::ok(body)).into_response())
}

/// POST /api/v1/contacts - 202 Accepted with the published command
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<Response, ApiError> {
    let violations = payload.validate();
    if !violations.is_empty() {
        return Err(ApiError::BadRequest {
            messages: violations,
        });
    }

    let command = state
        .contacts
        .create(payload.name, payload.phone, payload.email, payload.ddd_id)
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X05"))?;

    Ok((StatusCode::ACCEPTED, Json(ResultEnvelope::ok(command))).into_response())
}

/// PUT /api/v1/contacts/{id} - 202 Accepted; 400 for an unknown contact id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ContactPayload>,
) -> Result<Response, ApiError> {
    let violations = payload.validate();
    if !violations.is_empty() {
        return Err(ApiError::BadRequest {
            messages: violations,
        });
    }

    let existing = state
        .contacts
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X07"))?;
    let Some(existing) = existing else {
        return Err(ApiError::bad_request("01X06 - Invalid contact id"));
    };

    let command = state
        .contacts
        .edit(
            existing.id,
            payload.name,
            payload.phone,
            payload.email,
            payload.ddd_id,
        )
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X07"))?;

    Ok((StatusCode::ACCEPTED, Json(ResultEnvelope::ok(command))).into_response())
}

/// DELETE /api/v1/contacts/{id} - 204; 400 for an unknown contact id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let existing = state
        .contacts
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X09"))?;
    let Some(existing) = existing else {
        return Err(ApiError::bad_request("01X08 - Invalid contact id"));
    };

    state
        .contacts
        .delete(existing.id)
        .await
        .map_err(|e| ApiError::from_gateway(e, "01X09"))?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

//! # Web API Error Types
//!
//! Maps the gateway error taxonomy onto HTTP responses in the `{data,
//! errors}` envelope. Handlers attach a positional code (`01X01`, `01X02`,
//! ...) to server-side failures so log lines and payloads identify where an
//! error was generated.

use crate::error::GatewayError;
use crate::web::response_types::ResultEnvelope;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

/// Web API errors with HTTP status mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request")]
    BadRequest { messages: Vec<String> },

    #[error("Service temporarily unavailable")]
    ServiceUnavailable { message: String },

    #[error("Internal server error")]
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            messages: vec![message.into()],
        }
    }

    /// Map a gateway failure to its HTTP shape, tagging server-side failures
    /// with the handler's positional code.
    ///
    /// Validation failures keep their own message (client-caused, 400).
    /// A breaker rejection is 503: the backend is unreachable by policy,
    /// which is distinct from the backend having failed.
    pub fn from_gateway(err: GatewayError, code: &str) -> Self {
        match err {
            GatewayError::Validation { message } => {
                warn!(code = %code, message = %message, "Request rejected by validation");
                Self::BadRequest {
                    messages: vec![message],
                }
            }
            GatewayError::CircuitOpen { component } => {
                warn!(code = %code, component = %component, "Request rejected: circuit open");
                Self::ServiceUnavailable {
                    message: format!("{code} - Service temporarily unavailable"),
                }
            }
            other => {
                error!(code = %code, error = %other, "Request failed");
                Self::Internal {
                    message: format!("{code} - Internal server error"),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            ApiError::BadRequest { messages } => (
                StatusCode::BAD_REQUEST,
                ResultEnvelope::<()>::from_errors(messages),
            ),
            ApiError::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ResultEnvelope::<()>::error(message),
            ),
            ApiError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ResultEnvelope::<()>::error(message),
            ),
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_become_bad_requests_with_their_own_message() {
        let err = GatewayError::validation("Invalid Direct Distance Dialing Id");
        match ApiError::from_gateway(err, "01X03") {
            ApiError::BadRequest { messages } => {
                assert_eq!(messages, vec!["Invalid Direct Distance Dialing Id"]);
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn circuit_open_maps_to_service_unavailable() {
        let err = GatewayError::circuit_open("persistence-api");
        assert!(matches!(
            ApiError::from_gateway(err, "01X01"),
            ApiError::ServiceUnavailable { .. }
        ));
    }

    #[test]
    fn backend_failures_map_to_coded_internal_errors() {
        let err = GatewayError::backend("contacts", 502);
        match ApiError::from_gateway(err, "01X01") {
            ApiError::Internal { message } => {
                assert_eq!(message, "01X01 - Internal server error");
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}

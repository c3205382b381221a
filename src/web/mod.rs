//! # Web API Module
//!
//! Inbound gateway surface: axum router, shared state, the `{data, errors}`
//! response envelope, and request validation. Thin by design - all failure
//! handling and consistency rules live in the service and client layers.

pub mod errors;
pub mod handlers;
pub mod response_types;
pub mod state;

pub use errors::ApiError;
pub use response_types::ResultEnvelope;
pub use state::AppState;

use axum::routing::{delete, get, post, put};
use axum::Router;

/// Build the gateway router over the shared application state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::basic_health))
        .route("/api/v1/contacts", get(handlers::contacts::get_all))
        .route("/api/v1/contacts", post(handlers::contacts::create))
        .route("/api/v1/contacts/{id}", get(handlers::contacts::get_by_id))
        .route("/api/v1/contacts/{id}", put(handlers::contacts::update))
        .route("/api/v1/contacts/{id}", delete(handlers::contacts::delete))
        .route(
            "/api/v1/contacts/ddd-code/{id}",
            get(handlers::contacts::get_all_by_ddd),
        )
        .route(
            "/api/v1/contacts/persistence-error-test/{fail}",
            get(handlers::contacts::resilience_test),
        )
        .route("/api/v1/ddd", get(handlers::ddd::get_all))
        .route("/api/v1/ddd/{id}", get(handlers::ddd::get_by_id))
        .with_state(state)
}

//! Gateway server entry point: wire configuration, the circuit-broken
//! persistence clients, the broker publisher, and the HTTP surface.

use anyhow::Context;
use contact_gateway::client::{ContactClient, DddClient, ReqwestBackend};
use contact_gateway::config::GatewayConfig;
use contact_gateway::logging::init_structured_logging;
use contact_gateway::messaging::PgmqCommandPublisher;
use contact_gateway::resilience::CircuitBreaker;
use contact_gateway::services::{ContactService, DddService};
use contact_gateway::web::{self, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_structured_logging();

    let config = GatewayConfig::load().context("loading gateway configuration")?;
    info!(
        backend = %config.backend.base_url,
        bind = %config.web.bind_address,
        "🚀 Starting contact gateway"
    );

    let backend = Arc::new(
        ReqwestBackend::new(&config.backend.base_url, config.backend.request_timeout())
            .context("building persistence API backend")?,
    );

    // One breaker shared by every client of the persistence API
    let breaker = Arc::new(CircuitBreaker::new(
        "persistence-api",
        config.circuit_breaker.settings(),
    ));

    let publisher = Arc::new(
        PgmqCommandPublisher::connect(
            &config.broker.broker_url(),
            config.broker.broadcast_queues.clone(),
        )
        .await
        .context("connecting command publisher to broker")?,
    );

    let contact_service = ContactService::new(
        ContactClient::new(backend.clone(), breaker.clone()),
        DddClient::new(backend.clone(), breaker.clone()),
        publisher,
        config.cache.contacts_by_ddd_ttl(),
    );
    let ddd_service = DddService::new(DddClient::new(backend, breaker));

    let app = web::router(AppState::new(contact_service, ddd_service));

    let listener = tokio::net::TcpListener::bind(&config.web.bind_address)
        .await
        .with_context(|| format!("binding {}", config.web.bind_address))?;
    info!(bind = %config.web.bind_address, "✅ Gateway listening");

    axum::serve(listener, app).await.context("serving gateway")?;
    Ok(())
}

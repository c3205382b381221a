//! # DDD Resource Client
//!
//! Persistence-API client for the `ddd` resource. Adds no resource-specific
//! lookups; it is the generic CRUD set over the DDD collection.

use crate::client::http::HttpBackend;
use crate::client::resource::ResourceClient;
use crate::error::GatewayResult;
use crate::models::DirectDistanceDialing;
use crate::resilience::CircuitBreaker;
use std::sync::Arc;

/// Persistence-API client for the `ddd` resource
pub struct DddClient {
    resource: ResourceClient<DirectDistanceDialing>,
}

impl DddClient {
    pub const RESOURCE_PATH: &'static str = "/persistence-api/v1/ddd";

    pub fn new(backend: Arc<dyn HttpBackend>, breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            resource: ResourceClient::new(backend, breaker, Self::RESOURCE_PATH),
        }
    }

    pub async fn list(&self) -> GatewayResult<Vec<DirectDistanceDialing>> {
        self.resource.list().await
    }

    pub async fn get(&self, id: i32) -> GatewayResult<Option<DirectDistanceDialing>> {
        self.resource.get(id).await
    }

    pub async fn create(&self, ddd: &DirectDistanceDialing) -> GatewayResult<()> {
        self.resource.create(ddd).await
    }

    pub async fn update(&self, ddd: &DirectDistanceDialing) -> GatewayResult<()> {
        self.resource.update(ddd).await
    }

    pub async fn delete(&self, ddd: &DirectDistanceDialing) -> GatewayResult<()> {
        self.resource.delete(ddd).await
    }
}

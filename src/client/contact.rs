//! # Contact Resource Client
//!
//! Composes the generic [`ResourceClient`] with the two contact-specific
//! backend lookups: the DDD-filtered list and the deliberate
//! breaker-exercising diagnostic endpoint.

use crate::client::http::HttpBackend;
use crate::client::resource::ResourceClient;
use crate::error::GatewayResult;
use crate::models::Contact;
use crate::resilience::CircuitBreaker;
use reqwest::Method;
use std::sync::Arc;

/// Persistence-API client for the `contacts` resource
pub struct ContactClient {
    resource: ResourceClient<Contact>,
}

impl ContactClient {
    pub const RESOURCE_PATH: &'static str = "/persistence-api/v1/contacts";

    pub fn new(backend: Arc<dyn HttpBackend>, breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            resource: ResourceClient::new(backend, breaker, Self::RESOURCE_PATH),
        }
    }

    pub async fn list(&self) -> GatewayResult<Vec<Contact>> {
        self.resource.list().await
    }

    pub async fn get(&self, id: i32) -> GatewayResult<Option<Contact>> {
        self.resource.get(id).await
    }

    pub async fn create(&self, contact: &Contact) -> GatewayResult<()> {
        self.resource.create(contact).await
    }

    pub async fn update(&self, contact: &Contact) -> GatewayResult<()> {
        self.resource.update(contact).await
    }

    pub async fn delete(&self, contact: &Contact) -> GatewayResult<()> {
        self.resource.delete(contact).await
    }

    /// GET the contacts referencing one DDD code, via the backend's nested
    /// path. An empty body maps to an empty sequence.
    pub async fn list_by_ddd(&self, ddd_id: i32) -> GatewayResult<Vec<Contact>> {
        let path = format!("{}/ddd-code/{ddd_id}", self.resource.path());
        let response = self.resource.send(Method::GET, &path, None).await?;
        self.resource.parse_list(&response)
    }

    /// Diagnostic passthrough to the backend endpoint that can be forced to
    /// fail. A non-success response surfaces as an error so the breaker's
    /// failure count advances; this is a test hook, not business logic.
    pub async fn resilience_test(&self, fail: bool) -> GatewayResult<String> {
        let path = format!("{}/persistence-error-test/{fail}", self.resource.path());
        let response = self.resource.send(Method::GET, &path, None).await?;
        Ok(response.body)
    }
}

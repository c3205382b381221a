//! # Generic Resource Client
//!
//! Uniform CRUD mapping from a typed entity to one REST resource on the
//! persistence API, wrapped by the shared circuit breaker. Built by
//! composition from a resource path and the entity's serde codec; concrete
//! resources compose this client rather than extending a base class.

use crate::client::http::{HttpBackend, RawResponse};
use crate::error::{GatewayError, GatewayResult};
use crate::models::Entity;
use crate::resilience::CircuitBreaker;
use reqwest::Method;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// CRUD client for one REST resource, protected by the shared breaker.
///
/// Every operation goes through [`CircuitBreaker::call`]: non-2xx responses
/// surface as [`GatewayError::Backend`] from inside the protected call, so
/// qualifying statuses advance the breaker's failure count, while a
/// breaker-open condition surfaces as [`GatewayError::CircuitOpen`] without
/// a network attempt.
pub struct ResourceClient<T: Entity> {
    backend: Arc<dyn HttpBackend>,
    breaker: Arc<CircuitBreaker>,
    path: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> ResourceClient<T> {
    /// Create a client for the resource at `path` (e.g.
    /// `/persistence-api/v1/contacts`).
    pub fn new(
        backend: Arc<dyn HttpBackend>,
        breaker: Arc<CircuitBreaker>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            breaker,
            path: path.into(),
            _entity: PhantomData,
        }
    }

    /// The resource collection path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Execute one request through the circuit breaker.
    ///
    /// 2xx responses (204 included) come back as `Ok`; anything else is a
    /// [`GatewayError::Backend`] recorded against the breaker.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> GatewayResult<RawResponse> {
        debug!(method = %method, path = %path, "📡 Persistence API request");

        self.breaker
            .call(|| async {
                let response = self.backend.execute(method.clone(), path, body.clone()).await?;
                if response.is_success() {
                    Ok(response)
                } else {
                    Err(GatewayError::backend(path, response.status))
                }
            })
            .await
    }

    /// Parse a collection body, mapping an empty or absent body to an empty
    /// sequence rather than a null result.
    pub(crate) fn parse_list(&self, response: &RawResponse) -> GatewayResult<Vec<T>> {
        if response.is_no_content() || response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// GET the collection
    pub async fn list(&self) -> GatewayResult<Vec<T>> {
        let response = self.send(Method::GET, &self.path, None).await?;
        self.parse_list(&response)
    }

    /// GET by id; the backend's 204 absence signal maps to `None`, never an
    /// error.
    pub async fn get(&self, id: i32) -> GatewayResult<Option<T>> {
        let path = format!("{}/{id}", self.path);
        let response = self.send(Method::GET, &path, None).await?;

        if response.is_no_content() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&response.body)?))
    }

    /// POST a new entity
    pub async fn create(&self, entity: &T) -> GatewayResult<()> {
        let body = serde_json::to_value(entity)?;
        self.send(Method::POST, &self.path, Some(body)).await?;
        Ok(())
    }

    /// PUT an existing entity to `{resource}/{id}`
    pub async fn update(&self, entity: &T) -> GatewayResult<()> {
        let path = format!("{}/{}", self.path, entity.id());
        let body = serde_json::to_value(entity)?;
        self.send(Method::PUT, &path, Some(body)).await?;
        Ok(())
    }

    /// DELETE `{resource}/{id}`
    pub async fn delete(&self, entity: &T) -> GatewayResult<()> {
        let path = format!("{}/{}", self.path, entity.id());
        self.send(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

//! # Contact Service Orchestrator
//!
//! The one component with business rules. Reads delegate to the resource
//! clients (only the DDD-filtered list is cached); writes construct an
//! immutable command from validated input and hand it to the publisher.
//! The cross-entity invariant lives here: no create, edit, or DDD-filtered
//! read proceeds without resolving the referenced DDD record first, and a
//! missing reference is a client error, never a backend error.

use crate::cache::ReadThroughCache;
use crate::client::{ContactClient, DddClient};
use crate::error::{GatewayError, GatewayResult};
use crate::messaging::{CommandPublisher, ContactCommand};
use crate::models::Contact;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const INVALID_DDD_MESSAGE: &str = "Invalid Direct Distance Dialing Id";

/// Orchestrates contact reads and command-published writes.
///
/// Writes are asynchronous by design: the request completes when the broker
/// accepts the command, not when the backend store applies it. There is no
/// direct CRUD write path for contacts in this gateway.
pub struct ContactService {
    contacts: ContactClient,
    ddd: DddClient,
    publisher: Arc<dyn CommandPublisher>,
    by_ddd_cache: ReadThroughCache<i32, Vec<Contact>>,
}

impl ContactService {
    pub fn new(
        contacts: ContactClient,
        ddd: DddClient,
        publisher: Arc<dyn CommandPublisher>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            contacts,
            ddd,
            publisher,
            by_ddd_cache: ReadThroughCache::new(cache_ttl),
        }
    }

    /// GET all contacts, uncached
    pub async fn get_all(&self) -> GatewayResult<Vec<Contact>> {
        self.contacts.list().await
    }

    /// GET one contact; absent is `None`, not an error
    pub async fn get_by_id(&self, id: i32) -> GatewayResult<Option<Contact>> {
        self.contacts.get(id).await
    }

    /// GET the contacts referencing one DDD code, through the read-through
    /// cache. The fetch resolves the DDD record first; an unknown id fails
    /// before the contact resource is ever reached, and nothing is cached.
    pub async fn get_all_by_ddd(&self, ddd_id: i32) -> GatewayResult<Vec<Contact>> {
        self.by_ddd_cache
            .get_or_fetch(ddd_id, || async {
                self.ensure_ddd_exists(ddd_id).await?;
                self.contacts.list_by_ddd(ddd_id).await
            })
            .await
    }

    /// Validate and publish a create command. Returns the accepted command
    /// so callers can echo it in the response.
    pub async fn create(
        &self,
        name: String,
        phone: String,
        email: String,
        ddd_id: i32,
    ) -> GatewayResult<ContactCommand> {
        self.ensure_ddd_exists(ddd_id).await?;

        let command = ContactCommand::CreateContact {
            name,
            phone,
            email,
            ddd_id,
        };
        self.publisher.publish(&command).await?;

        info!(command = command.kind(), ddd_id = ddd_id, "📨 Contact write published");
        Ok(command)
    }

    /// Validate and publish an edit command for an existing contact
    pub async fn edit(
        &self,
        id: i32,
        name: String,
        phone: String,
        email: String,
        ddd_id: i32,
    ) -> GatewayResult<ContactCommand> {
        self.ensure_ddd_exists(ddd_id).await?;

        let command = ContactCommand::EditContact {
            id,
            name,
            phone,
            email,
            ddd_id,
        };
        self.publisher.publish(&command).await?;

        info!(command = command.kind(), contact_id = id, "📨 Contact write published");
        Ok(command)
    }

    /// Publish a delete command for an existing contact
    pub async fn delete(&self, id: i32) -> GatewayResult<ContactCommand> {
        let command = ContactCommand::DeleteContact { id };
        self.publisher.publish(&command).await?;

        info!(command = command.kind(), contact_id = id, "📨 Contact write published");
        Ok(command)
    }

    /// Diagnostic passthrough exercising the circuit breaker deliberately
    pub async fn resilience_test(&self, fail: bool) -> GatewayResult<String> {
        self.contacts.resilience_test(fail).await
    }

    async fn ensure_ddd_exists(&self, ddd_id: i32) -> GatewayResult<()> {
        match self.ddd.get(ddd_id).await? {
            Some(_) => Ok(()),
            None => Err(GatewayError::validation(INVALID_DDD_MESSAGE)),
        }
    }
}

//! # Web Application State
//!
//! Shared state handed to every handler: the two service orchestrators.
//! All resilience state (breaker, cache) lives inside the services.

use crate::services::{ContactService, DddService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactService>,
    pub ddd: Arc<DddService>,
}

impl AppState {
    pub fn new(contacts: ContactService, ddd: DddService) -> Self {
        Self {
            contacts: Arc::new(contacts),
            ddd: Arc::new(ddd),
        }
    }
}

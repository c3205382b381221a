//! # Persistence API Clients
//!
//! HTTP clients for the remote persistence service, all funneled through the
//! shared circuit breaker. The generic [`ResourceClient`] carries the CRUD
//! mapping; [`ContactClient`] and [`DddClient`] compose it per resource.

pub mod contact;
pub mod ddd;
pub mod http;
pub mod resource;

pub use contact::ContactClient;
pub use ddd::DddClient;
pub use http::{HttpBackend, RawResponse, ReqwestBackend};
pub use resource::ResourceClient;

//! # Service Orchestrators
//!
//! The business-rule layer composing clients, cache, and publisher. Handlers
//! talk to these services and never to the clients directly.

pub mod contacts;
pub mod ddd;

pub use contacts::ContactService;
pub use ddd::DddService;

//! # Messaging Module
//!
//! The asynchronous write path: immutable contact commands and the
//! broker-facing publisher that decouples write latency from the backend
//! store. Consumers that apply commands to the persistence service live
//! outside this gateway.

pub mod commands;
pub mod publisher;

pub use commands::ContactCommand;
pub use publisher::{CommandPublisher, PgmqCommandPublisher};

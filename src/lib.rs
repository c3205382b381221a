//! # Contact Gateway
//!
//! A small API gateway fronting a remote persistence service for contact
//! and DDD (Direct Distance Dialing) records. The interesting part is the
//! resilient remote-access layer:
//!
//! - **Circuit breaker** ([`resilience`]): outbound persistence calls are
//!   wrapped in an explicit Closed/Open/Half-Open state machine shared per
//!   backend endpoint, failing fast while the backend is degraded.
//! - **Resource clients** ([`client`]): a capability-based generic CRUD
//!   client over REST resources, with contact- and DDD-specific lookups
//!   composed on top. Absence (204) is a typed `None`, never an error.
//! - **Read-through cache** ([`cache`]): the contacts-by-DDD lookup is
//!   memoized for five minutes with per-key single-flight fetching.
//! - **Command publishing** ([`messaging`]): writes are immutable commands
//!   handed to a message broker; the request completes on broker
//!   acceptance, decoupling write latency from the backend store.
//! - **Orchestration** ([`services`]): the one business rule - a contact
//!   must reference an existing DDD record - is enforced before any write
//!   or derived read.
//!
//! Everything else ([`web`], [`config`], [`logging`]) is thin plumbing
//! around that core.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod models;
pub mod resilience;
pub mod services;
pub mod web;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};

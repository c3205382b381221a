//! # Resilience Module
//!
//! Circuit breaker protection for the gateway's outbound persistence-API
//! calls, preventing cascade failures while the backend is degraded.
//!
//! One [`CircuitBreaker`] is shared per backend endpoint: all resource
//! clients talking to the persistence API hold the same `Arc`, so failure
//! counting and state transitions are global across request-handling tasks.

pub mod circuit_breaker;

pub use circuit_breaker::{
    CircuitBreaker, CircuitBreakerSettings, CircuitState, LogTransitionObserver,
    TransitionObserver,
};

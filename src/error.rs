//! # Gateway Error Types
//!
//! Structured error handling for the remote-access layer using thiserror
//! instead of `Box<dyn Error>` patterns. Absence of a record is never an
//! error here: reads return `Option`, and the backend's 204 signal is mapped
//! to `None` before an error type is ever involved.

use thiserror::Error;

/// Gateway-wide error taxonomy.
///
/// The distinction between `Transport`, `Backend` and `CircuitOpen` matters
/// operationally: the first two count toward circuit breaker failure
/// tracking, the last one is the breaker's own rejection and never does.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Transport error during {operation}: {message}")]
    Transport { operation: String, message: String },

    #[error("Backend returned status {status} for {operation}")]
    Backend { operation: String, status: u16 },

    #[error("Circuit breaker is open for {component}")]
    CircuitOpen { component: String },

    #[error("Broker publish failed for {queue}: {message}")]
    Broker { queue: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {component}: {message}")]
    Configuration { component: String, message: String },
}

impl GatewayError {
    /// Create a validation error (client-caused, surfaced as 4xx)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error with operation context
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a backend error from a non-success HTTP status
    pub fn backend(operation: impl Into<String>, status: u16) -> Self {
        Self::Backend {
            operation: operation.into(),
            status,
        }
    }

    /// Create a circuit-open rejection
    pub fn circuit_open(component: impl Into<String>) -> Self {
        Self::CircuitOpen {
            component: component.into(),
        }
    }

    /// Create a broker error with queue context
    pub fn broker(queue: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Broker {
            queue: queue.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether this failure advances the circuit breaker's failure count.
    ///
    /// Mirrors the transient-HTTP-error set: network failures plus 5xx and
    /// 408 responses qualify. Validation errors, other 4xx statuses and a
    /// breaker rejection itself never do.
    pub fn is_circuit_tripping(&self) -> bool {
        match self {
            GatewayError::Transport { .. } => true,
            GatewayError::Backend { status, .. } => *status >= 500 || *status == 408,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        let operation = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_else(|| "request".to_string());
        Self::Transport {
            operation,
            message: err.to_string(),
        }
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

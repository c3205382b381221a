//! # Response Envelope
//!
//! Every gateway response carries the same `{ data, errors }` shape: `data`
//! on success, one or more messages in `errors` on failure, never both.

use serde::Serialize;

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct ResultEnvelope<T> {
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> ResultEnvelope<T> {
    /// Successful envelope wrapping `data`
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Failure envelope with one message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![message.into()],
        }
    }

    /// Failure envelope with one message per violated rule
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { data: None, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_shape() {
        let envelope = ResultEnvelope::ok(vec![1, 2]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({ "data": [1, 2], "errors": [] }));
    }

    #[test]
    fn error_envelope_shape() {
        let envelope: ResultEnvelope<()> = ResultEnvelope::error("01X01 - Internal server error");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({ "data": null, "errors": ["01X01 - Internal server error"] })
        );
    }
}

//! # Entity Model Layer
//!
//! Typed entities for the two persistence resources the gateway fronts.
//! Identifiers are assigned by the backend and immutable once assigned; the
//! gateway never invents ids. JSON field names are camelCase to match the
//! persistence API's wire contract.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Common shape of every persisted entity: a backend-assigned integer id.
///
/// The generic resource client is bounded on this trait so it can build
/// `{resource}/{id}` paths without knowing the concrete entity.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> i32;
}

/// A contact record referencing a DDD region code.
///
/// The `ddd_id` foreign reference is the one cross-entity invariant the
/// gateway enforces: no write (and no DDD-filtered read) proceeds without
/// resolving the referenced DDD record first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub ddd_id: i32,
}

impl Entity for Contact {
    fn id(&self) -> i32 {
        self.id
    }
}

/// A Direct Distance Dialing record: a regional dialing code (11-99) and the
/// region it maps to. Referenced by contacts, never owned by them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectDistanceDialing {
    pub id: i32,
    pub code: i32,
    pub region: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for DirectDistanceDialing {
    fn id(&self) -> i32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_uses_camel_case_wire_names() {
        let contact = Contact {
            id: 7,
            name: "Maria Silva".to_string(),
            phone: "98765-4321".to_string(),
            email: "maria@example.com".to_string(),
            ddd_id: 11,
        };

        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(value["dddId"], json!(11));
        assert!(value.get("ddd_id").is_none());
    }

    #[test]
    fn ddd_round_trips_from_backend_json() {
        let body = json!({
            "id": 3,
            "code": 21,
            "region": "Rio de Janeiro",
            "createdAt": "2024-03-01T12:00:00Z"
        });

        let ddd: DirectDistanceDialing = serde_json::from_value(body).unwrap();
        assert_eq!(ddd.code, 21);
        assert_eq!(ddd.id(), 3);
    }
}

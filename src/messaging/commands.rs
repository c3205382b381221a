//! # Write Commands
//!
//! Immutable descriptions of requested contact mutations, published to the
//! broker for asynchronous processing. A command captures exactly the fields
//! needed to perform one mutation; edits and deletes carry the target id and
//! nothing else beyond what the caller passed in.

use serde::{Deserialize, Serialize};

/// A contact write intent, serialized as a tagged JSON message.
///
/// Constructed per request, handed to the publisher, and discarded; the
/// orchestrator never mutates a command after handing it off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContactCommand {
    #[serde(rename_all = "camelCase")]
    CreateContact {
        name: String,
        phone: String,
        email: String,
        ddd_id: i32,
    },
    #[serde(rename_all = "camelCase")]
    EditContact {
        id: i32,
        name: String,
        phone: String,
        email: String,
        ddd_id: i32,
    },
    #[serde(rename_all = "camelCase")]
    DeleteContact { id: i32 },
}

impl ContactCommand {
    /// The command's name on the wire, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ContactCommand::CreateContact { .. } => "createContact",
            ContactCommand::EditContact { .. } => "editContact",
            ContactCommand::DeleteContact { .. } => "deleteContact",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_command_wire_shape() {
        let command = ContactCommand::CreateContact {
            name: "Maria Silva".to_string(),
            phone: "98765-4321".to_string(),
            email: "maria@example.com".to_string(),
            ddd_id: 11,
        };

        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "createContact",
                "name": "Maria Silva",
                "phone": "98765-4321",
                "email": "maria@example.com",
                "dddId": 11
            })
        );
    }

    #[test]
    fn delete_command_carries_only_the_target_id() {
        let command = ContactCommand::DeleteContact { id: 7 };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value, json!({ "type": "deleteContact", "id": 7 }));
    }

    #[test]
    fn commands_round_trip() {
        let command = ContactCommand::EditContact {
            id: 7,
            name: "Maria Silva".to_string(),
            phone: "1234-5678".to_string(),
            email: "maria@example.com".to_string(),
            ddd_id: 21,
        };

        let json = serde_json::to_string(&command).unwrap();
        let parsed: ContactCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, command);
    }
}

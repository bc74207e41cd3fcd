//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the different API domains
//! (task reminders, real-time notifications) and defines the uniform JSON
//! envelope every endpoint answers with, excluding core authentication routes
//! which are handled separately.

pub mod notifications;
pub mod tasks;

use serde::{Deserialize, Serialize};

/// Uniform response envelope: `{ isSuccessful, item | items, errors?, code? }`.
///
/// A successful response carries either `item` or `items`; an error response
/// carries the human-readable `errors` list plus the machine-readable `code`.
/// Absent fields are omitted from the JSON, never serialized as null.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub is_successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
}

impl<T> ApiResponse<T> {
    pub fn item(item: T) -> Self {
        Self {
            is_successful: true,
            item: Some(item),
            items: None,
            errors: None,
            code: None,
        }
    }

    pub fn items(items: Vec<T>) -> Self {
        Self {
            is_successful: true,
            item: None,
            items: Some(items),
            errors: None,
            code: None,
        }
    }

    /// Success with no payload, e.g. logout or dismiss.
    pub fn ok() -> Self {
        Self {
            is_successful: true,
            item: None,
            items: None,
            errors: None,
            code: None,
        }
    }

    pub fn error(errors: Vec<String>, code: u32) -> Self {
        Self {
            is_successful: false,
            item: None,
            items: None,
            errors: Some(errors),
            code: Some(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error_fields() {
        let wire = serde_json::to_value(ApiResponse::item(json!({"id": 1}))).unwrap();

        assert_eq!(wire["isSuccessful"], true);
        assert_eq!(wire["item"]["id"], 1);
        assert!(wire.get("items").is_none());
        assert!(wire.get("errors").is_none());
        assert!(wire.get("code").is_none());
    }

    #[test]
    fn list_envelope_uses_items() {
        let wire = serde_json::to_value(ApiResponse::items(vec![1, 2, 3])).unwrap();

        assert_eq!(wire["isSuccessful"], true);
        assert_eq!(wire["items"], json!([1, 2, 3]));
        assert!(wire.get("item").is_none());
    }

    #[test]
    fn error_envelope_carries_messages_and_code() {
        let wire = serde_json::to_value(ApiResponse::<()>::error(
            vec!["Session has expired".into()],
            1002,
        ))
        .unwrap();

        assert_eq!(wire["isSuccessful"], false);
        assert_eq!(wire["errors"][0], "Session has expired");
        assert_eq!(wire["code"], 1002);
        assert!(wire.get("item").is_none());
    }
}

//! Generic data models for the `notify` crate.
//!
//! These models define the common representation of a pushed message so that
//! every channel implementation delivers the same wire shape to its
//! recipients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity a connection is registered under. Matches the primary key of the
/// user record in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single server-initiated message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// Message discriminator understood by the client, e.g. `"taskReminders"`.
    pub kind: String,
    pub sent_at: DateTime<Utc>,
    /// Arbitrary JSON payload; its shape is owned by the producer.
    pub body: serde_json::Value,
}

impl PushMessage {
    pub fn new(kind: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            sent_at: Utc::now(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn push_message_uses_camel_case_wire_casing() {
        let message = PushMessage::new("taskReminders", json!({"count": 2}));
        let wire = serde_json::to_value(&message).unwrap();

        assert_eq!(wire["kind"], "taskReminders");
        assert!(wire.get("sentAt").is_some());
        assert_eq!(wire["body"]["count"], 2);
    }
}

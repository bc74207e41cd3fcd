//! Logging sink implementation of the `NotificationChannel` trait.
//!
//! Accepts every push and records it to the log instead of delivering it.
//! Used when the real-time endpoint is disabled and as a drop-in double in
//! tests of code that fans out notifications.

use crate::errors::NotifyError;
use crate::models::{PushMessage, UserId};
use crate::NotificationChannel;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationChannel for LogSink {
    async fn push(&self, user: UserId, message: &PushMessage) -> Result<(), NotifyError> {
        info!(user = %user, kind = %message.kind, "notification logged (no live channel)");
        Ok(())
    }

    async fn is_connected(&self, _user: UserId) -> bool {
        true
    }
}

//! Core `notify` crate for server-initiated user notifications.
//!
//! This crate defines the `NotificationChannel` trait, which outlines a generic
//! "push to user" capability independent of transport, and provides a central
//! point for accessing the concrete implementations (in-process hub registry,
//! logging sink).

pub mod errors;
pub mod hub;
pub mod models;
pub mod sink;

pub use errors::NotifyError;
pub use hub::{ConnectionId, Hub};
pub use models::{PushMessage, UserId};
pub use sink::LogSink;

use async_trait::async_trait;

/// Transport-agnostic delivery of server-initiated messages to a single user.
///
/// Implementations keep recipients isolated from each other: a failed `push`
/// for one user must not affect delivery to any other user.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Delivers `message` to every live connection of `user`.
    async fn push(&self, user: UserId, message: &PushMessage) -> Result<(), NotifyError>;

    /// Whether `user` currently has at least one live connection.
    async fn is_connected(&self, user: UserId) -> bool;
}

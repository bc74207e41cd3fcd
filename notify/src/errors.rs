//! Custom error types specific to the `notify` crate.
//!
//! This module defines errors that can occur while registering connections or
//! pushing messages, providing a unified error handling mechanism for all
//! channel implementations.

use crate::models::UserId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// The user has no live connection registered with the channel.
    #[error("user {0} is not connected")]
    NotConnected(UserId),

    /// Every connection of the user refused the message; the dead
    /// registrations have been pruned.
    #[error("all connections of user {0} are closed")]
    AllConnectionsClosed(UserId),

    #[error("failed to serialize push message: {0}")]
    Serialization(#[from] serde_json::Error),
}

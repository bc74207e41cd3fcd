//! Authentication module for managing staff sessions and access control.
//!
//! This module provides the public interface for session-related
//! functionality: login, logout, bearer-token resolution, and the middleware
//! that gates authenticated routes.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use handlers::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
pub use service::*;

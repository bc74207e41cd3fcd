//! Real-time notification API domain.

pub mod handlers;
pub mod routes;

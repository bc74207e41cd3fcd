//! Task-reminder API domain.

pub mod handlers;
pub mod routes;

//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations and orchestrate interactions between different parts of the
//! application, such as reading task reminders and fanning overdue batches
//! out to connected clients.

pub mod reminders;
pub mod scheduler;

//! Stored-procedure call wrappers (Data Access Objects).
//!
//! This module centralizes all database operations. Each function issues a
//! `CALL` with positional parameters against a procedure owned by the
//! database, abstracting the persistence contract from services and
//! handlers.

use super::models::{ErrorLogEntry, TaskReminder, UserRecord};
use sqlx::MySqlPool;

/// Looks up a staff account by email and password digest. Returns `None`
/// when the credentials do not match any active or inactive account.
pub async fn user_verify_credentials(
    pool: &MySqlPool,
    email: &str,
    password_digest: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>("CALL user_verify_credentials(?, ?)")
        .bind(email)
        .bind(password_digest)
        .fetch_optional(pool)
        .await
}

/// Every reminder whose due date has passed and that has not been dismissed,
/// across all assignees. Consumed by the polling job.
pub async fn task_reminders_fetch_overdue(
    pool: &MySqlPool,
) -> Result<Vec<TaskReminder>, sqlx::Error> {
    sqlx::query_as::<_, TaskReminder>("CALL task_reminders_fetch_overdue()")
        .fetch_all(pool)
        .await
}

/// Open reminders assigned to one user, for the reminders listing endpoint.
pub async fn task_reminders_for_user(
    pool: &MySqlPool,
    user_id: i64,
) -> Result<Vec<TaskReminder>, sqlx::Error> {
    sqlx::query_as::<_, TaskReminder>("CALL task_reminders_for_user(?)")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn task_reminder_fetch(
    pool: &MySqlPool,
    reminder_id: i64,
) -> Result<Option<TaskReminder>, sqlx::Error> {
    sqlx::query_as::<_, TaskReminder>("CALL task_reminder_fetch(?)")
        .bind(reminder_id)
        .fetch_optional(pool)
        .await
}

/// Marks the reminder dismissed by its owner. The ownership check happens in
/// the service layer before this call.
pub async fn task_reminder_dismiss(
    pool: &MySqlPool,
    reminder_id: i64,
    dismissed_by: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("CALL task_reminder_dismiss(?, ?)")
        .bind(reminder_id)
        .bind(dismissed_by)
        .execute(pool)
        .await?;
    Ok(())
}

/// Persists one error-log row. Callers treat failures as best-effort and
/// only log them.
pub async fn error_log_insert(pool: &MySqlPool, entry: &ErrorLogEntry) -> Result<(), sqlx::Error> {
    sqlx::query("CALL error_log_insert(?, ?, ?, ?, ?)")
        .bind(entry.occurred_at)
        .bind(&entry.method)
        .bind(&entry.path)
        .bind(entry.status)
        .bind(&entry.message)
        .execute(pool)
        .await?;
    Ok(())
}

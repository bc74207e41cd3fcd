//! Rust structs that represent stored-procedure result sets.
//!
//! These models define the structure of data as it is returned by the
//! database procedures. Every domain entity carries audit metadata: who
//! created or last modified the record and when. Note that these may differ
//! from API-specific request models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// A staff account as returned by the credential-check procedure.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<i64>,
}

/// A task reminder row. A reminder is overdue when `due_at` has passed and
/// `dismissed_at` is still null.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReminder {
    pub id: i64,
    pub task_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: i64,
    pub status: String,
    pub due_at: DateTime<Utc>,
    pub dismissed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<i64>,
}

impl TaskReminder {
    pub fn is_dismissed(&self) -> bool {
        self.dismissed_at.is_some()
    }
}

/// Defined values for the task reminder `status` column. Anything else
/// arriving on a request model is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Open,
    Done,
    Dismissed,
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "done" => Ok(Self::Done),
            "dismissed" => Ok(Self::Dismissed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Done => "done",
            Self::Dismissed => "dismissed",
        };
        f.write_str(s)
    }
}

/// Row written to the persistent error log by the middleware when a request
/// ends in a server error.
#[derive(Debug, Clone)]
pub struct ErrorLogEntry {
    pub occurred_at: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_round_trips_defined_values() {
        for status in [TaskStatus::Open, TaskStatus::Done, TaskStatus::Dismissed] {
            assert_eq!(status.to_string().parse::<TaskStatus>(), Ok(status));
        }
    }

    #[test]
    fn task_status_rejects_undefined_values() {
        assert!("archived".parse::<TaskStatus>().is_err());
        assert!("OPEN".parse::<TaskStatus>().is_err());
    }
}

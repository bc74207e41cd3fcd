//! Task-reminder business logic.
//!
//! Reads reminder rows through the `ReminderStore` seam (backed by the
//! stored-procedure layer in production), enforces the owner-only dismiss
//! rule, and groups overdue reminders by assignee for the polling scheduler.
//! `OverdueSource` is the narrower seam the scheduler is tested through.

use crate::auth::models::CurrentUser;
use crate::database::models::TaskReminder;
use crate::database::queries;
use crate::errors::AppError;
use async_trait::async_trait;
use sqlx::MySqlPool;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Supplies the scheduler with the current set of overdue reminders.
#[async_trait]
pub trait OverdueSource: Send + Sync {
    async fn fetch_overdue(&self) -> Result<Vec<TaskReminder>, AppError>;
}

/// Persistence seam for reminder rows.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    async fn fetch_overdue(&self) -> Result<Vec<TaskReminder>, AppError>;
    async fn for_user(&self, user_id: i64) -> Result<Vec<TaskReminder>, AppError>;
    async fn fetch(&self, reminder_id: i64) -> Result<Option<TaskReminder>, AppError>;
    async fn dismiss(&self, reminder_id: i64, dismissed_by: i64) -> Result<(), AppError>;
}

/// Production store calling the stored procedures.
pub struct SqlReminderStore {
    pool: MySqlPool,
}

#[async_trait]
impl ReminderStore for SqlReminderStore {
    async fn fetch_overdue(&self) -> Result<Vec<TaskReminder>, AppError> {
        Ok(queries::task_reminders_fetch_overdue(&self.pool).await?)
    }

    async fn for_user(&self, user_id: i64) -> Result<Vec<TaskReminder>, AppError> {
        Ok(queries::task_reminders_for_user(&self.pool, user_id).await?)
    }

    async fn fetch(&self, reminder_id: i64) -> Result<Option<TaskReminder>, AppError> {
        Ok(queries::task_reminder_fetch(&self.pool, reminder_id).await?)
    }

    async fn dismiss(&self, reminder_id: i64, dismissed_by: i64) -> Result<(), AppError> {
        Ok(queries::task_reminder_dismiss(&self.pool, reminder_id, dismissed_by).await?)
    }
}

pub struct ReminderService {
    store: Arc<dyn ReminderStore>,
}

impl ReminderService {
    pub fn new(store: Arc<dyn ReminderStore>) -> Self {
        Self { store }
    }

    pub fn with_pool(pool: MySqlPool) -> Self {
        Self::new(Arc::new(SqlReminderStore { pool }))
    }

    /// Open reminders assigned to the caller.
    pub async fn for_user(&self, user_id: i64) -> Result<Vec<TaskReminder>, AppError> {
        self.store.for_user(user_id).await
    }

    /// Dismisses a reminder on behalf of its owner. Dismissing someone
    /// else's reminder is forbidden; dismissing twice is a conflict.
    pub async fn dismiss(&self, reminder_id: i64, user: &CurrentUser) -> Result<(), AppError> {
        let reminder = self
            .store
            .fetch(reminder_id)
            .await?
            .ok_or(AppError::ReminderNotFound)?;

        if reminder.assignee_id != user.id {
            return Err(AppError::NotReminderOwner);
        }
        if reminder.is_dismissed() {
            return Err(AppError::ReminderAlreadyDismissed);
        }

        self.store.dismiss(reminder_id, user.id).await?;
        info!(reminder = reminder_id, user = user.id, "reminder dismissed");
        Ok(())
    }
}

#[async_trait]
impl OverdueSource for ReminderService {
    async fn fetch_overdue(&self) -> Result<Vec<TaskReminder>, AppError> {
        self.store.fetch_overdue().await
    }
}

/// Buckets reminders by their assignee. Order within a bucket follows the
/// input order, which the procedure returns sorted by due date.
pub fn group_by_assignee(reminders: Vec<TaskReminder>) -> HashMap<i64, Vec<TaskReminder>> {
    let mut groups: HashMap<i64, Vec<TaskReminder>> = HashMap::new();
    for reminder in reminders {
        groups.entry(reminder.assignee_id).or_default().push(reminder);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use tokio::sync::Mutex;

    fn reminder(id: i64, assignee: i64) -> TaskReminder {
        TaskReminder {
            id,
            task_id: id,
            title: format!("task {id}"),
            description: None,
            assignee_id: assignee,
            status: "open".to_string(),
            due_at: Utc::now() - TimeDelta::hours(1),
            dismissed_at: None,
            created_at: Utc::now() - TimeDelta::days(1),
            created_by: Some(1),
            modified_at: None,
            modified_by: None,
        }
    }

    fn dismissed_reminder(id: i64, assignee: i64) -> TaskReminder {
        TaskReminder {
            dismissed_at: Some(Utc::now() - TimeDelta::minutes(5)),
            status: "dismissed".to_string(),
            ..reminder(id, assignee)
        }
    }

    fn owner(id: i64) -> CurrentUser {
        CurrentUser {
            id,
            email: format!("staff{id}@tourgo.example"),
            role: "frontdesk".to_string(),
        }
    }

    /// Store double over a fixed set of rows, recording dismissals.
    #[derive(Default)]
    struct InMemoryStore {
        rows: Vec<TaskReminder>,
        dismissed: Mutex<Vec<(i64, i64)>>,
    }

    #[async_trait]
    impl ReminderStore for InMemoryStore {
        async fn fetch_overdue(&self) -> Result<Vec<TaskReminder>, AppError> {
            Ok(self.rows.clone())
        }

        async fn for_user(&self, user_id: i64) -> Result<Vec<TaskReminder>, AppError> {
            Ok(self
                .rows
                .iter()
                .filter(|r| r.assignee_id == user_id)
                .cloned()
                .collect())
        }

        async fn fetch(&self, reminder_id: i64) -> Result<Option<TaskReminder>, AppError> {
            Ok(self.rows.iter().find(|r| r.id == reminder_id).cloned())
        }

        async fn dismiss(&self, reminder_id: i64, dismissed_by: i64) -> Result<(), AppError> {
            self.dismissed.lock().await.push((reminder_id, dismissed_by));
            Ok(())
        }
    }

    fn service(rows: Vec<TaskReminder>) -> (ReminderService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore {
            rows,
            ..Default::default()
        });
        (ReminderService::new(Arc::clone(&store) as Arc<dyn ReminderStore>), store)
    }

    #[tokio::test]
    async fn owner_dismisses_an_open_reminder() {
        let (service, store) = service(vec![reminder(1, 10)]);

        service.dismiss(1, &owner(10)).await.unwrap();

        assert_eq!(*store.dismissed.lock().await, vec![(1, 10)]);
    }

    #[tokio::test]
    async fn dismissing_unknown_reminder_is_not_found() {
        let (service, store) = service(vec![reminder(1, 10)]);

        let err = service.dismiss(99, &owner(10)).await.unwrap_err();
        assert_eq!(err.code(), 3001);
        assert!(store.dismissed.lock().await.is_empty());
    }

    #[tokio::test]
    async fn dismissing_another_users_reminder_is_forbidden() {
        let (service, store) = service(vec![reminder(1, 10)]);

        let err = service.dismiss(1, &owner(20)).await.unwrap_err();
        assert_eq!(err.code(), 3004);
        assert!(store.dismissed.lock().await.is_empty());
    }

    #[tokio::test]
    async fn dismissing_twice_is_a_conflict() {
        let (service, store) = service(vec![dismissed_reminder(1, 10)]);

        let err = service.dismiss(1, &owner(10)).await.unwrap_err();
        assert_eq!(err.code(), 3002);
        assert!(store.dismissed.lock().await.is_empty());
    }

    #[tokio::test]
    async fn listing_returns_only_the_callers_reminders() {
        let (service, _) = service(vec![reminder(1, 10), reminder(2, 20), reminder(3, 10)]);

        let mine = service.for_user(10).await.unwrap();
        let ids: Vec<i64> = mine.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn grouping_buckets_by_assignee_and_keeps_order() {
        let grouped = group_by_assignee(vec![
            reminder(1, 10),
            reminder(2, 20),
            reminder(3, 10),
            reminder(4, 10),
        ]);

        assert_eq!(grouped.len(), 2);
        let ids: Vec<i64> = grouped[&10].iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(grouped[&20].len(), 1);
    }

    #[test]
    fn grouping_empty_input_yields_no_buckets() {
        assert!(group_by_assignee(Vec::new()).is_empty());
    }
}

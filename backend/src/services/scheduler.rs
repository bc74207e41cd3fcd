//! Polling scheduler that fans overdue reminders out to connected clients.
//!
//! On a jittered interval the scheduler fetches every overdue reminder,
//! groups them by assignee, and pushes one batch message per connected
//! assignee through the notification channel. A push failure for one
//! assignee is logged and never blocks the others; nothing is retried or
//! persisted, since a still-overdue reminder reappears on the next cycle.

use crate::config::Config;
use crate::services::reminders::{group_by_assignee, OverdueSource};
use chrono::{DateTime, Utc};
use notify::{NotificationChannel, PushMessage, UserId};
use rand::Rng;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Base polling interval in seconds.
    pub base_interval_secs: u64,
    /// Maximum jitter as a fraction of the base interval (0.0 to 1.0).
    pub jitter_percent: f64,
    pub min_interval_secs: u64,
    pub max_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_interval_secs: 60,
            jitter_percent: 0.1,
            min_interval_secs: 15,
            max_interval_secs: 900,
        }
    }
}

impl SchedulerConfig {
    pub fn from_app_config(config: &Config) -> Self {
        Self {
            base_interval_secs: config.reminder_interval_secs,
            jitter_percent: config.reminder_jitter_percent,
            ..Self::default()
        }
    }
}

/// Counters exposed for observability and asserted on in tests.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStats {
    pub total_cycles: u64,
    pub failed_cycles: u64,
    pub reminders_seen: u64,
    pub batches_delivered: u64,
    pub delivery_failures: u64,
    pub offline_skipped: u64,
    pub last_cycle_at: Option<DateTime<Utc>>,
}

pub struct ReminderScheduler {
    config: SchedulerConfig,
    source: Arc<dyn OverdueSource>,
    channel: Arc<dyn NotificationChannel>,
    stats: Arc<RwLock<SchedulerStats>>,
    is_running: AtomicBool,
    shutdown_sender: RwLock<Option<broadcast::Sender<()>>>,
}

impl ReminderScheduler {
    pub fn new(
        config: SchedulerConfig,
        source: Arc<dyn OverdueSource>,
        channel: Arc<dyn NotificationChannel>,
    ) -> Self {
        Self {
            config,
            source,
            channel,
            stats: Arc::new(RwLock::new(SchedulerStats::default())),
            is_running: AtomicBool::new(false),
            shutdown_sender: RwLock::new(None),
        }
    }

    /// Runs the polling loop until a shutdown signal arrives. Ticks delay
    /// rather than stack, so one cycle runs at a time.
    pub async fn start(&self) -> Result<(), SchedulerError> {
        if self.is_running.swap(true, Ordering::SeqCst) {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (shutdown_sender, mut shutdown_receiver) = broadcast::channel(1);
        {
            let mut sender_guard = self.shutdown_sender.write().await;
            *sender_guard = Some(shutdown_sender);
        }

        info!(
            base_interval_secs = self.config.base_interval_secs,
            jitter_percent = self.config.jitter_percent,
            "reminder scheduler started"
        );

        let mut poll_interval = interval(self.jittered_interval());
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately.
        poll_interval.tick().await;

        loop {
            tokio::select! {
                _ = poll_interval.tick() => {
                    self.run_cycle().await;
                }
                _ = shutdown_receiver.recv() => {
                    info!("reminder scheduler shutting down");
                    break;
                }
            }
        }

        self.is_running.store(false, Ordering::SeqCst);
        let stats = self.stats.read().await;
        info!(
            total_cycles = stats.total_cycles,
            batches_delivered = stats.batches_delivered,
            "reminder scheduler stopped"
        );
        Ok(())
    }

    /// Signals the polling loop to stop after the current cycle.
    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        let sender_guard = self.shutdown_sender.read().await;
        match sender_guard.as_ref() {
            Some(sender) => {
                sender.send(()).map_err(|_| SchedulerError::NotRunning)?;
                Ok(())
            }
            None => Err(SchedulerError::NotRunning),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    pub async fn stats(&self) -> SchedulerStats {
        self.stats.read().await.clone()
    }

    /// One poll-group-fanout pass. Failures are absorbed here: a broken
    /// fetch fails the cycle, a broken push only fails that assignee.
    pub async fn run_cycle(&self) {
        let reminders = match self.source.fetch_overdue().await {
            Ok(reminders) => reminders,
            Err(e) => {
                error!(error = %e, "failed to fetch overdue reminders");
                let mut stats = self.stats.write().await;
                stats.total_cycles += 1;
                stats.failed_cycles += 1;
                stats.last_cycle_at = Some(Utc::now());
                return;
            }
        };

        let seen = reminders.len() as u64;
        let mut delivered = 0u64;
        let mut failures = 0u64;
        let mut offline = 0u64;

        for (assignee, batch) in group_by_assignee(reminders) {
            let user = UserId(assignee);
            if !self.channel.is_connected(user).await {
                // Dropped silently; the reminder is still overdue next cycle.
                debug!(user = %user, pending = batch.len(), "assignee offline, batch skipped");
                offline += 1;
                continue;
            }

            let message = PushMessage::new("taskReminders", json!({ "reminders": batch }));
            match self.channel.push(user, &message).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(user = %user, error = %e, "failed to push reminder batch");
                    failures += 1;
                }
            }
        }

        let mut stats = self.stats.write().await;
        stats.total_cycles += 1;
        stats.reminders_seen += seen;
        stats.batches_delivered += delivered;
        stats.delivery_failures += failures;
        stats.offline_skipped += offline;
        stats.last_cycle_at = Some(Utc::now());
    }

    /// Interval with bounded random jitter so multiple instances do not poll
    /// in lockstep.
    fn jittered_interval(&self) -> Duration {
        let base = self.config.base_interval_secs as f64;
        let jitter_amount = base * self.config.jitter_percent;

        let mut rng = rand::thread_rng();
        let jitter = if jitter_amount > 0.0 {
            rng.gen_range(-jitter_amount..=jitter_amount)
        } else {
            0.0
        };

        let jittered = (base + jitter).max(0.0) as u64;
        let clamped = jittered
            .max(self.config.min_interval_secs)
            .min(self.config.max_interval_secs);

        Duration::from_secs(clamped)
    }
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler is already running")]
    AlreadyRunning,
    #[error("scheduler is not running")]
    NotRunning,
}

/// Creates the scheduler and runs it on a background task.
pub fn spawn_reminder_scheduler(
    config: SchedulerConfig,
    source: Arc<dyn OverdueSource>,
    channel: Arc<dyn NotificationChannel>,
) -> Arc<ReminderScheduler> {
    let scheduler = Arc::new(ReminderScheduler::new(config, source, channel));
    let task = Arc::clone(&scheduler);
    tokio::spawn(async move {
        if let Err(e) = task.start().await {
            error!(error = %e, "reminder scheduler failed to start");
        }
    });
    scheduler
}

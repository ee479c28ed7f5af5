// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Reminder scheduler
//!
//! Registers a fixed cadence of reminders across the waking day with the
//! platform scheduler and tracks the returned handles per reminder class,
//! so a class can be cancelled or replaced as a unit.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::notifications::{PushChannel, PushMessage, PushPriority, ScheduleHandle};

/// Hours of the day reminders are spread across
pub const DEFAULT_WAKING_WINDOW_HOURS: f64 = 16.0;

/// Shortest accepted gap between reminders (one minute)
pub const MIN_GAP_HOURS: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderClass {
    Healthy,
    Medical,
}

impl ReminderClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Medical => "medical",
        }
    }
}

impl fmt::Display for ReminderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reminder schedule request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfig {
    pub class: ReminderClass,
    /// Daily goal, ml
    pub goal_ml: f64,
    /// Hours between reminders
    pub gap_hours: f64,
    /// Intake per reminder, ml
    pub amount_ml: f64,
    #[serde(default)]
    pub condition: Option<String>,
    pub owner_id: String,
}

impl ReminderConfig {
    pub fn healthy(owner_id: impl Into<String>, goal_ml: f64, gap_hours: f64, amount_ml: f64) -> Self {
        Self {
            class: ReminderClass::Healthy,
            goal_ml,
            gap_hours,
            amount_ml,
            condition: None,
            owner_id: owner_id.into(),
        }
    }

    pub fn medical(
        owner_id: impl Into<String>,
        goal_ml: f64,
        gap_hours: f64,
        amount_ml: f64,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            class: ReminderClass::Medical,
            goal_ml,
            gap_hours,
            amount_ml,
            condition: Some(condition.into()),
            owner_id: owner_id.into(),
        }
    }

    /// Number of reminders that fit in the waking window.
    ///
    /// Zero for gaps below [`MIN_GAP_HOURS`] or a window outside 0-24h.
    pub fn reminder_count(&self, waking_window_hours: f64) -> usize {
        if !(self.gap_hours.is_finite() && self.gap_hours >= MIN_GAP_HOURS) {
            return 0;
        }
        if !(waking_window_hours > 0.0 && waking_window_hours <= 24.0) {
            return 0;
        }
        (waking_window_hours / self.gap_hours).floor() as usize
    }

    /// Offset of the `n`th reminder (1-based) from now
    pub fn offset(&self, n: usize) -> Duration {
        Duration::from_secs_f64(self.gap_hours * 3600.0 * n as f64)
    }

    fn message(&self, n: usize) -> PushMessage {
        let (title, body) = match self.class {
            ReminderClass::Healthy => (
                "💧 Hydration Reminder".to_string(),
                format!("Time to drink {:.0}ml of water!", self.amount_ml),
            ),
            ReminderClass::Medical => (
                "💊 Medical Hydration Reminder".to_string(),
                format!(
                    "Drink {:.0}ml of water as part of your {} plan.",
                    self.amount_ml,
                    self.condition.as_deref().unwrap_or("hydration")
                ),
            ),
        };

        PushMessage::new(title, body)
            .with_priority(PushPriority::High)
            .with_payload(serde_json::json!({
                "class": self.class,
                "amount": self.amount_ml,
                "goal": self.goal_ml,
                "reminderNumber": n,
                "condition": self.condition,
                "ownerId": self.owner_id,
            }))
    }
}

/// Tracks scheduled reminder handles per class.
///
/// `schedule`, `cancel` and `cancel_all` are serialized by an async lock
/// held across the platform calls, so a replace never races another one.
pub struct ReminderScheduler {
    channel: Arc<dyn PushChannel>,
    waking_window_hours: f64,
    handles: Mutex<HashMap<ReminderClass, Vec<ScheduleHandle>>>,
    ops: AsyncMutex<()>,
}

impl ReminderScheduler {
    pub fn new(channel: Arc<dyn PushChannel>, waking_window_hours: f64) -> Self {
        Self {
            channel,
            waking_window_hours,
            handles: Mutex::new(HashMap::new()),
            ops: AsyncMutex::new(()),
        }
    }

    /// Replace the reminders for `config.class`.
    ///
    /// Any earlier schedule for the class is cancelled first. Returns false
    /// when the platform is unavailable, the gap is below a minute, or a
    /// registration fails; handles registered before a failure are kept so
    /// they can still be cancelled.
    pub async fn schedule(&self, config: &ReminderConfig) -> bool {
        if !self.channel.is_available() {
            debug!("Reminder scheduling unavailable, skipping {} reminders", config.class);
            return false;
        }

        let _ops = self.ops.lock().await;
        self.cancel_registered(config.class).await;

        let count = config.reminder_count(self.waking_window_hours);
        if count == 0 {
            warn!(
                "No {} reminders fit a {}h window with a {}h gap",
                config.class, self.waking_window_hours, config.gap_hours
            );
            return false;
        }

        let mut handles = Vec::new();
        let mut ok = true;

        // Strictly in order so handles keep ordinal order
        for n in 1..=count {
            match self.channel.schedule(config.message(n), config.offset(n)).await {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    warn!("Failed to schedule {} reminder #{}: {}", config.class, n, e);
                    ok = false;
                    break;
                }
            }
        }

        info!(
            "Scheduled {}/{} {} reminders every {}h for {}",
            handles.len(),
            count,
            config.class,
            config.gap_hours,
            config.owner_id
        );
        self.handles.lock().insert(config.class, handles);
        ok
    }

    /// Cancel every reminder registered for `class`
    pub async fn cancel(&self, class: ReminderClass) {
        let _ops = self.ops.lock().await;
        self.cancel_registered(class).await;
    }

    async fn cancel_registered(&self, class: ReminderClass) {
        let removed = self.handles.lock().remove(&class);
        let Some(handles) = removed else {
            return;
        };

        for handle in &handles {
            if let Err(e) = self.channel.cancel(handle).await {
                debug!("Cancel of {} reminder {} failed: {}", class, handle, e);
            }
        }
        debug!("Cancelled {} {} reminder(s)", handles.len(), class);
    }

    pub async fn cancel_all(&self) {
        let _ops = self.ops.lock().await;
        if let Err(e) = self.channel.cancel_all().await {
            debug!("Cancel all reminders failed: {}", e);
        }
        self.handles.lock().clear();
    }

    /// Live count of everything scheduled on the platform, 0 if unavailable
    pub async fn count(&self) -> usize {
        match self.channel.scheduled_count().await {
            Ok(count) => count,
            Err(e) => {
                debug!("Scheduled count unavailable: {}", e);
                0
            }
        }
    }

    /// Handles tracked locally for `class`, in ordinal order
    pub fn handles(&self, class: ReminderClass) -> Vec<ScheduleHandle> {
        self.handles.lock().get(&class).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{MemoryPushChannel, NoopPushChannel, PushError};

    fn scheduler() -> (ReminderScheduler, Arc<MemoryPushChannel>) {
        let channel = Arc::new(MemoryPushChannel::new());
        (
            ReminderScheduler::new(channel.clone(), DEFAULT_WAKING_WINDOW_HOURS),
            channel,
        )
    }

    #[test]
    fn test_reminder_count_floors() {
        let config = ReminderConfig::healthy("u1", 2000.0, 4.0, 250.0);
        assert_eq!(config.reminder_count(16.0), 4);

        let config = ReminderConfig::healthy("u1", 2000.0, 3.0, 250.0);
        assert_eq!(config.reminder_count(16.0), 5);

        let config = ReminderConfig::healthy("u1", 2000.0, 0.0, 250.0);
        assert_eq!(config.reminder_count(16.0), 0);
        assert_eq!(config.offset(2), Duration::ZERO);
    }

    #[test]
    fn test_reminder_count_rejects_tiny_gap_and_bad_window() {
        let config = ReminderConfig::healthy("u1", 2000.0, 1e-20, 250.0);
        assert_eq!(config.reminder_count(16.0), 0);

        let config = ReminderConfig::healthy("u1", 2000.0, MIN_GAP_HOURS, 250.0);
        assert_eq!(config.reminder_count(16.0), 960);

        let config = ReminderConfig::healthy("u1", 2000.0, 4.0, 250.0);
        assert_eq!(config.reminder_count(f64::INFINITY), 0);
        assert_eq!(config.reminder_count(f64::NAN), 0);
    }

    #[tokio::test]
    async fn test_tiny_gap_reports_false_without_registering() {
        let (scheduler, channel) = scheduler();
        let config = ReminderConfig::healthy("u1", 2000.0, 1e-20, 250.0);

        assert!(!scheduler.schedule(&config).await);
        assert!(channel.pending().is_empty());
        assert!(scheduler.handles(ReminderClass::Healthy).is_empty());
    }

    /// Memory channel that yields to the runtime inside every registration
    struct YieldingChannel(MemoryPushChannel);

    #[async_trait::async_trait]
    impl PushChannel for YieldingChannel {
        async fn send_now(&self, message: PushMessage) -> Result<(), PushError> {
            self.0.send_now(message).await
        }

        async fn schedule(&self, message: PushMessage, delay: Duration) -> Result<ScheduleHandle, PushError> {
            tokio::task::yield_now().await;
            self.0.schedule(message, delay).await
        }

        async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), PushError> {
            tokio::task::yield_now().await;
            self.0.cancel(handle).await
        }

        async fn cancel_all(&self) -> Result<(), PushError> {
            self.0.cancel_all().await
        }

        async fn scheduled_count(&self) -> Result<usize, PushError> {
            self.0.scheduled_count().await
        }
    }

    #[tokio::test]
    async fn test_overlapping_schedules_leave_one_set() {
        let channel = Arc::new(YieldingChannel(MemoryPushChannel::new()));
        let scheduler = ReminderScheduler::new(channel.clone(), DEFAULT_WAKING_WINDOW_HOURS);
        let config = ReminderConfig::healthy("u1", 2000.0, 4.0, 250.0);

        let (a, b) = tokio::join!(scheduler.schedule(&config), scheduler.schedule(&config));
        assert!(a && b);
        assert_eq!(scheduler.count().await, 4);
        assert_eq!(scheduler.handles(ReminderClass::Healthy).len(), 4);

        scheduler.cancel(ReminderClass::Healthy).await;
        assert_eq!(scheduler.count().await, 0);
    }

    #[tokio::test]
    async fn test_schedule_registers_ordered_offsets() {
        let (scheduler, channel) = scheduler();
        let config = ReminderConfig::medical("u1", 2500.0, 4.0, 300.0, "kidney stones");

        assert!(scheduler.schedule(&config).await);
        assert_eq!(scheduler.handles(ReminderClass::Medical).len(), 4);
        assert_eq!(scheduler.count().await, 4);

        let pending = channel.pending();
        let numbers: Vec<u64> = pending
            .iter()
            .map(|(_, m)| m.payload["reminderNumber"].as_u64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(pending[0].1.payload["condition"], "kidney stones");
        assert_eq!(pending[0].1.payload["ownerId"], "u1");
        assert!(pending[0].1.body.contains("kidney stones"));
        assert_eq!(config.offset(4), Duration::from_secs(16 * 3600));
    }

    #[tokio::test]
    async fn test_reschedule_replaces_previous_set() {
        let (scheduler, _channel) = scheduler();
        let config = ReminderConfig::healthy("u1", 2000.0, 4.0, 250.0);

        assert!(scheduler.schedule(&config).await);
        let first = scheduler.handles(ReminderClass::Healthy);
        assert!(scheduler.schedule(&config).await);
        let second = scheduler.handles(ReminderClass::Healthy);

        assert_eq!(second.len(), 4);
        assert!(first.iter().all(|h| !second.contains(h)));
        assert_eq!(scheduler.count().await, 4);
    }

    #[tokio::test]
    async fn test_classes_are_tracked_separately() {
        let (scheduler, _channel) = scheduler();
        scheduler.schedule(&ReminderConfig::healthy("u1", 2000.0, 4.0, 250.0)).await;
        scheduler.schedule(&ReminderConfig::medical("u1", 2000.0, 8.0, 500.0, "gout")).await;
        assert_eq!(scheduler.count().await, 6);

        scheduler.cancel(ReminderClass::Healthy).await;
        assert_eq!(scheduler.count().await, 2);
        assert!(scheduler.handles(ReminderClass::Healthy).is_empty());

        // Nothing scheduled: no-op
        scheduler.cancel(ReminderClass::Healthy).await;

        scheduler.cancel_all().await;
        assert_eq!(scheduler.count().await, 0);
        assert!(scheduler.handles(ReminderClass::Medical).is_empty());
    }

    #[tokio::test]
    async fn test_failure_reports_false_and_keeps_partial_handles() {
        let (scheduler, channel) = scheduler();
        channel.fail_schedules_after(2);

        let config = ReminderConfig::healthy("u1", 2000.0, 2.0, 250.0);
        assert!(!scheduler.schedule(&config).await);
        assert_eq!(scheduler.handles(ReminderClass::Healthy).len(), 2);

        scheduler.cancel(ReminderClass::Healthy).await;
        assert_eq!(scheduler.count().await, 0);
    }

    #[tokio::test]
    async fn test_unavailable_platform_degrades() {
        let scheduler = ReminderScheduler::new(Arc::new(NoopPushChannel), DEFAULT_WAKING_WINDOW_HOURS);
        let config = ReminderConfig::healthy("u1", 2000.0, 4.0, 250.0);

        assert!(!scheduler.schedule(&config).await);
        assert_eq!(scheduler.count().await, 0);
        scheduler.cancel(ReminderClass::Healthy).await;
        scheduler.cancel_all().await;
    }

    #[tokio::test]
    async fn test_invalid_gap_reports_false() {
        let (scheduler, _channel) = scheduler();
        let config = ReminderConfig::healthy("u1", 2000.0, -1.0, 250.0);
        assert!(!scheduler.schedule(&config).await);
    }
}

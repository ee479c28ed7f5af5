// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Notification engine - the application's single context object

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, FixedOffset, Local};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{EngineStats, Scheduler, SubscriptionId};
use crate::config::Config;
use crate::notifications::{
    NoopPushChannel, Notification, NotificationKind, NotificationStore, PushChannel, PushGate,
    PushOutcome, QuietHours,
};
use crate::reminders::{ReminderClass, ReminderConfig, ReminderScheduler};
use crate::rules::{RuleEngine, RuleInput};
use crate::sensors::{DailyStats, SensorSnapshot};

/// Debounce key for sensor-driven evaluation
pub const SENSOR_DEBOUNCE_KEY: &str = "sensor";

/// Outcome of one rule evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub quiet_hours: bool,
    pub active: usize,
    pub pushes: Vec<(NotificationKind, PushOutcome)>,
}

struct EngineInner {
    store: NotificationStore,
    rules: RuleEngine,
    gate: PushGate,
    stats: Mutex<EngineStats>,
}

impl EngineInner {
    async fn process(
        &self,
        snapshot: &SensorSnapshot,
        stats: &DailyStats,
        quiet_hours: QuietHours,
        now: DateTime<FixedOffset>,
    ) -> EvaluationReport {
        let quiet = quiet_hours.is_active(&now);
        let input = RuleInput {
            snapshot,
            stats,
            quiet_hours: quiet,
            now,
        };
        let requests = self.rules.evaluate(&self.store, &input);

        let mut pushes = Vec::with_capacity(requests.len());
        for request in requests {
            let outcome = self
                .gate
                .try_send(request.kind.as_str(), &request.title, &request.body, request.payload)
                .await;
            pushes.push((request.kind, outcome));
        }

        {
            let mut engine_stats = self.stats.lock();
            engine_stats.evaluations += 1;
            engine_stats.last_processed = self.rules.last_processed();
            for (_, outcome) in &pushes {
                match outcome {
                    PushOutcome::Sent => engine_stats.pushes_sent += 1,
                    PushOutcome::Skipped => engine_stats.pushes_skipped += 1,
                    PushOutcome::Failed => engine_stats.pushes_failed += 1,
                    PushOutcome::Unavailable => {}
                }
            }
        }

        let report = EvaluationReport {
            quiet_hours: quiet,
            active: self.store.len(),
            pushes,
        };
        debug!("Evaluation complete: {:?}", report);
        report
    }
}

/// Derives active notifications from sensor data, escalates pushes and
/// manages scheduled reminders.
///
/// Construct one per application and share it by `Arc`. Sensor updates
/// must be submitted from within a tokio runtime.
pub struct NotificationEngine {
    inner: Arc<EngineInner>,
    debouncer: Scheduler,
    debounce: Duration,
    reminders: ReminderScheduler,
}

impl NotificationEngine {
    /// Build an engine. Without a channel, or with push disabled in the
    /// config, the no-op channel is used and every push path degrades.
    pub fn new(config: &Config, channel: Option<Arc<dyn PushChannel>>) -> Self {
        let channel: Arc<dyn PushChannel> = match channel {
            Some(channel) if config.engine.push_enabled => channel,
            _ => Arc::new(NoopPushChannel),
        };
        info!(
            "Notification engine ready (push available: {}, debounce: {:?})",
            channel.is_available(),
            config.engine.debounce()
        );

        Self {
            inner: Arc::new(EngineInner {
                store: NotificationStore::new(),
                rules: RuleEngine::new(),
                gate: PushGate::new(channel.clone(), config.engine.push_cooldown()),
                stats: Mutex::new(EngineStats::default()),
            }),
            debouncer: Scheduler::new(),
            debounce: config.engine.debounce(),
            reminders: ReminderScheduler::new(channel, config.reminders.waking_window_hours),
        }
    }

    /// Submit a sensor update. Bursts within the debounce delay collapse
    /// into a single evaluation of the last update.
    pub fn update_from_sensor_data(&self, snapshot: SensorSnapshot, stats: DailyStats, quiet_hours: QuietHours) {
        let inner = self.inner.clone();
        self.debouncer.debounce(SENSOR_DEBOUNCE_KEY, self.debounce, async move {
            let now = Local::now().fixed_offset();
            inner.process(&snapshot, &stats, quiet_hours, now).await;
        });
    }

    /// Evaluate immediately, bypassing the debounce
    pub async fn evaluate_now(
        &self,
        snapshot: &SensorSnapshot,
        stats: &DailyStats,
        quiet_hours: QuietHours,
        now: DateTime<FixedOffset>,
    ) -> EvaluationReport {
        self.inner.process(snapshot, stats, quiet_hours, now).await
    }

    pub fn has_pending_update(&self) -> bool {
        self.debouncer.is_pending(SENSOR_DEBOUNCE_KEY)
    }

    pub fn active_notifications(&self) -> Vec<Notification> {
        self.inner.store.snapshot()
    }

    pub fn has_active_notification(&self, kind: NotificationKind) -> bool {
        self.inner.store.contains(kind)
    }

    pub fn clear_notification(&self, id: &str) -> bool {
        self.inner.store.remove_by_id(id)
    }

    pub fn clear_notifications_by_type(&self, kind: NotificationKind) -> usize {
        self.inner.store.clear_by_type(kind)
    }

    pub fn clear_all_notifications(&self) {
        self.inner.store.clear_all();
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        self.inner.store.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.store.unsubscribe(id)
    }

    pub async fn schedule_hydration_reminders(&self, config: &ReminderConfig) -> bool {
        self.reminders.schedule(config).await
    }

    pub async fn cancel_scheduled_reminders(&self, class: ReminderClass) {
        self.reminders.cancel(class).await;
    }

    pub async fn cancel_all_scheduled_reminders(&self) {
        self.reminders.cancel_all().await;
    }

    pub async fn scheduled_count(&self) -> usize {
        self.reminders.count().await
    }

    pub fn stats(&self) -> EngineStats {
        self.inner.stats.lock().clone()
    }

    /// Cancel pending timers and drop every subscriber
    pub fn shutdown(&self) {
        let pending = self.debouncer.pending_count();
        self.debouncer.cancel_all();
        let subscribers = self.inner.store.clear_subscribers();
        info!(
            "Notification engine shut down ({} pending update(s) cancelled, {} subscriber(s) dropped)",
            pending, subscribers
        );
    }
}

// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Push notification collaborator interface

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info};

/// Priority hint passed to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushPriority {
    Default,
    High,
}

/// Outbound push message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub priority: PushPriority,
    pub payload: serde_json::Value,
}

impl PushMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            priority: PushPriority::High,
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_priority(mut self, priority: PushPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Opaque handle for a scheduled item, issued by the platform
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScheduleHandle(pub String);

impl fmt::Display for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Push collaborator errors
#[derive(Error, Debug)]
pub enum PushError {
    #[error("push notifications are not available on this platform")]
    Unavailable,

    #[error("push delivery failed: {0}")]
    Delivery(String),

    #[error("scheduling failed: {0}")]
    Schedule(String),

    #[error("unknown schedule handle: {0}")]
    UnknownHandle(ScheduleHandle),
}

/// Platform push/scheduling primitives.
///
/// All calls are fire-and-forget from the engine's point of view; callers
/// log failures and degrade rather than propagate.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Whether the platform supports push at all
    fn is_available(&self) -> bool {
        true
    }

    /// Deliver immediately
    async fn send_now(&self, message: PushMessage) -> Result<(), PushError>;

    /// Deliver once after `delay`
    async fn schedule(&self, message: PushMessage, delay: Duration) -> Result<ScheduleHandle, PushError>;

    async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), PushError>;

    async fn cancel_all(&self) -> Result<(), PushError>;

    /// Live count of every scheduled item
    async fn scheduled_count(&self) -> Result<usize, PushError>;
}

/// Stand-in used when the platform has no push support
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPushChannel;

#[async_trait]
impl PushChannel for NoopPushChannel {
    fn is_available(&self) -> bool {
        false
    }

    async fn send_now(&self, _message: PushMessage) -> Result<(), PushError> {
        Err(PushError::Unavailable)
    }

    async fn schedule(&self, _message: PushMessage, _delay: Duration) -> Result<ScheduleHandle, PushError> {
        Err(PushError::Unavailable)
    }

    async fn cancel(&self, _handle: &ScheduleHandle) -> Result<(), PushError> {
        Err(PushError::Unavailable)
    }

    async fn cancel_all(&self) -> Result<(), PushError> {
        Err(PushError::Unavailable)
    }

    async fn scheduled_count(&self) -> Result<usize, PushError> {
        Err(PushError::Unavailable)
    }
}

#[derive(Debug, Clone)]
struct ScheduledItem {
    message: PushMessage,
    due: Instant,
}

#[derive(Debug, Default)]
struct MemoryState {
    sent: Vec<PushMessage>,
    scheduled: BTreeMap<ScheduleHandle, ScheduledItem>,
    next_handle: u64,
    fail_after: Option<usize>,
}

/// In-process push channel.
///
/// Records immediate sends and keeps scheduled items until they are
/// cancelled or their delay elapses. Used by the headless runner and tests.
#[derive(Debug, Default)]
pub struct MemoryPushChannel {
    state: Mutex<MemoryState>,
}

impl MemoryPushChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `schedule` call after the first `n` fail
    pub fn fail_schedules_after(&self, n: usize) {
        self.state.lock().fail_after = Some(n);
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.state.lock().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.state.lock().sent.len()
    }

    /// Pending scheduled messages in handle order
    pub fn pending(&self) -> Vec<(ScheduleHandle, PushMessage)> {
        let mut state = self.state.lock();
        Self::expire(&mut state);
        state
            .scheduled
            .iter()
            .map(|(handle, item)| (handle.clone(), item.message.clone()))
            .collect()
    }

    fn expire(state: &mut MemoryState) {
        let now = Instant::now();
        state.scheduled.retain(|_, item| item.due > now);
    }
}

#[async_trait]
impl PushChannel for MemoryPushChannel {
    async fn send_now(&self, message: PushMessage) -> Result<(), PushError> {
        info!("🔔 {}: {}", message.title, message.body);
        self.state.lock().sent.push(message);
        Ok(())
    }

    async fn schedule(&self, message: PushMessage, delay: Duration) -> Result<ScheduleHandle, PushError> {
        let mut state = self.state.lock();
        Self::expire(&mut state);

        if let Some(limit) = state.fail_after {
            if state.next_handle as usize >= limit {
                return Err(PushError::Schedule("scheduler rejected request".to_string()));
            }
        }

        let handle = ScheduleHandle(format!("sched-{:06}", state.next_handle));
        state.next_handle += 1;
        debug!("Scheduled {} in {:?}: {}", handle, delay, message.title);
        state.scheduled.insert(
            handle.clone(),
            ScheduledItem {
                message,
                due: Instant::now() + delay,
            },
        );
        Ok(handle)
    }

    async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), PushError> {
        match self.state.lock().scheduled.remove(handle) {
            Some(_) => Ok(()),
            None => Err(PushError::UnknownHandle(handle.clone())),
        }
    }

    async fn cancel_all(&self) -> Result<(), PushError> {
        self.state.lock().scheduled.clear();
        Ok(())
    }

    async fn scheduled_count(&self) -> Result<usize, PushError> {
        let mut state = self.state.lock();
        Self::expire(&mut state);
        Ok(state.scheduled.len())
    }
}

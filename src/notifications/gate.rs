// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Push dispatch gate - per-type cooldown for outbound pushes

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::push::{PushChannel, PushMessage, PushPriority};

/// Default minimum interval between two pushes of the same type
pub const DEFAULT_PUSH_COOLDOWN: Duration = Duration::from_secs(5 * 60);

const PUSH_KEY_SUFFIX: &str = "-push";

/// Result of a gated send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushOutcome {
    Sent,
    /// Same type was pushed within the cooldown window
    Skipped,
    /// Platform has no push support
    Unavailable,
    /// Platform rejected the send; cooldown still applies
    Failed,
}

/// Deduplicates pushes per logical type within a cooldown window.
///
/// Keys are independent of the active store: the logical type is suffixed
/// so store keys and gate keys never collide.
pub struct PushGate {
    channel: Arc<dyn PushChannel>,
    cooldown: Duration,
    suppressed_until: Mutex<HashMap<String, Instant>>,
}

impl PushGate {
    pub fn new(channel: Arc<dyn PushChannel>, cooldown: Duration) -> Self {
        Self {
            channel,
            cooldown,
            suppressed_until: Mutex::new(HashMap::new()),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn push_key(logical_type: &str) -> String {
        format!("{}{}", logical_type, PUSH_KEY_SUFFIX)
    }

    /// Whether `logical_type` is still inside its cooldown window
    pub fn is_cooling_down(&self, logical_type: &str) -> bool {
        let key = Self::push_key(logical_type);
        self.suppressed_until
            .lock()
            .get(&key)
            .map_or(false, |until| *until > Instant::now())
    }

    pub async fn try_send(
        &self,
        logical_type: &str,
        title: &str,
        body: &str,
        payload: serde_json::Value,
    ) -> PushOutcome {
        if !self.channel.is_available() {
            return PushOutcome::Unavailable;
        }

        let key = Self::push_key(logical_type);
        {
            let mut suppressed = self.suppressed_until.lock();
            let now = Instant::now();
            suppressed.retain(|_, until| *until > now);

            if suppressed.contains_key(&key) {
                debug!("Push for {} skipped (cooldown)", logical_type);
                return PushOutcome::Skipped;
            }
            suppressed.insert(key, now + self.cooldown);
        }

        let message = PushMessage::new(title, body)
            .with_priority(PushPriority::High)
            .with_payload(payload);

        match self.channel.send_now(message).await {
            Ok(()) => {
                debug!("Push sent for {}", logical_type);
                PushOutcome::Sent
            }
            Err(e) => {
                warn!("Push for {} failed: {}", logical_type, e);
                PushOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::push::{MemoryPushChannel, NoopPushChannel};

    fn gate() -> (PushGate, Arc<MemoryPushChannel>) {
        let channel = Arc::new(MemoryPushChannel::new());
        (PushGate::new(channel.clone(), DEFAULT_PUSH_COOLDOWN), channel)
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_send_within_cooldown_is_skipped() {
        let (gate, channel) = gate();
        let payload = serde_json::json!({ "type": "low-water" });

        assert_eq!(gate.try_send("low-water", "t", "b", payload.clone()).await, PushOutcome::Sent);
        assert_eq!(gate.try_send("low-water", "t", "b", payload).await, PushOutcome::Skipped);
        assert_eq!(channel.sent_count(), 1);
        assert!(gate.is_cooling_down("low-water"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_expires_without_reset() {
        let (gate, channel) = gate();
        gate.try_send("drink-reminder", "t", "b", serde_json::Value::Null).await;

        tokio::time::advance(DEFAULT_PUSH_COOLDOWN + Duration::from_secs(1)).await;
        assert!(!gate.is_cooling_down("drink-reminder"));
        assert_eq!(
            gate.try_send("drink-reminder", "t", "b", serde_json::Value::Null).await,
            PushOutcome::Sent
        );
        assert_eq!(channel.sent_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_types_cool_down_independently() {
        let (gate, channel) = gate();
        gate.try_send("low-water", "t", "b", serde_json::Value::Null).await;
        assert_eq!(
            gate.try_send("goal-achieved", "t", "b", serde_json::Value::Null).await,
            PushOutcome::Sent
        );
        assert_eq!(channel.sent_count(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_channel_is_silent() {
        let gate = PushGate::new(Arc::new(NoopPushChannel), DEFAULT_PUSH_COOLDOWN);
        assert_eq!(
            gate.try_send("low-water", "t", "b", serde_json::Value::Null).await,
            PushOutcome::Unavailable
        );
        assert!(!gate.is_cooling_down("low-water"));
    }

    #[test]
    fn test_push_key_is_suffixed() {
        assert_eq!(PushGate::push_key("low-water"), "low-water-push");
    }
}

//! Core engine module - wires the store, rules, push gate and reminders

mod engine;
mod scheduler;
mod event_bus;

pub use engine::{EvaluationReport, NotificationEngine, SENSOR_DEBOUNCE_KEY};
pub use scheduler::Scheduler;
pub use event_bus::{EventBus, Listener, SubscriptionId};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Engine-wide counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    pub evaluations: u64,
    pub pushes_sent: u64,
    pub pushes_skipped: u64,
    pub pushes_failed: u64,
    pub last_processed: Option<DateTime<FixedOffset>>,
}

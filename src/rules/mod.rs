// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Sensor rule engine
//!
//! Translates one sensor snapshot plus the day's intake statistics into
//! active-store mutations and a list of push escalations. Each category
//! decides its own upserts and clears and never touches another
//! category's kinds:
//!
//! | Category    | Kinds                                      | Push                     |
//! |-------------|--------------------------------------------|--------------------------|
//! | bottle      | `low-water`, `medium-water`                | low-water, always        |
//! | temperature | `warm-water`, `cold-water`                 | never                    |
//! | hydration   | `drink-reminder`                           | after 2h, always         |
//! | progress    | `goal-achieved`, `almost-there`, `low-progress` | goal, first time only |
//! | connection  | `disconnected`                             | never                    |
//!
//! Quiet hours suppress new advisory entries (and clear the ones already
//! shown) except for the low-water and drink-reminder alerts.

mod bottle;
mod temperature;
mod hydration;
mod progress;
mod connection;

use chrono::{DateTime, FixedOffset};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::notifications::{NotificationKind, NotificationStore};
use crate::sensors::{DailyStats, SensorSnapshot};

/// Inputs for one evaluation
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub snapshot: &'a SensorSnapshot,
    pub stats: &'a DailyStats,
    pub quiet_hours: bool,
    /// Local wall-clock time of the evaluation
    pub now: DateTime<FixedOffset>,
}

/// A push the rules want escalated, subject to the push gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub payload: serde_json::Value,
}

impl PushRequest {
    fn new(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
            payload: serde_json::json!({
                "type": kind.as_str(),
                "category": kind.default_category(),
                "sensorBased": kind.is_sensor_based(),
            }),
        }
    }
}

/// Stateless apart from last-processed bookkeeping; every call
/// re-evaluates fully from its inputs and the store's contents.
#[derive(Debug, Default)]
pub struct RuleEngine {
    last_processed: Mutex<Option<DateTime<FixedOffset>>>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, store: &NotificationStore, input: &RuleInput<'_>) -> Vec<PushRequest> {
        let mut pushes = Vec::new();

        bottle::evaluate(store, input, &mut pushes);
        temperature::evaluate(store, input);
        hydration::evaluate(store, input, &mut pushes);
        progress::evaluate(store, input, &mut pushes);
        connection::evaluate(store, input);

        *self.last_processed.lock() = Some(input.now);
        debug!(
            "Rules evaluated: {} active, {} push request(s), quiet={}",
            store.len(),
            pushes.len(),
            input.quiet_hours
        );
        pushes
    }

    pub fn last_processed(&self) -> Option<DateTime<FixedOffset>> {
        *self.last_processed.lock()
    }
}

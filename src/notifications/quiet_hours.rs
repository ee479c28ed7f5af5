// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Quiet hours evaluation

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Check if `hour` falls inside the window `[start, end)`.
///
/// When `start >= end` the window wraps midnight (e.g. 22 -> 7).
/// Hours are not range-checked.
pub fn in_quiet_hours(hour: u32, start: u32, end: u32) -> bool {
    if start < end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    }
}

/// Quiet hours window as configured by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    pub enabled: bool,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            enabled: false,
            start_hour: 22,
            end_hour: 7,
        }
    }
}

impl QuietHours {
    pub fn new(enabled: bool, start_hour: u32, end_hour: u32) -> Self {
        Self {
            enabled,
            start_hour,
            end_hour,
        }
    }

    /// Quiet hours that never apply
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_active_at_hour(&self, hour: u32) -> bool {
        self.enabled && in_quiet_hours(hour, self.start_hour, self.end_hour)
    }

    pub fn is_active<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> bool {
        self.is_active_at_hour(time.hour())
    }
}

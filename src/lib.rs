// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! SipSense - Smart Bottle Notification Engine
//!
//! Turns a stream of bottle sensor readings and daily intake statistics
//! into the set of notifications a user should currently see:
//! - One live notification per type, replaced in place and cleared when
//!   the condition resolves
//! - Quiet hours with wraparound windows (e.g. 22:00 - 07:00)
//! - Push escalation for urgent alerts with a per-type cooldown
//! - Debounced evaluation of sensor bursts
//! - Recurring hydration reminders registered with the platform scheduler
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    Notification Engine                        │
//! ├───────────────────────────────────────────────────────────────┤
//! │  sensor update → ┌──────────┐  ┌────────────┐  ┌───────────┐  │
//! │                  │ Debounce │→ │ Rule       │→ │ Push Gate │→ push
//! │                  └──────────┘  │ Engine     │  └───────────┘  │
//! │                                └────────────┘                 │
//! │                                      ↓                        │
//! │                         ┌──────────────────────┐              │
//! │                         │ Active Notifications │→ subscribers │
//! │                         └──────────────────────┘              │
//! │  reminder config → ┌────────────────────┐                     │
//! │                    │ Reminder Scheduler │→ platform scheduler │
//! │                    └────────────────────┘                     │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod core;
pub mod notifications;
pub mod rules;
pub mod reminders;
pub mod sensors;
pub mod config;

// Re-exports for convenience
pub use crate::config::Config;
pub use crate::core::{EngineStats, EvaluationReport, NotificationEngine, SubscriptionId};
pub use notifications::{
    MemoryPushChannel, NoopPushChannel, Notification, NotificationKind, PushChannel, QuietHours,
};
pub use reminders::{ReminderClass, ReminderConfig};
pub use sensors::{DailyStats, SensorSnapshot};

/// SipSense version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SipSense name
pub const NAME: &str = "SipSense";

// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Notification types and the draft record used for upserts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical notification type - unique key within the active store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    // Bottle
    LowWater,
    MediumWater,

    // Temperature
    WarmWater,
    ColdWater,

    // Hydration
    DrinkReminder,

    // Progress
    GoalAchieved,
    AlmostThere,
    LowProgress,

    // Connection
    Disconnected,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 9] = [
        NotificationKind::LowWater,
        NotificationKind::MediumWater,
        NotificationKind::WarmWater,
        NotificationKind::ColdWater,
        NotificationKind::DrinkReminder,
        NotificationKind::GoalAchieved,
        NotificationKind::AlmostThere,
        NotificationKind::LowProgress,
        NotificationKind::Disconnected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowWater => "low-water",
            Self::MediumWater => "medium-water",
            Self::WarmWater => "warm-water",
            Self::ColdWater => "cold-water",
            Self::DrinkReminder => "drink-reminder",
            Self::GoalAchieved => "goal-achieved",
            Self::AlmostThere => "almost-there",
            Self::LowProgress => "low-progress",
            Self::Disconnected => "disconnected",
        }
    }

    /// Category a kind belongs to when a draft does not say otherwise
    pub fn default_category(&self) -> Category {
        match self {
            Self::LowWater | Self::MediumWater => Category::Bottle,
            Self::WarmWater | Self::ColdWater => Category::Temperature,
            Self::DrinkReminder => Category::Hydration,
            Self::GoalAchieved => Category::Achievement,
            Self::AlmostThere | Self::LowProgress => Category::Progress,
            Self::Disconnected => Category::Connection,
        }
    }

    /// Whether the kind tracks a live reading rather than cumulative progress
    pub fn is_sensor_based(&self) -> bool {
        !matches!(
            self,
            Self::GoalAchieved | Self::AlmostThere | Self::LowProgress
        )
    }

    fn default_icon(&self) -> &'static str {
        match self {
            Self::LowWater => "bottle-empty",
            Self::MediumWater => "bottle-half",
            Self::WarmWater => "thermometer-high",
            Self::ColdWater => "snowflake",
            Self::DrinkReminder => "glass-water",
            Self::GoalAchieved => "trophy",
            Self::AlmostThere => "flag",
            Self::LowProgress => "trending-down",
            Self::Disconnected => "bluetooth-off",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display grouping, opaque to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bottle,
    Temperature,
    Hydration,
    Achievement,
    Progress,
    Connection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Advisory severity - no engine logic branches on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Critical,
}

/// Suggested user action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Refill,
    Drink,
    Connect,
}

/// A live notification held by the active store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub subtype: Option<String>,
    pub category: Category,
    pub icon: String,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    #[serde(rename = "notificationType")]
    pub severity: Severity,
    pub actionable: bool,
    pub action: Option<Action>,
    pub snoozeable: bool,
    pub sensor_based: bool,
    pub timestamp: DateTime<Utc>,
    pub updated: bool,
}

impl Notification {
    /// Build a fresh entry, filling unspecified fields with per-kind defaults
    pub(crate) fn create(id: String, draft: NotificationDraft, now: DateTime<Utc>) -> Self {
        let kind = draft.kind;
        let action = draft.action;
        Self {
            id,
            kind,
            subtype: draft.subtype,
            category: draft.category.unwrap_or_else(|| kind.default_category()),
            icon: draft.icon.unwrap_or_else(|| kind.default_icon().to_string()),
            title: draft.title.unwrap_or_default(),
            message: draft.message.unwrap_or_default(),
            priority: draft.priority.unwrap_or(Priority::Medium),
            severity: draft.severity.unwrap_or(Severity::Info),
            actionable: draft.actionable.unwrap_or(action.is_some()),
            action,
            snoozeable: draft.snoozeable.unwrap_or(false),
            sensor_based: draft.sensor_based.unwrap_or_else(|| kind.is_sensor_based()),
            timestamp: now,
            updated: false,
        }
    }

    /// Merge a draft into this entry. Fields set on the draft win.
    pub(crate) fn apply(&mut self, draft: NotificationDraft, now: DateTime<Utc>) {
        if let Some(subtype) = draft.subtype {
            self.subtype = Some(subtype);
        }
        if let Some(category) = draft.category {
            self.category = category;
        }
        if let Some(icon) = draft.icon {
            self.icon = icon;
        }
        if let Some(title) = draft.title {
            self.title = title;
        }
        if let Some(message) = draft.message {
            self.message = message;
        }
        if let Some(priority) = draft.priority {
            self.priority = priority;
        }
        if let Some(severity) = draft.severity {
            self.severity = severity;
        }
        if let Some(action) = draft.action {
            self.action = Some(action);
        }
        if let Some(actionable) = draft.actionable {
            self.actionable = actionable;
        }
        if let Some(snoozeable) = draft.snoozeable {
            self.snoozeable = snoozeable;
        }
        if let Some(sensor_based) = draft.sensor_based {
            self.sensor_based = sensor_based;
        }
        self.timestamp = now;
        self.updated = true;
    }
}

/// Partial notification written through `upsert`
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub subtype: Option<String>,
    pub category: Option<Category>,
    pub icon: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub priority: Option<Priority>,
    pub severity: Option<Severity>,
    pub actionable: Option<bool>,
    pub action: Option<Action>,
    pub snoozeable: Option<bool>,
    pub sensor_based: Option<bool>,
}

impl NotificationDraft {
    pub fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            subtype: None,
            category: None,
            icon: None,
            title: None,
            message: None,
            priority: None,
            severity: None,
            actionable: None,
            action: None,
            snoozeable: None,
            sensor_based: None,
        }
    }

    pub fn subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Mark actionable with a suggested action
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self.actionable = Some(true);
        self
    }

    pub fn actionable(mut self, actionable: bool) -> Self {
        self.actionable = Some(actionable);
        self
    }

    pub fn snoozeable(mut self, snoozeable: bool) -> Self {
        self.snoozeable = Some(snoozeable);
        self
    }

    pub fn sensor_based(mut self, sensor_based: bool) -> Self {
        self.sensor_based = Some(sensor_based);
        self
    }
}

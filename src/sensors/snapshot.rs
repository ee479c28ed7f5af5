// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Bottle sensor snapshot and daily intake statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One reading of the bottle's sensors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    /// Water level, percent of capacity
    pub water_level: f64,

    /// Water temperature in °C. Devices report numbers or strings;
    /// anything that is not a finite number is stored as `None`.
    #[serde(default, deserialize_with = "deserialize_temperature")]
    pub temperature: Option<f64>,

    pub connected: bool,

    #[serde(default)]
    pub last_drink: Option<DateTime<Utc>>,
}

impl SensorSnapshot {
    pub fn new(water_level: f64) -> Self {
        Self {
            water_level,
            temperature: None,
            connected: true,
            last_drink: None,
        }
    }

    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius).filter(|t| t.is_finite());
        self
    }

    /// Set temperature from a raw device string ("21.5", "NaN", "")
    pub fn with_raw_temperature(mut self, raw: &str) -> Self {
        self.temperature = parse_temperature(raw);
        self
    }

    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn with_last_drink(mut self, at: DateTime<Utc>) -> Self {
        self.last_drink = Some(at);
        self
    }

    /// Temperature if it is a usable number
    pub fn valid_temperature(&self) -> Option<f64> {
        self.temperature.filter(|t| t.is_finite())
    }
}

/// Parse a loosely formatted temperature reading
pub fn parse_temperature(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

fn deserialize_temperature<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().filter(|t| t.is_finite()),
        Some(serde_json::Value::String(s)) => parse_temperature(&s),
        _ => None,
    })
}

/// Cumulative intake for the current day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    /// Volume consumed today, ml
    pub consumed_ml: f64,
    /// Daily goal, ml. Zero or absent disables progress rules.
    #[serde(default)]
    pub goal_ml: Option<f64>,
}

impl DailyStats {
    pub fn new(consumed_ml: f64, goal_ml: f64) -> Self {
        Self {
            consumed_ml,
            goal_ml: Some(goal_ml),
        }
    }

    /// Progress towards the goal in percent, if a positive goal is set
    pub fn progress_percent(&self) -> Option<f64> {
        self.goal_ml
            .filter(|goal| *goal > 0.0)
            .map(|goal| self.consumed_ml / goal * 100.0)
    }
}

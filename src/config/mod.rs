// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Configuration module

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::notifications::QuietHours;
use crate::reminders::{ReminderClass, ReminderConfig, DEFAULT_WAKING_WINDOW_HOURS, MIN_GAP_HOURS};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Application version
    pub version: String,

    /// Log level
    pub log_level: String,

    /// Quiet hours window
    pub quiet_hours: QuietHours,

    /// Engine timing
    pub engine: EngineConfig,

    /// Reminder defaults
    pub reminders: ReminderSettings,

    /// Headless simulator
    pub simulator: SimulatorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "SipSense".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            quiet_hours: QuietHours::default(),
            engine: EngineConfig::default(),
            reminders: ReminderSettings::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            // Create parent directories
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.quiet_hours.start_hour > 23 || self.quiet_hours.end_hour > 23 {
            bail!(
                "quiet hours must be within 0-23, got {}-{}",
                self.quiet_hours.start_hour,
                self.quiet_hours.end_hour
            );
        }
        if !(self.reminders.default_gap_hours >= MIN_GAP_HOURS) {
            bail!("reminders.default_gap_hours must be at least one minute");
        }
        if !(self.reminders.waking_window_hours > 0.0 && self.reminders.waking_window_hours <= 24.0) {
            bail!("reminders.waking_window_hours must be within 0-24");
        }
        Ok(())
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("sipsense"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Engine timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Quiet period before a burst of sensor updates is evaluated
    pub debounce_ms: u64,

    /// Minimum interval between pushes of the same type
    pub push_cooldown_secs: u64,

    /// Use the platform push channel; when false the no-op channel is used
    pub push_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 2000,
            push_cooldown_secs: 300,
            push_enabled: true,
        }
    }
}

impl EngineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn push_cooldown(&self) -> Duration {
        Duration::from_secs(self.push_cooldown_secs)
    }
}

/// Reminder defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Hours of the day reminders are spread over
    pub waking_window_hours: f64,

    pub default_gap_hours: f64,

    pub default_amount_ml: f64,

    pub default_goal_ml: f64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            waking_window_hours: DEFAULT_WAKING_WINDOW_HOURS,
            default_gap_hours: 2.0,
            default_amount_ml: 250.0,
            default_goal_ml: 2000.0,
        }
    }
}

impl ReminderSettings {
    /// Reminder request built from the defaults
    pub fn reminder_config(&self, class: ReminderClass, owner_id: &str, condition: Option<String>) -> ReminderConfig {
        ReminderConfig {
            class,
            goal_ml: self.default_goal_ml,
            gap_hours: self.default_gap_hours,
            amount_ml: self.default_amount_ml,
            condition,
            owner_id: owner_id.to_string(),
        }
    }
}

/// Headless simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Bottle capacity, ml
    pub capacity_ml: f64,

    /// Daily goal, ml
    pub goal_ml: f64,

    /// Interval between simulated readings
    pub tick_interval_ms: u64,

    /// Number of readings to produce, 0 runs until Ctrl+C
    pub ticks: u64,

    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            capacity_ml: 750.0,
            goal_ml: 2000.0,
            tick_interval_ms: 3000,
            ticks: 0,
            seed: None,
        }
    }
}

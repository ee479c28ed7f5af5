//! Reminder module - recurring hydration reminders on the platform scheduler

mod scheduler;

pub use scheduler::{
    ReminderClass, ReminderConfig, ReminderScheduler, DEFAULT_WAKING_WINDOW_HOURS, MIN_GAP_HOURS,
};

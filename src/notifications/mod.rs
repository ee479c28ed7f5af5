//! Notification module - active store, quiet hours and push dispatch

mod model;
mod store;
mod quiet_hours;
mod push;
mod gate;

pub use model::*;
pub use store::NotificationStore;
pub use quiet_hours::{in_quiet_hours, QuietHours};
pub use push::{
    MemoryPushChannel, NoopPushChannel, PushChannel, PushError, PushMessage, PushPriority,
    ScheduleHandle,
};
pub use gate::{PushGate, PushOutcome, DEFAULT_PUSH_COOLDOWN};

//! Sensor module - bottle snapshots, daily stats and simulation

mod snapshot;
mod simulator;

pub use snapshot::{parse_temperature, DailyStats, SensorSnapshot};
pub use simulator::BottleSimulator;

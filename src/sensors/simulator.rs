// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Bottle simulator for demo/testing

use chrono::{DateTime, Utc};
use rand::prelude::*;
use rand_distr::Normal;

use super::{DailyStats, SensorSnapshot};

/// Simulates a smart bottle over a day: sips drain the bottle, refills top
/// it up, water temperature drifts and the link occasionally drops.
pub struct BottleSimulator {
    rng: StdRng,
    capacity_ml: f64,
    goal_ml: f64,

    // Simulation state
    level: f64,
    temperature: f64,
    ambient: f64,
    connected: bool,
    consumed_ml: f64,
    last_drink: Option<DateTime<Utc>>,
    sequence: u64,

    drink_probability: f64,
    disconnect_probability: f64,
    glitch_probability: f64,
}

impl BottleSimulator {
    pub fn new(capacity_ml: f64, goal_ml: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), capacity_ml, goal_ml)
    }

    /// Deterministic simulator for reproducible runs
    pub fn seeded(seed: u64, capacity_ml: f64, goal_ml: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), capacity_ml, goal_ml)
    }

    fn with_rng(rng: StdRng, capacity_ml: f64, goal_ml: f64) -> Self {
        Self {
            rng,
            capacity_ml,
            goal_ml,
            level: 100.0,
            temperature: 18.0,
            ambient: 22.0,
            connected: true,
            consumed_ml: 0.0,
            last_drink: None,
            sequence: 0,
            drink_probability: 0.25,
            disconnect_probability: 0.03,
            glitch_probability: 0.02,
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Advance the simulation by one tick ending at `now`
    pub fn step(&mut self, now: DateTime<Utc>) -> (SensorSnapshot, DailyStats) {
        self.sequence += 1;

        if self.rng.gen::<f64>() < self.drink_probability && self.level > 0.0 {
            let sip_ml = self.rng.gen_range(80.0..300.0_f64);
            let available_ml = self.level / 100.0 * self.capacity_ml;
            let taken = sip_ml.min(available_ml);
            self.level -= taken / self.capacity_ml * 100.0;
            self.consumed_ml += taken;
            self.last_drink = Some(now);
        }

        if self.level < 15.0 && self.rng.gen::<f64>() < 0.3 {
            self.level = 100.0;
            self.temperature = self.rng.gen_range(6.0..35.0);
        }

        // Relax towards ambient with some sensor noise
        let noise = Normal::new(0.0, 0.4).map(|n| self.rng.sample(n)).unwrap_or(0.0);
        self.temperature += (self.ambient - self.temperature) * 0.05 + noise;

        self.connected = if self.connected {
            self.rng.gen::<f64>() >= self.disconnect_probability
        } else {
            self.rng.gen::<f64>() < 0.3
        };

        let temperature = if self.rng.gen::<f64>() < self.glitch_probability {
            None
        } else {
            Some(self.temperature)
        };

        let snapshot = SensorSnapshot {
            water_level: self.level.clamp(0.0, 100.0),
            temperature,
            connected: self.connected,
            last_drink: self.last_drink,
        };
        let stats = DailyStats::new(self.consumed_ml, self.goal_ml);

        (snapshot, stats)
    }
}

// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Water level rules

use super::{PushRequest, RuleInput};
use crate::notifications::{
    Action, NotificationDraft, NotificationKind, NotificationStore, Priority, Severity,
};

pub const LOW_WATER_THRESHOLD: f64 = 25.0;
pub const MEDIUM_WATER_THRESHOLD: f64 = 50.0;

pub(super) fn evaluate(store: &NotificationStore, input: &RuleInput<'_>, pushes: &mut Vec<PushRequest>) {
    let level = input.snapshot.water_level;

    if level < LOW_WATER_THRESHOLD {
        let message = format!("Your bottle is at {:.0}%. Time to refill!", level);
        store.clear_by_type(NotificationKind::MediumWater);
        store.upsert(
            NotificationDraft::new(NotificationKind::LowWater)
                .title("Low Water Level")
                .message(message.clone())
                .priority(Priority::High)
                .severity(Severity::Critical)
                .action(Action::Refill)
                .sensor_based(true),
        );
        // Escalated even during quiet hours
        pushes.push(PushRequest::new(NotificationKind::LowWater, "💧 Low Water Alert", message));
    } else if level < MEDIUM_WATER_THRESHOLD && !input.quiet_hours {
        store.clear_by_type(NotificationKind::LowWater);
        store.upsert(
            NotificationDraft::new(NotificationKind::MediumWater)
                .title("Water Level Medium")
                .message(format!("Your bottle is at {:.0}%. Consider refilling soon.", level))
                .priority(Priority::Medium)
                .severity(Severity::Warning)
                .actionable(false)
                .sensor_based(true),
        );
    } else {
        store.clear_by_type(NotificationKind::LowWater);
        store.clear_by_type(NotificationKind::MediumWater);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::super::RuleEngine;
    use crate::notifications::{NotificationKind, NotificationStore};
    use crate::sensors::{DailyStats, SensorSnapshot};

    fn level(store: &NotificationStore, engine: &RuleEngine, level: f64, quiet: bool) -> usize {
        let snapshot = SensorSnapshot { water_level: level, ..calm_snapshot() };
        run(engine, store, &snapshot, &DailyStats::default(), quiet, noon()).len()
    }

    #[test]
    fn test_low_level_raises_low_water_and_push() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        assert_eq!(level(&store, &engine, 10.0, false), 1);
        assert!(store.contains(NotificationKind::LowWater));
        assert!(!store.contains(NotificationKind::MediumWater));

        let n = store.get(NotificationKind::LowWater).unwrap();
        assert!(n.actionable);
        assert!(n.message.contains("10%"));
    }

    #[test]
    fn test_low_level_pushes_during_quiet_hours() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();
        assert_eq!(level(&store, &engine, 5.0, true), 1);
        assert!(store.contains(NotificationKind::LowWater));
    }

    #[test]
    fn test_medium_level_outside_quiet_hours() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        level(&store, &engine, 10.0, false);
        assert_eq!(level(&store, &engine, 40.0, false), 0);
        assert!(store.contains(NotificationKind::MediumWater));
        assert!(!store.contains(NotificationKind::LowWater));
    }

    #[test]
    fn test_medium_level_cleared_in_quiet_hours() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        level(&store, &engine, 40.0, false);
        level(&store, &engine, 40.0, true);
        assert!(!store.contains(NotificationKind::MediumWater));
        assert!(!store.contains(NotificationKind::LowWater));
    }

    #[test]
    fn test_high_level_clears_both() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        level(&store, &engine, 10.0, false);
        level(&store, &engine, 80.0, false);
        assert!(store.is_empty());

        level(&store, &engine, 40.0, false);
        level(&store, &engine, 80.0, false);
        assert!(store.is_empty());
    }

    #[test]
    fn test_low_supersedes_medium() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        level(&store, &engine, 40.0, false);
        level(&store, &engine, 20.0, false);
        assert!(store.contains(NotificationKind::LowWater));
        assert!(!store.contains(NotificationKind::MediumWater));
    }

    #[test]
    fn test_threshold_boundaries() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        assert_eq!(level(&store, &engine, 25.0, false), 0);
        assert!(store.contains(NotificationKind::MediumWater));
        assert!(!store.contains(NotificationKind::LowWater));

        assert_eq!(level(&store, &engine, 50.0, false), 0);
        assert!(store.is_empty());

        assert_eq!(level(&store, &engine, 24.9, false), 1);
        assert!(store.contains(NotificationKind::LowWater));
    }
}

// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Time-since-last-drink rule. Not suppressed by quiet hours.

use chrono::{Duration, Utc};

use super::{PushRequest, RuleInput};
use crate::notifications::{
    Action, NotificationDraft, NotificationKind, NotificationStore, Priority, Severity,
};

pub const REMINDER_AFTER_HOURS: i64 = 1;
pub const PUSH_AFTER_HOURS: i64 = 2;

pub(super) fn evaluate(store: &NotificationStore, input: &RuleInput<'_>, pushes: &mut Vec<PushRequest>) {
    let Some(last_drink) = input.snapshot.last_drink else {
        return;
    };

    let elapsed = input.now.with_timezone(&Utc) - last_drink;
    if elapsed > Duration::hours(REMINDER_AFTER_HOURS) {
        let hours = elapsed.num_hours();
        let message = format!(
            "It's been {} hour{} since your last drink. Stay hydrated!",
            hours,
            if hours == 1 { "" } else { "s" }
        );

        store.upsert(
            NotificationDraft::new(NotificationKind::DrinkReminder)
                .title("Time to Drink!")
                .message(message.clone())
                .priority(Priority::High)
                .severity(Severity::Critical)
                .action(Action::Drink)
                .snoozeable(true)
                .sensor_based(true),
        );

        if elapsed > Duration::hours(PUSH_AFTER_HOURS) {
            pushes.push(PushRequest::new(NotificationKind::DrinkReminder, "💧 Time to Drink!", message));
        }
    } else {
        store.clear_by_type(NotificationKind::DrinkReminder);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::super::RuleEngine;
    use super::*;
    use crate::sensors::DailyStats;

    fn since(engine: &RuleEngine, store: &NotificationStore, minutes: i64, quiet: bool) -> Vec<PushRequest> {
        let now = noon();
        let snapshot = calm_snapshot().with_last_drink(now.with_timezone(&Utc) - Duration::minutes(minutes));
        run(engine, store, &snapshot, &DailyStats::default(), quiet, now)
    }

    #[test]
    fn test_recent_drink_no_reminder() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();
        assert!(since(&engine, &store, 60, false).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_reminder_after_an_hour_without_push() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        assert!(since(&engine, &store, 95, false).is_empty());
        let n = store.get(NotificationKind::DrinkReminder).unwrap();
        assert!(n.message.contains("1 hour since"));
        assert!(n.snoozeable);
        assert_eq!(n.action, Some(Action::Drink));
    }

    #[test]
    fn test_push_after_two_hours_even_in_quiet_hours() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        let pushes = since(&engine, &store, 200, true);
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].kind, NotificationKind::DrinkReminder);
        assert!(store.get(NotificationKind::DrinkReminder).unwrap().message.contains("3 hours"));
    }

    #[test]
    fn test_drinking_clears_reminder() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        since(&engine, &store, 130, false);
        since(&engine, &store, 5, false);
        assert!(!store.contains(NotificationKind::DrinkReminder));
    }

    #[test]
    fn test_missing_timestamp_leaves_store_untouched() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        since(&engine, &store, 130, false);
        run(&engine, &store, &calm_snapshot(), &DailyStats::default(), false, noon());
        assert!(store.contains(NotificationKind::DrinkReminder));
    }

    #[test]
    fn test_exactly_two_hours_reminds_without_push() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        assert!(since(&engine, &store, 120, false).is_empty());
        let n = store.get(NotificationKind::DrinkReminder).unwrap();
        assert!(n.message.contains("2 hours since"));

        assert_eq!(since(&engine, &store, 121, false).len(), 1);
    }
}

// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Bottle connectivity rule

use super::RuleInput;
use crate::notifications::{
    Action, NotificationDraft, NotificationKind, NotificationStore, Priority, Severity,
};

pub(super) fn evaluate(store: &NotificationStore, input: &RuleInput<'_>) {
    if !input.snapshot.connected && !input.quiet_hours {
        store.upsert(
            NotificationDraft::new(NotificationKind::Disconnected)
                .title("Bottle Disconnected")
                .message("Your smart bottle is not connected. Reconnect to keep tracking your intake.")
                .priority(Priority::Medium)
                .severity(Severity::Warning)
                .action(Action::Connect)
                .sensor_based(true),
        );
    } else {
        // Connected, or asleep during quiet hours
        store.clear_by_type(NotificationKind::Disconnected);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::super::RuleEngine;
    use super::*;
    use crate::sensors::DailyStats;

    #[test]
    fn test_disconnect_outside_quiet_hours() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();
        let snapshot = calm_snapshot().with_connected(false);

        run(&engine, &store, &snapshot, &DailyStats::default(), false, noon());
        let n = store.get(NotificationKind::Disconnected).unwrap();
        assert_eq!(n.action, Some(Action::Connect));
    }

    #[test]
    fn test_disconnect_hidden_in_quiet_hours() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();
        let snapshot = calm_snapshot().with_connected(false);

        run(&engine, &store, &snapshot, &DailyStats::default(), false, noon());
        run(&engine, &store, &snapshot, &DailyStats::default(), true, at_hour(23));
        assert!(!store.contains(NotificationKind::Disconnected));
    }

    #[test]
    fn test_reconnect_clears() {
        let engine = RuleEngine::new();
        let store = NotificationStore::new();

        run(&engine, &store, &calm_snapshot().with_connected(false), &DailyStats::default(), false, noon());
        run(&engine, &store, &calm_snapshot(), &DailyStats::default(), false, noon());
        assert!(store.is_empty());
    }
}

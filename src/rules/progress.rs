// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Daily goal progress rules

use chrono::Timelike;

use super::{PushRequest, RuleInput};
use crate::notifications::{
    Action, NotificationDraft, NotificationKind, NotificationStore, Priority, Severity,
};

pub const ALMOST_THERE_PERCENT: f64 = 75.0;
pub const LOW_PROGRESS_PERCENT: f64 = 25.0;
/// Low progress is only worth flagging with more than this many hours left
pub const LOW_PROGRESS_MIN_HOURS_LEFT: u32 = 2;

pub(super) fn evaluate(store: &NotificationStore, input: &RuleInput<'_>, pushes: &mut Vec<PushRequest>) {
    let Some(progress) = input.stats.progress_percent() else {
        return;
    };
    let hours_left = 24u32.saturating_sub(input.now.hour());

    if progress >= 100.0 {
        // Re-reaching the goal must not push again
        let message = format!("You've reached {:.0}% of your daily goal. Great job!", progress);
        let inserted = store.insert_if_absent(
            NotificationDraft::new(NotificationKind::GoalAchieved)
                .title("Daily Goal Achieved! 🎉")
                .message(message.clone())
                .priority(Priority::Medium)
                .severity(Severity::Success)
                .actionable(false)
                .sensor_based(false),
        );
        if inserted.is_some() {
            pushes.push(PushRequest::new(
                NotificationKind::GoalAchieved,
                "🎉 Daily Goal Achieved!",
                message,
            ));
        }
        store.clear_by_type(NotificationKind::AlmostThere);
        store.clear_by_type(NotificationKind::LowProgress);
        return;
    }

    // Below the goal again (new day or raised goal): allow re-achievement
    store.clear_by_type(NotificationKind::GoalAchieved);

    if progress >= ALMOST_THERE_PERCENT && !input.quiet_hours {
        let remaining = input.stats.goal_ml.unwrap_or_default() - input.stats.consumed_ml;
        store.upsert(
            NotificationDraft::new(NotificationKind::AlmostThere)
                .title("Almost There!")
                .message(format!(
                    "You're at {:.0}% of your daily goal. Just {:.0}ml to go!",
                    progress, remaining
                ))
                .priority(Priority::Medium)
                .severity(Severity::Info)
                .actionable(false)
                .sensor_based(false),
        );
        store.clear_by_type(NotificationKind::LowProgress);
    } else if progress < LOW_PROGRESS_PERCENT
        && !input.quiet_hours
        && hours_left > LOW_PROGRESS_MIN_HOURS_LEFT
    {
        store.upsert(
            NotificationDraft::new(NotificationKind::LowProgress)
                .title("Behind on Hydration")
                .message(format!(
                    "You're only at {:.0}% of your daily goal with {} hours left in the day.",
                    progress, hours_left
                ))
                .priority(Priority::Medium)
                .severity(Severity::Warning)
                .action(Action::Drink)
                .snoozeable(true)
                .sensor_based(false),
        );
        store.clear_by_type(NotificationKind::AlmostThere);
    } else {
        store.clear_by_type(NotificationKind::AlmostThere);
        store.clear_by_type(NotificationKind::LowProgress);
    }
}

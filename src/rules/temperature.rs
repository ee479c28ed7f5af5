// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Water temperature rules. Never pushed.

use super::RuleInput;
use crate::notifications::{NotificationDraft, NotificationKind, NotificationStore, Priority, Severity};

pub const WARM_THRESHOLD_C: f64 = 30.0;
pub const COLD_THRESHOLD_C: f64 = 10.0;

pub(super) fn evaluate(store: &NotificationStore, input: &RuleInput<'_>) {
    let temperature = input.snapshot.valid_temperature();

    match temperature {
        Some(t) if t > WARM_THRESHOLD_C && !input.quiet_hours => {
            store.upsert(
                NotificationDraft::new(NotificationKind::WarmWater)
                    .title("Water is Warm")
                    .message(format!(
                        "Water temperature is {:.1}°C. Consider adding ice or refreshing.",
                        t
                    ))
                    .priority(Priority::Low)
                    .severity(Severity::Info)
                    .actionable(false)
                    .sensor_based(true),
            );
            store.clear_by_type(NotificationKind::ColdWater);
        }
        Some(t) if t < COLD_THRESHOLD_C && !input.quiet_hours => {
            store.upsert(
                NotificationDraft::new(NotificationKind::ColdWater)
                    .title("Refreshing Cold Water")
                    .message(format!("Water is nice and cold at {:.1}°C. Perfect for hydration!", t))
                    .priority(Priority::Low)
                    .severity(Severity::Success)
                    .actionable(false)
                    .sensor_based(true),
            );
            store.clear_by_type(NotificationKind::WarmWater);
        }
        _ => {
            store.clear_by_type(NotificationKind::WarmWater);
            store.clear_by_type(NotificationKind::ColdWater);
        }
    }
}

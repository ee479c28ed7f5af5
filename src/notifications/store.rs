// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Active notification store - at most one live entry per kind

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use super::{Notification, NotificationDraft, NotificationKind};
use crate::core::{EventBus, SubscriptionId};

/// Keyed collection of live notifications with change subscribers.
///
/// Every mutation releases the entry lock before subscribers run, so
/// subscribers may query the store from their callback.
pub struct NotificationStore {
    entries: Mutex<HashMap<NotificationKind, Notification>>,
    bus: EventBus,
    sequence: AtomicU64,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            bus: EventBus::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Insert or merge a notification. Subscribers are notified once.
    pub fn upsert(&self, draft: NotificationDraft) -> Notification {
        self.upsert_at(draft, Utc::now())
    }

    pub fn upsert_at(&self, draft: NotificationDraft, now: DateTime<Utc>) -> Notification {
        let (written, snapshot) = {
            let mut entries = self.entries.lock();
            let written = match entries.get_mut(&draft.kind) {
                Some(existing) => {
                    existing.apply(draft, now);
                    existing.clone()
                }
                None => {
                    let id = self.generate_id(draft.kind, draft.subtype.as_deref(), now);
                    let created = Notification::create(id, draft, now);
                    entries.insert(created.kind, created.clone());
                    created
                }
            };
            (written, entries.values().cloned().collect::<Vec<_>>())
        };

        debug!(
            "Upserted notification {} ({}, updated={})",
            written.kind, written.id, written.updated
        );
        self.bus.publish(&snapshot);
        written
    }

    /// Insert `draft` only if no entry of its kind is live.
    ///
    /// Returns the created entry, or `None` (without notifying) when one
    /// already existed. The check and the insert happen under one lock.
    pub fn insert_if_absent(&self, draft: NotificationDraft) -> Option<Notification> {
        let now = Utc::now();
        let (created, snapshot) = {
            let mut entries = self.entries.lock();
            if entries.contains_key(&draft.kind) {
                return None;
            }
            let id = self.generate_id(draft.kind, draft.subtype.as_deref(), now);
            let created = Notification::create(id, draft, now);
            entries.insert(created.kind, created.clone());
            (created, entries.values().cloned().collect::<Vec<_>>())
        };

        debug!("Inserted notification {} ({})", created.kind, created.id);
        self.bus.publish(&snapshot);
        Some(created)
    }

    /// Remove one entry by id. Subscribers are notified only on success.
    pub fn remove_by_id(&self, id: &str) -> bool {
        let snapshot = {
            let mut entries = self.entries.lock();
            let kind = entries
                .iter()
                .find(|(_, n)| n.id == id)
                .map(|(kind, _)| *kind);
            match kind {
                Some(kind) => {
                    entries.remove(&kind);
                    entries.values().cloned().collect::<Vec<_>>()
                }
                None => return false,
            }
        };

        debug!("Removed notification {}", id);
        self.bus.publish(&snapshot);
        true
    }

    /// Remove every entry of `kind`, returning how many were removed
    pub fn clear_by_type(&self, kind: NotificationKind) -> usize {
        let (removed, snapshot) = {
            let mut entries = self.entries.lock();
            let before = entries.len();
            entries.retain(|_, n| n.kind != kind);
            let removed = before - entries.len();
            (removed, entries.values().cloned().collect::<Vec<_>>())
        };

        if removed > 0 {
            debug!("Cleared {} notification(s) of type {}", removed, kind);
            self.bus.publish(&snapshot);
        }
        removed
    }

    /// Empty the store. Subscribers are always notified.
    pub fn clear_all(&self) {
        self.entries.lock().clear();
        debug!("Cleared all notifications");
        self.bus.publish(&[]);
    }

    /// Current entries in no particular order
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.lock().values().cloned().collect()
    }

    pub fn get(&self, kind: NotificationKind) -> Option<Notification> {
        self.entries.lock().get(&kind).cloned()
    }

    pub fn contains(&self, kind: NotificationKind) -> bool {
        self.entries.lock().contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Drop every subscriber, returning how many there were
    pub fn clear_subscribers(&self) -> usize {
        self.bus.clear()
    }

    fn generate_id(&self, kind: NotificationKind, subtype: Option<&str>, now: DateTime<Utc>) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        match subtype {
            Some(subtype) => format!("{}-{}-{}-{}", kind, subtype, now.timestamp_millis(), seq),
            None => format!("{}-{}-{}", kind, now.timestamp_millis(), seq),
        }
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Subscriber registry for notification list changes

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::notifications::Notification;

/// Callback receiving the full current notification list
pub type Listener = Arc<dyn Fn(&[Notification]) + Send + Sync + 'static>;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

/// Observer registry. Listeners are invoked outside the registry lock,
/// so a listener may subscribe or unsubscribe without deadlocking.
pub struct EventBus {
    listeners: Mutex<BTreeMap<SubscriptionId, Listener>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().insert(id, Arc::new(listener));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.lock().remove(&id).is_some()
    }

    /// Drop every listener, returning how many were registered
    pub fn clear(&self) -> usize {
        let mut listeners = self.listeners.lock();
        let dropped = listeners.len();
        listeners.clear();
        dropped
    }

    pub fn publish(&self, notifications: &[Notification]) {
        let listeners: Vec<Listener> = self.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener(notifications);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_publish_reaches_every_listener() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            bus.subscribe(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }

        bus.publish(&[]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&[]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(bus.clear(), 0);
    }

    #[test]
    fn test_clear_reports_dropped_listeners() {
        let bus = EventBus::new();
        bus.subscribe(|_| {});
        bus.subscribe(|_| {});
        assert_eq!(bus.clear(), 2);
        assert_eq!(bus.clear(), 0);
    }
}

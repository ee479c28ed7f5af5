// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! Keyed debounce timers

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Single-flight debounce timers, one per key.
///
/// Arming a key aborts the pending timer for that key; keys are
/// independent. The armed job is detached from the timer once the delay
/// elapses, so re-arming never aborts a job that has already started.
pub struct Scheduler {
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// Run `job` after `delay` unless `key` is armed again first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn debounce<F>(&self, key: &str, delay: Duration, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let deadline = tokio::time::Instant::now() + delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tokio::spawn(job);
        });

        if let Some(previous) = self.timers.lock().insert(key.to_string(), timer) {
            if !previous.is_finished() {
                debug!("Debounce '{}' re-armed, dropping pending run", key);
            }
            previous.abort();
        }
    }

    /// Cancel the pending timer for `key`. Returns true if one was pending.
    pub fn cancel(&self, key: &str) -> bool {
        match self.timers.lock().remove(key) {
            Some(timer) => {
                let pending = !timer.is_finished();
                timer.abort();
                pending
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        let mut timers = self.timers.lock();
        for (key, timer) in timers.drain() {
            if !timer.is_finished() {
                debug!("Cancelled pending debounce '{}'", key);
            }
            timer.abort();
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.timers
            .lock()
            .get(key)
            .map_or(false, |timer| !timer.is_finished())
    }

    pub fn pending_count(&self) -> usize {
        self.timers.lock().values().filter(|t| !t.is_finished()).count()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for timer in self.timers.get_mut().values() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_last_job_once() {
        let scheduler = Scheduler::new();
        let runs = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let runs = runs.clone();
            scheduler.debounce("sensor", Duration::from_secs(2), async move {
                runs.lock().push(i);
            });
            tokio::time::advance(Duration::from_millis(200)).await;
        }

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(*runs.lock(), vec![2]);
        assert!(!scheduler.is_pending("sensor"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let scheduler = Scheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));

        for key in ["a", "b"] {
            let runs = runs.clone();
            scheduler.debounce(key, Duration::from_secs(1), async move {
                runs.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(scheduler.pending_count(), 2);

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_prevents_runs() {
        let scheduler = Scheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        scheduler.debounce("sensor", Duration::from_secs(2), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        scheduler.cancel_all();
        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(!scheduler.cancel("sensor"));
    }
}

// Bounded in-memory snapshot history. One writer (the worker), many readers (HTTP handlers).

use crate::models::Snapshot;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// 5 hours at one sample per second.
pub const DEFAULT_CAPACITY: usize = 300 * 60;

pub struct HistoryBuffer {
    capacity: usize,
    inner: Mutex<VecDeque<Arc<Snapshot>>>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryBuffer {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Every mutation under the guard is a single VecDeque call, so a poisoned deque is still whole.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Arc<Snapshot>>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends at the tail and drops the oldest entries in one step when over capacity.
    ///
    /// A timestamp older than the current tail (wall clock stepped back) is raised to the
    /// tail's timestamp so the sequence stays non-decreasing.
    pub fn push(&self, mut snapshot: Snapshot) {
        let mut guard = self.lock();
        if let Some(last) = guard.back()
            && snapshot.timestamp < last.timestamp
        {
            tracing::debug!(
                sampled = snapshot.timestamp,
                last = last.timestamp,
                "clock went backwards; clamping snapshot timestamp"
            );
            snapshot.timestamp = last.timestamp;
        }
        guard.push_back(Arc::new(snapshot));
        if guard.len() > self.capacity {
            let excess = guard.len() - self.capacity;
            guard.drain(..excess);
        }
    }

    /// Full history, oldest first. Entries are shared, so the guard is held only for
    /// reference-count bumps.
    pub fn snapshot(&self) -> Vec<Arc<Snapshot>> {
        let guard = self.lock();
        guard.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

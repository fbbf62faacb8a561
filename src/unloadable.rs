//! Retry bookkeeping for sessions whose stored data cannot be decoded.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use crate::key::SessionKey;

/// Per-key count of failed load attempts.
///
/// Counters live only in memory, so they bound retries within one process
/// lifetime. Incrementing creates the counter under the map's shard lock,
/// so concurrent failures for the same key are never lost.
#[derive(Debug, Default)]
pub struct UnloadableTracker {
    attempts: DashMap<SessionKey, AtomicU32>,
}

impl UnloadableTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more failed load of `key` and returns the new count.
    pub fn increment(&self, key: &SessionKey) -> u32 {
        self.attempts
            .entry(key.clone())
            .or_insert_with(|| AtomicU32::new(0))
            .fetch_add(1, Ordering::AcqRel)
            + 1
    }

    /// Failed loads recorded for `key`.
    pub fn attempts(&self, key: &SessionKey) -> u32 {
        self.attempts
            .get(key)
            .map(|count| count.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    /// True when `limit` is positive and `key` has failed at least `limit` times.
    pub fn is_exhausted(&self, key: &SessionKey, limit: i32) -> bool {
        limit > 0 && i64::from(self.attempts(key)) >= i64::from(limit)
    }

    pub fn clear(&self, key: &SessionKey) {
        self.attempts.remove(key);
    }

    pub fn clear_all(&self) {
        self.attempts.clear();
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}

//! Expiry windows for cluster-wide scavenging.
//!
//! A sweep never decides expiry against `now`. Sessions this node wrote are
//! reaped only once they expired before the previous sweep started (the
//! grace window), and sessions of any other node only once they expired
//! several sweep intervals before that (the ancient window). The arithmetic
//! lives here, free of I/O.

use std::sync::atomic::{AtomicI64, Ordering};

/// Default number of sweep intervals a foreign session must be expired for
/// before any node reaps it.
pub const DEFAULT_ANCIENT_MULTIPLIER: u32 = 3;

/// Expiry bounds for one sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScavengeWindows {
    /// Time elapsed since the previous sweep.
    pub interval: i64,
    /// Own-node sessions with expiry in `(0, grace_upper_bound]` are expired.
    pub grace_upper_bound: i64,
    /// Sessions of any node with expiry in `(0, bound]` are expired; `None`
    /// when the sweep history is too short to reach back that far.
    pub ancient_upper_bound: Option<i64>,
}

impl ScavengeWindows {
    /// Windows for a sweep at `now` following one at `last_scavenge_time`.
    ///
    /// Returns `None` for the first sweep ever (`last_scavenge_time == 0`),
    /// which must not expire anything.
    ///
    /// ```
    /// use tower_sessions_seaorm_cluster_store::scavenge::ScavengeWindows;
    ///
    /// assert!(ScavengeWindows::compute(1_000, 0, 3).is_none());
    ///
    /// let windows = ScavengeWindows::compute(10_000, 9_000, 3).unwrap();
    /// assert_eq!(windows.grace_upper_bound, 9_000);
    /// assert_eq!(windows.ancient_upper_bound, Some(6_000));
    /// ```
    pub fn compute(now: i64, last_scavenge_time: i64, ancient_multiplier: u32) -> Option<Self> {
        if last_scavenge_time == 0 {
            return None;
        }

        let interval = now - last_scavenge_time;
        let ancient = last_scavenge_time.saturating_sub(interval.saturating_mul(i64::from(ancient_multiplier)));

        Some(Self {
            interval,
            grace_upper_bound: last_scavenge_time,
            ancient_upper_bound: (ancient > 0).then_some(ancient),
        })
    }

    /// True when a session this node owns, expiring at `expiry`, is expired.
    pub fn in_grace_window(&self, expiry: i64) -> bool {
        expiry > 0 && expiry <= self.grace_upper_bound
    }

    /// True when a session of any node, expiring at `expiry`, is expired.
    pub fn in_ancient_window(&self, expiry: i64) -> bool {
        self.ancient_upper_bound
            .is_some_and(|bound| expiry > 0 && expiry <= bound)
    }
}

/// Time of the previous sweep, shared by all callers of one store.
#[derive(Debug, Default)]
pub struct ScavengeClock {
    last_scavenge_time: AtomicI64,
}

impl ScavengeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the previous sweep, `0` if none has run.
    pub fn last_scavenge_time(&self) -> i64 {
        self.last_scavenge_time.load(Ordering::Acquire)
    }

    /// Records the end of a sweep that started at `now`.
    pub fn record_sweep(&self, now: i64) {
        self.last_scavenge_time.store(now, Ordering::Release);
    }

    pub fn reset(&self) {
        self.last_scavenge_time.store(0, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sweep_has_no_windows() {
        assert_eq!(ScavengeWindows::compute(123_456, 0, 3), None);
    }

    #[test]
    fn test_grace_window_boundary() {
        let last = 50_000;
        let windows = ScavengeWindows::compute(60_000, last, 3).unwrap();

        assert!(windows.in_grace_window(last));
        assert!(!windows.in_grace_window(last + 1));
        assert!(!windows.in_grace_window(0));
        assert!(!windows.in_grace_window(-5));
    }

    #[test]
    fn test_ancient_window_boundary() {
        let (last, interval) = (100_000, 10_000);
        let windows = ScavengeWindows::compute(last + interval, last, 3).unwrap();
        let threshold = last - 3 * interval;

        assert_eq!(windows.interval, interval);
        assert_eq!(windows.ancient_upper_bound, Some(threshold));
        assert!(windows.in_ancient_window(threshold));
        assert!(!windows.in_ancient_window(threshold + 1));
    }

    #[test]
    fn test_short_history_skips_ancient_window() {
        // 3 * 500 >= 1_000
        let windows = ScavengeWindows::compute(1_500, 1_000, 3).unwrap();
        assert_eq!(windows.ancient_upper_bound, None);
        assert!(!windows.in_ancient_window(1));

        let exact = ScavengeWindows::compute(1_250, 1_000, 4).unwrap();
        assert_eq!(exact.ancient_upper_bound, None);
    }

    #[test]
    fn test_multiplier_widens_ancient_margin() {
        let narrow = ScavengeWindows::compute(110, 100, 1).unwrap();
        let wide = ScavengeWindows::compute(110, 100, 5).unwrap();

        assert_eq!(narrow.ancient_upper_bound, Some(90));
        assert_eq!(wide.ancient_upper_bound, Some(50));
    }

    #[test]
    fn test_clock_records_sweeps() {
        let clock = ScavengeClock::new();
        assert_eq!(clock.last_scavenge_time(), 0);

        clock.record_sweep(42);
        assert_eq!(clock.last_scavenge_time(), 42);

        clock.reset();
        assert_eq!(clock.last_scavenge_time(), 0);
    }
}

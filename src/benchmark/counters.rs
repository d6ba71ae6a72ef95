//! Shared progress counter and per-worker outcome tallies
//!
//! Besides the list under test, the progress counter is the only state a
//! benchmark run shares across threads. Workers bump it in batches with
//! relaxed ordering; the progress reporter merely observes it and
//! synchronizes nothing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::workload::Op;

/// Relaxed counters polled by the progress reporter
pub struct ProgressCounters {
    /// Total operations completed across all workers
    ops_finished: AtomicU64,

    /// Shutdown signal for the reporter thread
    shutdown: AtomicBool,
}

impl ProgressCounters {
    pub fn new() -> Self {
        Self {
            ops_finished: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Record a batch of completed operations
    #[inline]
    pub fn record_finished(&self, count: u64) {
        self.ops_finished.fetch_add(count, Ordering::Relaxed);
    }

    /// Current completed-operation count
    #[inline]
    pub fn finished(&self) -> u64 {
        self.ops_finished.load(Ordering::Relaxed)
    }

    /// Signal the progress reporter to stop
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Check if shutdown has been signaled
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

impl Default for ProgressCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Operation outcome counts for one worker
///
/// Workers tally locally; the orchestrator merges tallies into the final
/// result. Successful inserts minus successful deletes is exactly the net
/// change in set size, which the reconciliation checks rely on.
#[derive(Debug, Default, Clone)]
pub struct OpTally {
    pub inserts: u64,
    pub inserted: u64,
    pub deletes: u64,
    pub deleted: u64,
    pub searches: u64,
    pub search_hits: u64,
}

impl OpTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one operation and its outcome
    #[inline]
    pub fn record(&mut self, op: Op, outcome: bool) {
        match op {
            Op::Insert => {
                self.inserts += 1;
                if outcome {
                    self.inserted += 1;
                }
            }
            Op::Delete => {
                self.deletes += 1;
                if outcome {
                    self.deleted += 1;
                }
            }
            Op::Search => {
                self.searches += 1;
                if outcome {
                    self.search_hits += 1;
                }
            }
        }
    }

    /// Fold another worker's tally into this one
    pub fn merge(&mut self, other: &OpTally) {
        self.inserts += other.inserts;
        self.inserted += other.inserted;
        self.deletes += other.deletes;
        self.deleted += other.deleted;
        self.searches += other.searches;
        self.search_hits += other.search_hits;
    }

    /// Total operations tallied
    pub fn total(&self) -> u64 {
        self.inserts + self.deletes + self.searches
    }

    /// Net change in set size implied by the tallied outcomes
    pub fn net_inserted(&self) -> i64 {
        self.inserted as i64 - self.deleted as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_total() {
        let mut tally = OpTally::new();

        tally.record(Op::Insert, true);
        tally.record(Op::Insert, false);
        tally.record(Op::Delete, true);
        tally.record(Op::Search, false);

        assert_eq!(tally.inserts, 2);
        assert_eq!(tally.inserted, 1);
        assert_eq!(tally.deletes, 1);
        assert_eq!(tally.deleted, 1);
        assert_eq!(tally.searches, 1);
        assert_eq!(tally.search_hits, 0);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.net_inserted(), 0);
    }

    #[test]
    fn test_merge() {
        let mut a = OpTally::new();
        a.record(Op::Insert, true);
        a.record(Op::Search, true);

        let mut b = OpTally::new();
        b.record(Op::Delete, false);
        b.record(Op::Insert, true);

        a.merge(&b);
        assert_eq!(a.total(), 4);
        assert_eq!(a.inserted, 2);
        assert_eq!(a.deletes, 1);
        assert_eq!(a.deleted, 0);
        assert_eq!(a.net_inserted(), 2);
    }

    #[test]
    fn test_progress_counters() {
        let counters = ProgressCounters::new();

        counters.record_finished(100);
        counters.record_finished(50);
        assert_eq!(counters.finished(), 150);

        assert!(!counters.is_shutdown());
        counters.signal_shutdown();
        assert!(counters.is_shutdown());
    }
}

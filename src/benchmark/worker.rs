//! Benchmark worker loop
//!
//! Each worker owns its histogram and tally; the only shared state is the
//! list under test and the relaxed progress counter. Value and operation
//! index derive from the worker's global sequence number, so a run issues
//! the same operation stream regardless of thread interleaving.

use std::time::Instant;

use hdrhistogram::Histogram;

use super::counters::{OpTally, ProgressCounters};
use crate::list::ListOps;
use crate::workload::Mix;

/// Operations a worker completes between progress-counter updates.
///
/// Batching keeps the shared atomic off the hot path so the counter does
/// not distort the contention being measured.
const PROGRESS_BATCH: u64 = 1024;

/// Result from a worker thread
pub struct WorkerResult {
    /// Worker ID
    pub worker_id: usize,
    /// Local histogram of per-op latencies (nanoseconds)
    pub histogram: Histogram<u64>,
    /// Local operation outcome tally
    pub tally: OpTally,
    /// Operations performed
    pub ops: u64,
}

/// Fresh latency histogram: 1ns to 60s at 3 significant figures.
pub(crate) fn new_latency_histogram() -> Histogram<u64> {
    Histogram::new_with_bounds(1, 60_000_000_000, 3).expect("Failed to create histogram")
}

/// Run one worker's share of the benchmark.
///
/// Worker `i` performs `ops_per_worker` iterations; iteration `j` uses the
/// global sequence number `i * ops_per_worker + j` to derive the value
/// (modulo `value_range`) and the mix slot (modulo 10), then issues exactly
/// one list call through the mix.
pub fn run_worker<L: ListOps + ?Sized>(
    worker_id: usize,
    list: &L,
    mix: Mix,
    ops_per_worker: u64,
    value_range: u64,
    counters: &ProgressCounters,
) -> WorkerResult {
    let mut histogram = new_latency_histogram();
    let mut tally = OpTally::new();
    let mut unreported = 0u64;

    let base = worker_id as u64 * ops_per_worker;
    for j in 0..ops_per_worker {
        let seq = base + j;
        let value = (seq % value_range) as i64;
        let op_index = seq % 10;

        let start = Instant::now();
        let (op, outcome) = mix.apply(list, value, op_index);
        let elapsed = start.elapsed().as_nanos() as u64;

        // Clamp to the histogram floor; a sub-tick measurement reads as 0
        histogram.record(elapsed.max(1)).ok();
        tally.record(op, outcome);

        unreported += 1;
        if unreported == PROGRESS_BATCH {
            counters.record_finished(unreported);
            unreported = 0;
        }
    }
    if unreported > 0 {
        counters.record_finished(unreported);
    }

    WorkerResult {
        worker_id,
        histogram,
        tally,
        ops: ops_per_worker,
    }
}

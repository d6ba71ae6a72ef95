//! Benchmark orchestration and workers
//!
//! This module provides the multi-threaded benchmark execution system:
//! - ProgressCounters/OpTally: the only cross-thread bookkeeping
//! - run_worker: per-thread operation loop
//! - run_benchmark/Orchestrator: spawn workers, join, aggregate results

pub mod counters;
pub mod orchestrator;
pub mod worker;

pub use counters::{OpTally, ProgressCounters};
pub use orchestrator::{format_count, format_throughput, run_benchmark, BenchmarkResult, Orchestrator};
pub use worker::{run_worker, WorkerResult};

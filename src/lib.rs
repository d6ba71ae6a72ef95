//! lockbench library
//!
//! Microbenchmark harness comparing two concurrency-control disciplines on
//! a sorted singly-linked integer set: one coarse mutex around the whole
//! structure versus per-node mutexes acquired hand-over-hand.

pub mod benchmark;
pub mod config;
pub mod list;
pub mod metrics;
pub mod utils;
pub mod workload;

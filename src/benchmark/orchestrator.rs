//! Benchmark orchestrator
//!
//! Coordinates worker threads, collects results, and walks the benchmark
//! matrix (worker counts x mixes x list implementations).

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use super::counters::{OpTally, ProgressCounters};
use super::worker::{new_latency_histogram, run_worker};
use crate::config::BenchConfig;
use crate::list::{CoarseList, FineList, ListOps};
use crate::metrics::reporter::print_comparison;
use crate::utils::{BenchError, Result};
use crate::workload::Mix;

/// Result of one benchmark cell: one list, one mix, one worker count
pub struct BenchmarkResult {
    /// Implementation label ("coarse-grained" / "fine-grained")
    pub list_name: String,
    /// Mix the run used
    pub mix: Mix,
    /// Worker thread count
    pub worker_count: u32,
    /// Total operations completed
    pub total_ops: u64,
    /// Total duration
    pub duration: Duration,
    /// Throughput (operations per second)
    pub throughput: f64,
    /// Merged per-op latency histogram (nanoseconds)
    pub histogram: Histogram<u64>,
    /// Merged operation outcome tally
    pub tally: OpTally,
}

impl BenchmarkResult {
    /// Get percentile latency in microseconds
    pub fn percentile_us(&self, p: f64) -> f64 {
        self.histogram.value_at_percentile(p) as f64 / 1000.0
    }

    /// Mean latency in microseconds
    pub fn mean_us(&self) -> f64 {
        self.histogram.mean() / 1000.0
    }

    /// Max latency in microseconds
    pub fn max_us(&self) -> f64 {
        self.histogram.max() as f64 / 1000.0
    }

    /// Print summary (compact format)
    pub fn print_summary(&self) {
        println!(
            "  {:<15} {:>12} ops in {:>8.3}s | {:>12} ops/sec",
            self.list_name,
            format_count(self.total_ops),
            self.duration.as_secs_f64(),
            format_throughput(self.throughput),
        );
        println!(
            "  {:<15} latency (us): avg={:.2} p50={:.2} p99={:.2} max={:.2}",
            "",
            self.mean_us(),
            self.percentile_us(50.0),
            self.percentile_us(99.0),
            self.max_us(),
        );
        println!(
            "  {:<15} outcomes: {}/{} inserted, {}/{} deleted, {}/{} search hits",
            "",
            format_count(self.tally.inserted),
            format_count(self.tally.inserts),
            format_count(self.tally.deleted),
            format_count(self.tally.deletes),
            format_count(self.tally.search_hits),
            format_count(self.tally.searches),
        );
    }
}

/// Run one benchmark: spawn `worker_count` workers against `list`, wait
/// for all of them, and compute aggregate throughput.
///
/// The join loop is the synchronization barrier: every worker's writes are
/// visible once its handle joins, and the clock is read only after the
/// last join returns.
pub fn run_benchmark<L>(
    list_name: &str,
    list: Arc<L>,
    mix: Mix,
    worker_count: u32,
    ops_per_worker: u64,
    value_range: u64,
    counters: Arc<ProgressCounters>,
) -> Result<BenchmarkResult>
where
    L: ListOps + 'static,
{
    let mut handles = Vec::with_capacity(worker_count as usize);
    let start = Instant::now();

    for worker_id in 0..worker_count as usize {
        let list = Arc::clone(&list);
        let counters = Arc::clone(&counters);

        let handle = thread::Builder::new()
            .name(format!("bench-worker-{worker_id}"))
            .spawn(move || {
                run_worker(
                    worker_id,
                    list.as_ref(),
                    mix,
                    ops_per_worker,
                    value_range,
                    counters.as_ref(),
                )
            })
            .map_err(|e| BenchError::Worker(format!("failed to spawn worker {worker_id}: {e}")))?;

        handles.push(handle);
    }

    let mut histogram = new_latency_histogram();
    let mut tally = OpTally::new();
    let mut total_ops = 0u64;

    for handle in handles {
        let result = handle
            .join()
            .map_err(|_| BenchError::Worker("worker thread panicked".to_string()))?;
        histogram.add(&result.histogram).ok();
        tally.merge(&result.tally);
        total_ops += result.ops;
    }

    let duration = start.elapsed();
    let throughput = total_ops as f64 / duration.as_secs_f64();

    Ok(BenchmarkResult {
        list_name: list_name.to_string(),
        mix,
        worker_count,
        total_ops,
        duration,
        throughput,
        histogram,
        tally,
    })
}

/// Benchmark orchestrator
pub struct Orchestrator {
    config: Arc<BenchConfig>,
}

impl Orchestrator {
    /// Create new orchestrator
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Pre-populate a fresh list with the configured initial range.
    fn prepopulate<L: ListOps + ?Sized>(&self, list: &L) {
        for value in 0..self.config.prepopulate {
            list.insert(value as i64);
        }
    }

    /// Run one cell of the matrix against a specific implementation.
    fn run_cell<L>(
        &self,
        list_name: &str,
        list: Arc<L>,
        mix: Mix,
        worker_count: u32,
    ) -> Result<BenchmarkResult>
    where
        L: ListOps + 'static,
    {
        self.prepopulate(list.as_ref());

        let counters = Arc::new(ProgressCounters::new());
        let total = worker_count as u64 * self.config.ops_per_worker;

        debug!(
            "running {} | {} | {} workers x {} ops",
            list_name, mix, worker_count, self.config.ops_per_worker
        );

        // Progress reporting (if not quiet)
        let progress = if !self.config.quiet {
            let counters = Arc::clone(&counters);
            Some(thread::spawn(move || report_progress(&counters, total)))
        } else {
            None
        };

        let result = run_benchmark(
            list_name,
            list,
            mix,
            worker_count,
            self.config.ops_per_worker,
            self.config.value_range,
            Arc::clone(&counters),
        );

        // Stop the reporter before printing anything else
        counters.signal_shutdown();
        if let Some(handle) = progress {
            let _ = handle.join();
        }

        result
    }

    /// Run the full matrix and collect every result.
    pub fn run_all(&self) -> Result<Vec<BenchmarkResult>> {
        let mut results = Vec::new();

        for &worker_count in &self.config.worker_counts {
            for &mix in &self.config.mixes {
                if !self.config.quiet {
                    println!("\n--- {} workers | {} ({}) ---", worker_count, mix, mix.describe());
                }

                let cell_start = results.len();

                if self.config.lists.includes_coarse() {
                    let result =
                        self.run_cell("coarse-grained", Arc::new(CoarseList::new()), mix, worker_count)?;
                    if !self.config.quiet {
                        result.print_summary();
                    }
                    results.push(result);
                }

                if self.config.lists.includes_fine() {
                    let result =
                        self.run_cell("fine-grained", Arc::new(FineList::new()), mix, worker_count)?;
                    if !self.config.quiet {
                        result.print_summary();
                    }
                    results.push(result);
                }

                // Pairwise comparison when both implementations ran
                if !self.config.quiet && results.len() == cell_start + 2 {
                    print_comparison(&results[cell_start], &results[cell_start + 1]);
                }
            }
        }

        Ok(results)
    }
}

/// Progress reporting loop; runs on its own thread until shutdown
fn report_progress(counters: &ProgressCounters, total: u64) {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut last_finished = 0u64;
    let mut last_time = start;

    while !counters.is_shutdown() {
        let finished = counters.finished();
        pb.set_position(finished);

        // Current throughput without decimals
        let now = Instant::now();
        let interval = now.duration_since(last_time).as_secs_f64();
        if interval >= 0.5 {
            let throughput = (finished - last_finished) as f64 / interval;
            pb.set_message(format!("{}/s", format_count(throughput as u64)));
            last_finished = finished;
            last_time = now;
        }

        if finished >= total {
            break;
        }
        thread::sleep(Duration::from_millis(50));
    }

    pb.finish_and_clear();
}

/// Format throughput without meaningless decimals
pub fn format_throughput(throughput: f64) -> String {
    format_count(throughput as u64)
}

/// Format large numbers with thousands separators
/// Examples: 1,234,567 or 987,654
pub fn format_count(value: u64) -> String {
    let s = value.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CliArgs, ListSelection};
    use clap::Parser;

    fn quiet_config(args: &[&str]) -> BenchConfig {
        let mut full = vec!["test", "-q"];
        full.extend_from_slice(args);
        BenchConfig::from_cli(&CliArgs::parse_from(full)).unwrap()
    }

    #[test]
    fn test_run_benchmark_accounting() {
        let list = Arc::new(CoarseList::new());
        let counters = Arc::new(ProgressCounters::new());

        let result = run_benchmark(
            "coarse-grained",
            list,
            Mix::InsertHeavy,
            4,
            1000,
            1000,
            Arc::clone(&counters),
        )
        .unwrap();

        assert_eq!(result.total_ops, 4000);
        assert_eq!(result.tally.total(), 4000);
        assert_eq!(counters.finished(), 4000);
        assert!(result.throughput > 0.0);
        assert!(result.duration > Duration::ZERO);
    }

    #[test]
    fn test_read_heavy_scenario_reconciles() {
        // Prepopulate 0..100, then 4 workers x 1000 ops of the read-heavy
        // mix. The chain length must reconcile exactly with the tallied
        // insert/delete successes.
        let list = Arc::new(FineList::new());
        for v in 0..100 {
            list.insert(v);
        }

        let counters = Arc::new(ProgressCounters::new());
        let result = run_benchmark(
            "fine-grained",
            Arc::clone(&list),
            Mix::ReadHeavy,
            4,
            1000,
            1000,
            counters,
        )
        .unwrap();

        assert_eq!(result.total_ops, 4000);

        let snapshot = list.snapshot();
        assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            snapshot.len() as i64,
            100 + result.tally.net_inserted(),
            "chain length must match prepopulation plus net successful inserts"
        );

        // Membership agrees with the snapshot for a probe value
        assert_eq!(list.search(50), snapshot.contains(&50));
    }

    #[test]
    fn test_orchestrator_matrix_size() {
        let config = quiet_config(&["-w", "1,2", "-t", "read-heavy", "-n", "200"]);
        let orchestrator = Orchestrator::new(config);

        let results = orchestrator.run_all().unwrap();

        // 2 worker counts x 1 mix x 2 implementations
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.total_ops > 0));
    }

    #[test]
    fn test_orchestrator_single_list_selection() {
        let config = quiet_config(&["-w", "2", "-t", "write-heavy", "-n", "100", "--lists", "fine"]);
        assert_eq!(config.lists, ListSelection::Fine);

        let orchestrator = Orchestrator::new(config);
        let results = orchestrator.run_all().unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].list_name, "fine-grained");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1), "1");
        assert_eq!(format_count(123), "123");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(1000000), "1,000,000");
    }

    #[test]
    fn test_format_throughput() {
        assert_eq!(format_throughput(937821.7051), "937,821");
        assert_eq!(format_throughput(123.456), "123");
    }
}

//! The common operation surface of both list implementations
//!
//! The benchmark harness, workload mixes, and prepopulation are written
//! once against this trait and stay oblivious to the locking discipline
//! underneath.

/// Sorted integer set operations.
///
/// Every method is total over all `i64` inputs: outcomes are plain
/// booleans, never panics or errors. Implementations must keep the chain
/// strictly ascending and duplicate-free at every instant observable from
/// outside their critical sections.
pub trait ListOps: Send + Sync {
    /// Insert `value`, keeping the chain sorted.
    ///
    /// Returns `false` without mutating when the value is already present.
    fn insert(&self, value: i64) -> bool;

    /// Remove `value` from the chain.
    ///
    /// Returns `false` without mutating when the value is absent.
    fn delete(&self, value: i64) -> bool;

    /// Membership test. Never mutates.
    fn search(&self, value: i64) -> bool;
}

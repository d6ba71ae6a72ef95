//! Sorted singly-linked integer sets under two locking disciplines
//!
//! Both lists store `i64` values with set semantics (sorted ascending, no
//! duplicates) and expose the same three total operations through the
//! [`ListOps`] trait:
//! - `CoarseList`: one mutex serializes every operation on the whole chain
//! - `FineList`: a mutex per node, acquired hand-over-hand during traversal

pub mod coarse;
pub mod fine;
pub mod ops;

pub use coarse::CoarseList;
pub use fine::FineList;
pub use ops::ListOps;

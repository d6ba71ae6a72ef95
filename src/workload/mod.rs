//! Workload definitions

pub mod mix;

pub use mix::{Mix, Op};

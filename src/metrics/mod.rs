//! Report formatting and export

pub mod reporter;

pub use reporter::{print_comparison, to_json, write_csv, write_json};

//! Error types for lockbench

use std::io;
use thiserror::Error;

/// Top-level application error
///
/// List operations never fail: "already present" and "absent" are ordinary
/// boolean outcomes. Errors exist only in the driver layer: configuration,
/// worker threads, result export.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;

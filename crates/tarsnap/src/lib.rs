//! Tarsnap integration for tsm
//!
//! This crate provides:
//! - The `Archiver` interface tsm drives (list / create / delete)
//! - `Tarsnap`, which runs the tarsnap(1) binary
//! - `MemoryArchiver` (feature `testing`), an in-memory stand-in

pub mod process;

#[cfg(any(test, feature = "testing"))]
pub mod fake;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub use process::Tarsnap;

#[cfg(any(test, feature = "testing"))]
pub use fake::{ArchiverCall, MemoryArchiver};

/// Default location of the tarsnap binary
pub const DEFAULT_TARSNAP_BIN: &str = "/usr/local/bin/tarsnap";

/// Operation requested from the archiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::List => f.write_str("list archives"),
            Operation::Create => f.write_str("create archive"),
            Operation::Delete => f.write_str("delete archive"),
        }
    }
}

/// Failure talking to the archival tool
#[derive(Debug, Error)]
pub enum ArchiverError {
    /// The tool could not be started at all
    #[error("failed to run {} to {op}: {source}", .bin.display())]
    Spawn {
        op: Operation,
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and reported failure
    #[error("{op} failed ({status}){}", stderr_suffix(.stderr))]
    Failed {
        op: Operation,
        status: String,
        stderr: String,
    },

    /// The tool succeeded but its output could not be read
    #[error("unreadable output from {op}: {reason}")]
    Output { op: Operation, reason: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Result type for archiver operations
pub type Result<T> = std::result::Result<T, ArchiverError>;

/// The three operations tsm needs from an archival tool
///
/// Calls are made one at a time; each blocks the run until the tool is done.
#[async_trait]
pub trait Archiver: Send + Sync {
    /// Names of all archives currently stored
    async fn list_archives(&self) -> Result<Vec<String>>;

    /// Create archive `name` from `paths`, passing `extra_args` to the tool
    async fn create_archive(&self, name: &str, paths: &[String], extra_args: &[String])
        -> Result<()>;

    /// Delete archive `name`
    async fn delete_archive(&self, name: &str) -> Result<()>;
}

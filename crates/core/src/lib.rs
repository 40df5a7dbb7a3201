//! Core types for tsm
//!
//! This crate provides:
//! - Archive naming (nightly/adhoc encodings)
//! - Retention cutoffs derived from a weeks/months policy
//! - The keep/expire evaluator for nightly archives

pub mod archive;
pub mod retention;

// Re-exports
pub use archive::{ArchiveKind, ArchiveNameError};
pub use retention::{Classification, Cutoffs, Reason, RetentionPolicy, Verdict};

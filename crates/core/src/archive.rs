//! Archive naming
//!
//! Every archive tsm creates carries its kind and creation time in its name:
//!
//! ```text
//! nightly-2024-03-15         (day precision)
//! adhoc-2024-03-15_1730      (minute precision)
//! ```
//!
//! The kind of an existing archive is decided by prefix alone: anything that
//! does not start with `adhoc-` is treated as nightly.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use thiserror::Error;

const NIGHTLY_PREFIX: &str = "nightly-";
const ADHOC_PREFIX: &str = "adhoc-";

/// Error returned when an archive name does not match its kind's encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveNameError {
    #[error("archive name '{name}' does not start with '{prefix}'")]
    MissingPrefix { name: String, prefix: &'static str },

    #[error("archive name '{name}' does not match the {kind} pattern '{pattern}'")]
    BadTimestamp {
        name: String,
        kind: ArchiveKind,
        pattern: &'static str,
    },
}

/// Kind of archive, each with its own fixed name encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Scheduled archive, named by day. Eligible for expiry.
    Nightly,
    /// On-demand archive, named by minute. Never expired automatically.
    Adhoc,
}

impl ArchiveKind {
    /// Determine the kind of an existing archive from its name
    pub fn of(name: &str) -> Self {
        if name.starts_with(ADHOC_PREFIX) {
            ArchiveKind::Adhoc
        } else {
            ArchiveKind::Nightly
        }
    }

    /// Literal prefix of names of this kind
    pub fn prefix(self) -> &'static str {
        match self {
            ArchiveKind::Nightly => NIGHTLY_PREFIX,
            ArchiveKind::Adhoc => ADHOC_PREFIX,
        }
    }

    /// Human-readable pattern, used in error messages
    pub fn pattern(self) -> &'static str {
        match self {
            ArchiveKind::Nightly => "nightly-YYYY-MM-DD",
            ArchiveKind::Adhoc => "adhoc-YYYY-MM-DD_HHMM",
        }
    }

    /// chrono format of the timestamp part
    fn stamp_format(self) -> &'static str {
        match self {
            ArchiveKind::Nightly => "%Y-%m-%d",
            ArchiveKind::Adhoc => "%Y-%m-%d_%H%M",
        }
    }

    /// Shape of the timestamp part: `d` is an ASCII digit, anything else is literal
    fn stamp_shape(self) -> &'static str {
        match self {
            ArchiveKind::Nightly => "dddd-dd-dd",
            ArchiveKind::Adhoc => "dddd-dd-dd_dddd",
        }
    }

    /// Render the canonical name of an archive of this kind taken at `at`
    pub fn format(self, at: NaiveDateTime) -> String {
        format!("{}{}", self.prefix(), at.format(self.stamp_format()))
    }

    /// Parse a name of this kind back into the instant it encodes
    ///
    /// The name must match the encoding exactly: fixed-width fields, no
    /// trailing characters. Nightly names resolve to midnight of their day.
    pub fn parse(self, name: &str) -> Result<NaiveDateTime, ArchiveNameError> {
        let stamp = name
            .strip_prefix(self.prefix())
            .ok_or_else(|| ArchiveNameError::MissingPrefix {
                name: name.to_string(),
                prefix: self.prefix(),
            })?;

        let bad_timestamp = || ArchiveNameError::BadTimestamp {
            name: name.to_string(),
            kind: self,
            pattern: self.pattern(),
        };

        if !matches_shape(stamp, self.stamp_shape()) {
            return Err(bad_timestamp());
        }

        match self {
            ArchiveKind::Nightly => NaiveDate::parse_from_str(stamp, self.stamp_format())
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .ok_or_else(bad_timestamp),
            ArchiveKind::Adhoc => NaiveDateTime::parse_from_str(stamp, self.stamp_format())
                .map_err(|_| bad_timestamp()),
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveKind::Nightly => f.write_str("nightly"),
            ArchiveKind::Adhoc => f.write_str("adhoc"),
        }
    }
}

/// Lenient nightly parse
///
/// Returns the instant `name` encodes and whether the name was malformed.
/// Names that are not valid nightly names map to 0001-01-01 00:00, which
/// sorts before every cutoff. Use [`ArchiveKind::parse`] to surface the error.
pub fn parse_nightly(name: &str) -> (NaiveDateTime, bool) {
    match ArchiveKind::Nightly.parse(name) {
        Ok(taken) => (taken, false),
        Err(_) => (zero_instant(), true),
    }
}

/// Instant assigned to unparseable nightly names: 0001-01-01 00:00
fn zero_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

fn matches_shape(stamp: &str, shape: &str) -> bool {
    stamp.len() == shape.len()
        && stamp.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            literal => c == literal,
        })
}

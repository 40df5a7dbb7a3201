//! Retention policy and the keep/expire evaluator
//!
//! Nightly archives are kept for `keep_weeks` weeks. Past that, only the
//! archive taken on the last day of each month survives, and only until it
//! falls behind the `keep_months` horizon. Adhoc archives are never evaluated.

use crate::archive::{self, ArchiveKind};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use std::fmt;

/// Retention horizons, in calendar weeks and months back from now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetentionPolicy {
    /// Weeks of nightly archives kept unconditionally
    pub keep_weeks: u32,
    /// Months of month-end archives kept
    pub keep_months: u32,
}

impl RetentionPolicy {
    pub fn new(keep_weeks: u32, keep_months: u32) -> Self {
        Self {
            keep_weeks,
            keep_months,
        }
    }

    /// Compute the cutoff pair for an invocation running at `now`
    pub fn cutoffs(&self, now: NaiveDateTime) -> Cutoffs {
        Cutoffs::new(now, self)
    }
}

/// Cutoff instants for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoffs {
    /// The instant the cutoffs were derived from
    pub now: NaiveDateTime,
    /// `now` minus 7 × keep_weeks days
    pub week: NaiveDateTime,
    /// `now` minus keep_months months
    pub month: NaiveDateTime,
}

impl Cutoffs {
    pub fn new(now: NaiveDateTime, policy: &RetentionPolicy) -> Self {
        let week = now
            .checked_sub_days(Days::new(7 * u64::from(policy.keep_weeks)))
            .unwrap_or(NaiveDateTime::MIN);

        Self {
            now,
            week,
            month: months_before(now, policy.keep_months),
        }
    }
}

/// Step `now` back by whole months, keeping day and time of day
///
/// A day that does not exist in the target month overflows into the next
/// one: May 31 minus three months is March 2 in a leap year, not Feb 29.
fn months_before(now: NaiveDateTime, months: u32) -> NaiveDateTime {
    let total = i64::from(now.year()) * 12 + i64::from(now.month0()) - i64::from(months);

    i32::try_from(total.div_euclid(12))
        .ok()
        .and_then(|year| {
            NaiveDate::from_ymd_opt(year, total.rem_euclid(12) as u32 + 1, 1)
        })
        .and_then(|first| first.checked_add_days(Days::new(u64::from(now.day() - 1))))
        .map(|date| date.and_time(now.time()))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Last calendar day of `date`'s month
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Keep or expire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Expire,
}

/// Which rule decided a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Taken on or after the weekly cutoff
    WithinWeeks,
    /// Past the weekly cutoff, kept as its month's last-day archive
    MonthEnd,
    /// Past the weekly cutoff and not a month-end archive
    PastWeeks,
    /// Past the monthly cutoff
    PastMonths,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::WithinWeeks => "within weekly window",
            Reason::MonthEnd => "month-end archive",
            Reason::PastWeeks => "older than weekly window",
            Reason::PastMonths => "older than monthly window",
        };
        f.write_str(text)
    }
}

/// Outcome of evaluating one nightly archive against a cutoff pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Archive name as reported by tarsnap
    pub name: String,
    /// Instant parsed from the name
    pub taken: NaiveDateTime,
    pub verdict: Verdict,
    pub reason: Reason,
    /// Name did not parse; `taken` is the zero instant
    pub malformed: bool,
}

impl Classification {
    pub fn is_expired(&self) -> bool {
        self.verdict == Verdict::Expire
    }
}

/// Classify a single archive
///
/// Returns `None` for adhoc archives, which are never candidates for expiry.
pub fn classify(name: &str, cutoffs: &Cutoffs) -> Option<Classification> {
    if ArchiveKind::of(name) == ArchiveKind::Adhoc {
        return None;
    }

    let (taken, malformed) = archive::parse_nightly(name);

    let date = taken.date();
    let month_end = date.day() == end_of_month(date).day();

    let reason = if taken < cutoffs.month {
        Reason::PastMonths
    } else if taken < cutoffs.week && !month_end {
        Reason::PastWeeks
    } else if taken < cutoffs.week {
        Reason::MonthEnd
    } else {
        Reason::WithinWeeks
    };

    let verdict = match reason {
        Reason::PastMonths | Reason::PastWeeks => Verdict::Expire,
        Reason::MonthEnd | Reason::WithinWeeks => Verdict::Keep,
    };

    Some(Classification {
        name: name.to_string(),
        taken,
        verdict,
        reason,
        malformed,
    })
}

/// Classify every nightly archive in `names`
///
/// Output is in lexicographic name order. Adhoc archives are skipped.
pub fn evaluate<S: AsRef<str>>(names: &[S], cutoffs: &Cutoffs) -> Vec<Classification> {
    let mut sorted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    sorted
        .into_iter()
        .filter_map(|name| classify(name, cutoffs))
        .collect()
}

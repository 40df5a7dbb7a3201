//! Report output on stdout

use crate::dispatch::ExpiryReport;
use crate::util;
use owo_colors::OwoColorize;
use tsm_core::{Cutoffs, Reason, Verdict};

/// Header printed at the start of every run
pub fn header(cutoffs: &Cutoffs) -> String {
    format!(
        "Date: {}\nExpire week: {}\nExpire month: {}\n",
        util::format_date(cutoffs.now),
        util::format_date(cutoffs.week),
        util::format_date(cutoffs.month),
    )
}

pub fn print_header(cutoffs: &Cutoffs) {
    println!("{}", header(cutoffs));
}

/// One line of a dry-run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow<'a> {
    pub name: &'a str,
    pub verdict: Verdict,
    pub reason: Reason,
    pub malformed: bool,
}

/// Rows to show for a dry run: expired archives, plus kept ones if `show_all`
pub fn rows(report: &ExpiryReport, show_all: bool) -> Vec<ReportRow<'_>> {
    report
        .classifications
        .iter()
        .filter(|c| show_all || c.is_expired())
        .map(|c| ReportRow {
            name: &c.name,
            verdict: c.verdict,
            reason: c.reason,
            malformed: c.malformed,
        })
        .collect()
}

/// Print the dry-run report for `list-expired`
pub fn print_expiry(report: &ExpiryReport, show_all: bool) {
    let rows = rows(report, show_all);
    let expired = report.expired().count();

    if rows.is_empty() {
        println!("{}", "No archives would be expired".dimmed());
        return;
    }

    for row in &rows {
        let tag = match row.verdict {
            Verdict::Expire => format!("{:<7}", "expire").red().to_string(),
            Verdict::Keep => format!("{:<7}", "keep").green().to_string(),
        };
        let note = if row.malformed {
            format!("({}, unparseable name)", row.reason)
        } else {
            format!("({})", row.reason)
        };
        println!("{} {}  {}", tag, row.name, note.dimmed());
    }

    println!();
    println!(
        "{} of {} nightly archives would be expired",
        expired.to_string().yellow(),
        report.classifications.len()
    );
}

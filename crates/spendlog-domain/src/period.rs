//! Reporting periods and calendar-date arithmetic.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Enumerates the date windows used by summaries and the list filter.
#[derive(Default)]
pub enum Period {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl Period {
    /// Returns true when `date` falls inside the period relative to `reference`.
    ///
    /// Today is an exact calendar match, week covers the trailing seven days,
    /// and month matches the reference year-month.
    pub fn matches(self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Period::All => true,
            Period::Today => date == reference,
            Period::Week => date >= reference - Duration::days(7),
            Period::Month => {
                date.year() == reference.year() && date.month() == reference.month()
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::All => "All",
            Period::Today => "Today",
            Period::Week => "This Week",
            Period::Month => "This Month",
        };
        f.write_str(label)
    }
}

/// Advances a date by whole calendar months, clamping the day-of-month to the
/// target month's length (Jan 31 + 1 month = Feb 28/29).
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day)
        .unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

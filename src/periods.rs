// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Date windows and bucketing helpers shared by the calculators.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const DAY_MS: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            other => Err(anyhow!("Invalid range '{}', expected week|month|year", other)),
        }
    }
}

/// Which window to aggregate over. Month is 0-indexed; week mode ignores
/// both year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSelector {
    range: TimeRange,
    year: i32,
    month0: u32,
}

impl WindowSelector {
    pub fn week() -> Self {
        WindowSelector {
            range: TimeRange::Week,
            year: 0,
            month0: 0,
        }
    }

    /// `None` when the month index or year is out of range.
    pub fn month(year: i32, month0: u32) -> Option<Self> {
        let month = month0.checked_add(1)?;
        NaiveDate::from_ymd_opt(year, month, 1)?;
        NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
        Some(WindowSelector {
            range: TimeRange::Month,
            year,
            month0,
        })
    }

    pub fn year(year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1)?;
        NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(WindowSelector {
            range: TimeRange::Year,
            year,
            month0: 0,
        })
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn selected_year(&self) -> i32 {
        self.year
    }

    pub fn selected_month0(&self) -> u32 {
        self.month0
    }
}

/// Inclusive date range: `start <= t <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }
}

pub fn resolve_window(selector: &WindowSelector, now: NaiveDateTime) -> Window {
    match selector.range {
        TimeRange::Week => {
            let monday = start_of_week(now.date());
            let sunday = monday
                .checked_add_signed(Duration::days(6))
                .unwrap_or(NaiveDate::MAX);
            Window {
                start: start_of_day(monday),
                end: end_of_day(sunday),
            }
        }
        TimeRange::Month => {
            let month = selector.month0 + 1;
            let first = ymd(selector.year, month, 1);
            let last = ymd(selector.year, month, days_in_month(selector.year, month));
            Window {
                start: start_of_day(first),
                end: end_of_day(last),
            }
        }
        TimeRange::Year => Window {
            start: start_of_day(ymd(selector.year, 1, 1)),
            end: end_of_day(ymd(selector.year, 12, 31)),
        },
    }
}

// Selector constructors already rejected dates chrono cannot represent.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Clamps to `NaiveDate::MIN` for the first partial week chrono can represent.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date.checked_sub_signed(Duration::days(date.weekday().num_days_from_monday() as i64))
        .unwrap_or(NaiveDate::MIN)
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59.999 on `date`, including `NaiveDate::MAX`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Month is 1-based here, matching chrono.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub fn month_abbrev(month0: usize) -> &'static str {
    &MONTH_NAMES[month0 % 12][..3]
}

pub fn day_abbrev(index: usize) -> &'static str {
    &DAY_NAMES[index % 7][..3]
}

/// Whole days from `from` to `to`, rounded up the way `Math.ceil` rounds
/// a millisecond difference.
pub fn ceil_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let ms = (to - from).num_milliseconds();
    let days = ms / DAY_MS;
    if ms % DAY_MS > 0 { days + 1 } else { days }
}

pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

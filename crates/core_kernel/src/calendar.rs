//! Calendar arithmetic for billing periods
//!
//! This module provides the date handling shared by the billing chain:
//! working-day enumeration (weekends excluded, no holiday calendar),
//! overflow-safe month arithmetic anchored to a billing day-of-month, and
//! the day-cutoff rule that decides which date "today" means for effort
//! accounting.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for the organization's billing calendar
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// The local calendar date for a UTC instant
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

impl FromStr for Timezone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s)
            .map(Timezone)
            .map_err(|_| format!("Invalid timezone: {}", s))
    }
}

/// Errors related to calendar operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid billing day of month: {0}")]
    InvalidBillingDay(u32),
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days in the range, both ends counted
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The working days inside the range, in order
    pub fn working_days(&self) -> Vec<NaiveDate> {
        working_days(self.start, self.end)
    }

    /// How many working days the range holds
    pub fn working_day_count(&self) -> u32 {
        working_day_count(self.start, self.end)
    }
}

/// Returns true when the date falls Monday through Friday
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Lists the working days between two dates, both ends inclusive
///
/// Saturdays and Sundays are excluded; public holidays are not modelled.
/// A start after the end yields an empty list.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        if is_working_day(current) {
            days.push(current);
        }
        current = current.succ_opt().expect("date out of range");
    }
    days
}

/// Counts the working days between two dates, both ends inclusive
pub fn working_day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut count = 0;
    let mut current = start;
    while current <= end {
        if is_working_day(current) {
            count += 1;
        }
        current = current.succ_opt().expect("date out of range");
    }
    count
}

/// Adds whole months without rolling into the following month
///
/// Jan 31 plus one month lands on the last day of February, never on
/// March 2.
pub fn add_months_no_overflow(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .expect("date out of range")
}

/// Subtracts whole months without rolling into the previous month
pub fn sub_months_no_overflow(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .expect("date out of range")
}

/// The first day of the date's month
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 is always valid")
}

/// Number of days in the date's month
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    let next = add_months_no_overflow(first, 1);
    (next - first).num_days() as u32
}

/// Moves a date to the given day of its month, clamped to the month length
///
/// Billing days 29 to 31 land on the last day of shorter months instead of
/// spilling into the next one.
pub fn with_day_clamped(date: NaiveDate, day: u32) -> NaiveDate {
    let clamped = day.clamp(1, days_in_month(date));
    date.with_day(clamped).expect("clamped day is always valid")
}

/// Whole months elapsed from start to end, partial months truncated
///
/// Jan 15 to Feb 14 is zero months; Jan 15 to Feb 15 is one. An end before
/// the start counts as zero.
pub fn elapsed_whole_months(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let months =
        (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    let months = if end.day() < start.day() { months - 1 } else { months };
    months.max(0) as u32
}

/// The date effort accounting treats as "today"
///
/// Before the day-cutoff time a working day is not yet counted, so the
/// effective date steps back to yesterday.
pub fn effective_working_date(now_local: DateTime<Tz>, day_cutoff: NaiveTime) -> NaiveDate {
    let today = now_local.date_naive();
    if now_local.time() < day_cutoff {
        today.pred_opt().expect("date out of range")
    } else {
        today
    }
}

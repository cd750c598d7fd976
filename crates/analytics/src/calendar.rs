//! Calendar keying: pure functions from a date to its period keys.
//!
//! Nothing here reads the wall clock. The reporting timezone is an explicit
//! [`ReportingZone`] value that turns an instant into the local calendar date.

use crate::error::AnalyticsError;
use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, Offset, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// ISO-8601 week: weeks start on Monday, week 1 holds the year's first Thursday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub iso_year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            iso_year: iso.year(),
            week: iso.week(),
        }
    }

    /// The Monday opening this week.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.iso_year, self.week, chrono::Weekday::Mon)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.iso_year, self.week)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearKey(pub i32);

impl YearKey {
    pub fn of(date: NaiveDate) -> Self {
        Self(date.year())
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

macro_rules! serialize_as_display {
    ($($key:ty),*) => {
        $(impl Serialize for $key {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        })*
    };
}

serialize_as_display!(WeekKey, MonthKey, YearKey);

pub fn iso_week_key(date: NaiveDate) -> WeekKey {
    WeekKey::of(date)
}

pub fn month_key(date: NaiveDate) -> MonthKey {
    MonthKey::of(date)
}

pub fn year_key(date: NaiveDate) -> YearKey {
    YearKey::of(date)
}

/// 1-based ordinal of `date` within its own calendar year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// The same calendar date one year earlier. Feb 29 falls back to Feb 28.
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(12)).unwrap_or(date)
}

pub fn first_day_of_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(year, 1)
}

pub fn last_day_of_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(year, days_in_year(year))
}

/// The single fixed timezone every "today" is resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingZone {
    offset: FixedOffset,
}

impl ReportingZone {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Builds a zone from minutes east of UTC (New York standard time is -300).
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, AnalyticsError> {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(AnalyticsError::InvalidTimezone(minutes))?;
        Ok(Self { offset })
    }

    /// The local calendar date of `now` in this zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }
}

impl Default for ReportingZone {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn gregorian_leap_rule() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(1900), 365);
    }

    #[test]
    fn iso_week_keys_cross_year_boundaries() {
        // 2024-12-30 is the Monday of ISO week 1 of 2025.
        assert_eq!(iso_week_key(date(2024, 12, 30)).to_string(), "2025-W01");
        assert_eq!(iso_week_key(date(2025, 1, 3)).to_string(), "2025-W01");
        // 2021-01-03 (Sunday) still belongs to 2020-W53.
        assert_eq!(iso_week_key(date(2021, 1, 3)).to_string(), "2020-W53");
        assert_eq!(iso_week_key(date(2025, 2, 12)).to_string(), "2025-W07");
    }

    #[test]
    fn month_and_year_keys_are_zero_padded() {
        assert_eq!(month_key(date(2025, 3, 9)).to_string(), "2025-03");
        assert_eq!(year_key(date(2025, 3, 9)).to_string(), "2025");
    }

    #[test]
    fn day_of_year_is_one_based() {
        assert_eq!(day_of_year(date(2025, 1, 1)), 1);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366);
        assert_eq!(day_of_year(date(2025, 12, 31)), 365);
    }

    #[test]
    fn one_year_before_clamps_leap_day() {
        assert_eq!(one_year_before(date(2024, 2, 29)), date(2023, 2, 28));
        assert_eq!(one_year_before(date(2025, 10, 16)), date(2024, 10, 16));
    }

    #[test]
    fn week_key_knows_its_monday() {
        assert_eq!(
            iso_week_key(date(2025, 1, 3)).first_day(),
            Some(date(2024, 12, 30))
        );
    }

    #[test]
    fn reporting_zone_shifts_the_calendar_date() {
        let zone = ReportingZone::from_offset_minutes(-300).unwrap();
        let late_utc = Utc.with_ymd_and_hms(2025, 1, 2, 3, 0, 0).unwrap();
        assert_eq!(zone.today(late_utc), date(2025, 1, 1));
        assert_eq!(ReportingZone::utc().today(late_utc), date(2025, 1, 2));
    }

    #[test]
    fn rejects_impossible_offsets() {
        assert_eq!(
            ReportingZone::from_offset_minutes(24 * 60),
            Err(AnalyticsError::InvalidTimezone(24 * 60))
        );
    }
}

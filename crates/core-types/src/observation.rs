use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest happiness index a day can be rated.
pub const MIN_INDEX: i32 = -10;
/// Highest happiness index a day can be rated.
pub const MAX_INDEX: i32 = 10;

/// A single self-reported happiness index for one calendar date.
///
/// Several observations may exist for the same date (corrections are appended,
/// never overwritten). Observations are immutable once read from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: i32,
}

impl Observation {
    /// Builds an observation, rejecting values outside `[MIN_INDEX, MAX_INDEX]`.
    pub fn new(date: NaiveDate, value: i32) -> Result<Self, CoreError> {
        if !is_valid_index(value) {
            return Err(CoreError::IndexOutOfRange(value));
        }
        Ok(Self { date, value })
    }

    pub fn is_valid(&self) -> bool {
        is_valid_index(self.value)
    }
}

pub fn is_valid_index(value: i32) -> bool {
    (MIN_INDEX..=MAX_INDEX).contains(&value)
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range; `end` earlier than `start` is a caller bug.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::InvalidInput(
                "date range".to_string(),
                format!("end {} is earlier than start {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every date in the range, earliest first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Number of days in the range (both ends inclusive).
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }
}

//! Day-of-year series for the progress chart.
//!
//! A past year is fully visible, the current year is masked after today and a
//! future year is hidden entirely. The optional smoothed copy is for display only.

use crate::calendar::{day_of_year, days_in_year, first_day_of_year};
use crate::daily::DailySeries;
use crate::error::AnalyticsError;
use crate::policy::{round_dp_half_up, RoundingPolicy};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// One slot per day of a calendar year, index 0 = Jan 1.
///
/// `None` marks a day that is not visible yet (after today); it is never a zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSeries {
    pub year: i32,
    values: Vec<Option<i32>>,
}

impl YearSeries {
    /// Builds the series for `year` as seen on `today`.
    ///
    /// Days up to and including today take the recorded value or `0`; days after
    /// today are not visible. A past year is filled completely, a future one is
    /// entirely hidden.
    pub fn build(
        daily: &DailySeries,
        year: i32,
        today: NaiveDate,
        rounding: RoundingPolicy,
    ) -> Result<Self, AnalyticsError> {
        let len = days_in_year(year);
        let visible_days = match year.cmp(&today.year()) {
            std::cmp::Ordering::Less => len,
            std::cmp::Ordering::Equal => day_of_year(today),
            std::cmp::Ordering::Greater => 0,
        };
        let jan_first = first_day_of_year(year)
            .ok_or_else(|| AnalyticsError::InvalidRange(format!("year {} is out of range", year)))?;

        let values = jan_first
            .iter_days()
            .take(len as usize)
            .enumerate()
            .map(|(i, day)| {
                if (i as u32) < visible_days {
                    Some(rounding.apply(daily.value_or_zero(day)))
                } else {
                    None
                }
            })
            .collect();

        Ok(Self { year, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.values.get(index).copied().flatten()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Some(_)))
    }

    pub fn values(&self) -> &[Option<i32>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<i32>> {
        self.values
    }

    /// Display transform: each visible slot becomes the mean of itself and its
    /// neighbours, substituting the slot's own value for a neighbour that is out
    /// of bounds or not visible. Results are rounded to two decimals.
    ///
    /// The output is for rendering only and must never be aggregated again.
    pub fn smoothed(&self) -> Vec<Option<Decimal>> {
        let values = &self.values;
        values
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let center = (*slot)?;
                let prev = i
                    .checked_sub(1)
                    .and_then(|j| values[j])
                    .unwrap_or(center);
                let next = values.get(i + 1).copied().flatten().unwrap_or(center);
                let sum = Decimal::from(prev) + Decimal::from(center) + Decimal::from(next);
                Some(round_dp_half_up(sum / Decimal::from(3), 2))
            })
            .collect()
    }
}

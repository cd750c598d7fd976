//! Rolling-window momentum: a trailing window compared with the one before it.

use crate::daily::DailySeries;
use crate::error::AnalyticsError;
use crate::policy::{display_int, mean, round_dp_half_up};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const WEEK_WINDOW: usize = 7;
pub const MONTH_WINDOW: usize = 30;

/// Direction of momentum, with a dead band of one point either side of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn classify(delta: Decimal) -> Self {
        if delta >= Decimal::ONE {
            Trend::Up
        } else if delta <= Decimal::NEGATIVE_ONE {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// The result of comparing two consecutive windows of the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Momentum {
    pub window_len: usize,
    pub current_mean: Decimal,
    pub previous_mean: Decimal,
}

impl Momentum {
    pub fn current_avg(&self) -> i32 {
        display_int(self.current_mean)
    }

    pub fn previous_avg(&self) -> i32 {
        display_int(self.previous_mean)
    }

    /// Difference of the unrounded means, rounded to one decimal place.
    pub fn delta(&self) -> Decimal {
        round_dp_half_up(self.current_mean - self.previous_mean, 1)
    }

    pub fn trend(&self) -> Trend {
        Trend::classify(self.delta())
    }
}

/// The `len` daily values ending at `end` (inclusive), earliest first.
/// Days without a recorded value count as `0`.
pub fn trailing_window(
    daily: &DailySeries,
    end: NaiveDate,
    len: usize,
) -> Result<Vec<Decimal>, AnalyticsError> {
    if len == 0 {
        return Err(AnalyticsError::InvalidWindow(len));
    }
    let start = end
        .checked_sub_days(Days::new(len as u64 - 1))
        .ok_or_else(|| AnalyticsError::InvalidRange(format!("window of {} days ending {}", len, end)))?;

    Ok(start
        .iter_days()
        .take(len)
        .map(|day| daily.value_or_zero(day))
        .collect())
}

/// Computes momentum for the window ending at `end` against the window ending `len` days earlier.
pub fn momentum(
    daily: &DailySeries,
    end: NaiveDate,
    len: usize,
) -> Result<Momentum, AnalyticsError> {
    let current = trailing_window(daily, end, len)?;
    let previous_end = end
        .checked_sub_days(Days::new(len as u64))
        .ok_or_else(|| AnalyticsError::InvalidRange(format!("previous window before {}", end)))?;
    let previous = trailing_window(daily, previous_end, len)?;

    Ok(Momentum {
        window_len: len,
        current_mean: mean(&current),
        previous_mean: mean(&previous),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A 7-day window ending `end` whose slots are all `value`, plus the
    /// preceding window whose slots are all `previous`.
    fn two_flat_weeks(end: NaiveDate, value: Decimal, previous: Decimal) -> DailySeries {
        let start = end - Days::new(13);
        start
            .iter_days()
            .take(14)
            .enumerate()
            .map(|(i, d)| (d, if i < 7 { previous } else { value }))
            .collect()
    }

    #[test]
    fn window_is_gap_filled_and_ordered_earliest_first() {
        let daily: DailySeries = [(date(2025, 1, 5), dec!(4)), (date(2025, 1, 7), dec!(-2))]
            .into_iter()
            .collect();

        let window = trailing_window(&daily, date(2025, 1, 7), 7).unwrap();
        assert_eq!(
            window,
            vec![dec!(0), dec!(0), dec!(0), dec!(0), dec!(4), dec!(0), dec!(-2)]
        );
    }

    #[test]
    fn zero_length_window_fails_fast() {
        let daily = DailySeries::default();
        assert_eq!(
            trailing_window(&daily, date(2025, 1, 7), 0),
            Err(AnalyticsError::InvalidWindow(0))
        );
        assert!(momentum(&daily, date(2025, 1, 7), 0).is_err());
    }

    #[test]
    fn windows_are_disjoint_and_consecutive() {
        let end = date(2025, 1, 14);
        let daily = two_flat_weeks(end, dec!(6), dec!(2));
        let m = momentum(&daily, end, WEEK_WINDOW).unwrap();

        assert_eq!(m.current_mean, dec!(6));
        assert_eq!(m.previous_mean, dec!(2));
        assert_eq!(m.delta(), dec!(4.0));
        assert_eq!(m.trend(), Trend::Up);
    }

    #[test]
    fn delta_uses_unrounded_means() {
        let end = date(2025, 1, 14);

        // 4.6 vs 4.4: the displayed averages are 5 and 4, yet the real delta is 0.2.
        let m = momentum(&two_flat_weeks(end, dec!(4.6), dec!(4.4)), end, 7).unwrap();
        assert_eq!((m.current_avg(), m.previous_avg()), (5, 4));
        assert_eq!(m.delta(), dec!(0.2));
        assert_eq!(m.trend(), Trend::Flat);

        // 5.49 vs 4.5: rounding first gives 5 - 5 = 0, the real delta is 0.99 -> 1.0.
        let m = momentum(&two_flat_weeks(end, dec!(5.49), dec!(4.5)), end, 7).unwrap();
        assert_eq!((m.current_avg(), m.previous_avg()), (5, 5));
        assert_eq!(m.delta(), dec!(1.0));
        assert_eq!(m.trend(), Trend::Up);

        // 5.6 vs 4.4: both forms agree on `up`.
        let m = momentum(&two_flat_weeks(end, dec!(5.6), dec!(4.4)), end, 7).unwrap();
        assert_eq!(m.delta(), dec!(1.2));
        assert_eq!(m.trend(), Trend::Up);

        // 5.4 vs 4.6: both forms agree on `flat`.
        let m = momentum(&two_flat_weeks(end, dec!(5.4), dec!(4.6)), end, 7).unwrap();
        assert_eq!(m.delta(), dec!(0.8));
        assert_eq!(m.trend(), Trend::Flat);
    }

    #[test]
    fn trend_thresholds_are_inclusive() {
        assert_eq!(Trend::classify(dec!(1.0)), Trend::Up);
        assert_eq!(Trend::classify(dec!(0.9)), Trend::Flat);
        assert_eq!(Trend::classify(dec!(-0.9)), Trend::Flat);
        assert_eq!(Trend::classify(dec!(-1.0)), Trend::Down);
    }

    #[test]
    fn thirty_day_window_reaches_back_across_months() {
        let end = date(2025, 3, 1);
        let daily: DailySeries = [(date(2025, 1, 31), dec!(-9))].into_iter().collect();
        let m = momentum(&daily, end, MONTH_WINDOW).unwrap();

        // The current window covers Jan 31 through Mar 1.
        assert_eq!(m.current_mean, dec!(-9) / dec!(30));
        assert_eq!(m.previous_mean, Decimal::ZERO);
        assert_eq!(m.trend(), Trend::Flat);
    }
}

//! Best and worst day within a date range, gap-filled with zero.

use crate::daily::DailySeries;
use crate::error::AnalyticsError;
use crate::policy::display_int;
use chrono::NaiveDate;
use core_types::DateRange;
use serde::Serialize;

/// A best or worst day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extremum {
    pub date: NaiveDate,
    /// Short rendering such as "Jan 7".
    pub label: String,
    pub value: i32,
    /// Whether the day had a recorded value rather than a gap-filled zero.
    #[serde(skip)]
    pub recorded: bool,
}

impl Extremum {
    fn new(date: NaiveDate, value: i32, recorded: bool) -> Self {
        Self {
            date,
            label: date.format("%b %-d").to_string(),
            value,
            recorded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extremes {
    pub best: Extremum,
    pub worst: Extremum,
}

/// Scans `range` in date order for the highest and lowest displayed daily value.
///
/// Missing days compare as `0`. On a tie a recorded day replaces a gap-filled
/// one; otherwise the earliest day wins.
pub fn find_extremes(daily: &DailySeries, range: DateRange) -> Result<Extremes, AnalyticsError> {
    let mut best: Option<Extremum> = None;
    let mut worst: Option<Extremum> = None;

    for day in range.days() {
        let recorded = daily.is_recorded(day);
        let value = display_int(daily.value_or_zero(day));

        let replaces_best = match &best {
            None => true,
            Some(b) => value > b.value || (value == b.value && recorded && !b.recorded),
        };
        if replaces_best {
            best = Some(Extremum::new(day, value, recorded));
        }

        let replaces_worst = match &worst {
            None => true,
            Some(w) => value < w.value || (value == w.value && recorded && !w.recorded),
        };
        if replaces_worst {
            worst = Some(Extremum::new(day, value, recorded));
        }
    }

    match (best, worst) {
        (Some(best), Some(worst)) => Ok(Extremes { best, worst }),
        _ => Err(AnalyticsError::InvalidRange(format!(
            "no days between {} and {}",
            range.start, range.end
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    #[test]
    fn finds_highest_and_lowest_days() {
        let daily: DailySeries = [
            (date(2025, 1, 1), dec!(5)),
            (date(2025, 1, 2), dec!(-3)),
            (date(2025, 1, 3), dec!(2)),
        ]
        .into_iter()
        .collect();

        let ex = find_extremes(&daily, range(date(2025, 1, 1), date(2025, 1, 3))).unwrap();
        assert_eq!(ex.best.date, date(2025, 1, 1));
        assert_eq!(ex.best.value, 5);
        assert_eq!(ex.best.label, "Jan 1");
        assert_eq!(ex.worst.date, date(2025, 1, 2));
        assert_eq!(ex.worst.value, -3);
    }

    #[test]
    fn recorded_day_beats_gap_filled_tie() {
        // Jan 1 is missing (0), Jan 2 records a real 0.
        let daily: DailySeries = [(date(2025, 1, 2), Decimal::ZERO)].into_iter().collect();
        let ex = find_extremes(&daily, range(date(2025, 1, 1), date(2025, 1, 3))).unwrap();

        assert_eq!(ex.best.date, date(2025, 1, 2));
        assert!(ex.best.recorded);
        assert_eq!(ex.worst.date, date(2025, 1, 2));
    }

    #[test]
    fn recorded_tie_is_not_displaced_by_a_later_gap() {
        // Jan 1 records 0, Jan 2 is missing and compares as 0.
        let daily: DailySeries = [(date(2025, 1, 1), Decimal::ZERO)].into_iter().collect();
        let ex = find_extremes(&daily, range(date(2025, 1, 1), date(2025, 1, 2))).unwrap();
        assert_eq!(ex.best.date, date(2025, 1, 1));
        assert!(ex.best.recorded);
    }

    #[test]
    fn earliest_recorded_tie_wins() {
        let daily: DailySeries = [
            (date(2025, 1, 1), dec!(3)),
            (date(2025, 1, 2), dec!(3)),
            (date(2025, 1, 3), dec!(-4)),
            (date(2025, 1, 4), dec!(-4)),
        ]
        .into_iter()
        .collect();

        let ex = find_extremes(&daily, range(date(2025, 1, 1), date(2025, 1, 4))).unwrap();
        assert_eq!(ex.best.date, date(2025, 1, 1));
        assert_eq!(ex.worst.date, date(2025, 1, 3));
    }

    #[test]
    fn compares_displayed_values() {
        // 2.6 and 3.4 both display as 3, so the earlier day keeps the title.
        let daily: DailySeries = [(date(2025, 1, 1), dec!(3.4)), (date(2025, 1, 2), dec!(2.6))]
            .into_iter()
            .collect();
        let ex = find_extremes(&daily, range(date(2025, 1, 1), date(2025, 1, 2))).unwrap();
        assert_eq!(ex.best.date, date(2025, 1, 1));
        assert_eq!(ex.best.value, 3);
    }

    #[test]
    fn empty_year_reports_a_gap_filled_zero() {
        let ex = find_extremes(
            &DailySeries::default(),
            range(date(2025, 1, 1), date(2025, 1, 5)),
        )
        .unwrap();
        assert_eq!(ex.best.date, date(2025, 1, 1));
        assert_eq!(ex.best.value, 0);
        assert!(!ex.best.recorded);
    }
}

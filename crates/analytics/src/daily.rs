use crate::policy::Statistic;
use chrono::NaiveDate;
use core_types::Observation;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// One reduced value per date that has at least one valid observation.
///
/// Absence is meaningful: a date missing from the series was never reported,
/// which is different from a recorded `0`. Each consumer applies its own fill
/// policy on top of this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    values: BTreeMap<NaiveDate, Decimal>,
}

impl DailySeries {
    /// Groups valid observations by date and reduces each group with `statistic`.
    /// Out-of-range values are dropped before reduction.
    pub fn reduce(observations: &[Observation], statistic: Statistic) -> Self {
        let mut groups: BTreeMap<NaiveDate, Vec<Decimal>> = BTreeMap::new();
        let mut dropped = 0usize;

        for obs in observations {
            if !obs.is_valid() {
                dropped += 1;
                continue;
            }
            groups.entry(obs.date).or_default().push(Decimal::from(obs.value));
        }

        if dropped > 0 {
            tracing::debug!(dropped, "Discarded out-of-range observations.");
        }

        let values = groups
            .into_iter()
            .filter_map(|(date, group)| statistic.reduce(&group).map(|v| (date, v)))
            .collect();

        Self { values }
    }

    pub fn get(&self, date: NaiveDate) -> Option<Decimal> {
        self.values.get(&date).copied()
    }

    /// The recorded value, or `0` for a day nobody reported (gap-fill).
    pub fn value_or_zero(&self, date: NaiveDate) -> Decimal {
        self.get(date).unwrap_or(Decimal::ZERO)
    }

    pub fn is_recorded(&self, date: NaiveDate) -> bool {
        self.values.contains_key(&date)
    }

    /// A copy holding only the dates on or before `date`.
    pub fn through(&self, date: NaiveDate) -> Self {
        Self {
            values: self.values.range(..=date).map(|(d, v)| (*d, *v)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(NaiveDate, Decimal)> for DailySeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Decimal)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(d: NaiveDate, value: i32) -> Observation {
        Observation { date: d, value }
    }

    #[test]
    fn reduces_same_day_corrections() {
        let day = date(2025, 1, 1);
        let observations = [obs(day, 4), obs(day, 7), obs(day, -2)];

        let mean = DailySeries::reduce(&observations, Statistic::Mean);
        assert_eq!(mean.get(day), Some(dec!(3)));

        let median = DailySeries::reduce(&observations, Statistic::Median);
        assert_eq!(median.get(day), Some(dec!(4)));
    }

    #[test]
    fn drops_out_of_range_values_before_reducing() {
        let day = date(2025, 1, 1);
        let observations = [obs(day, 6), obs(day, 42), obs(date(2025, 1, 2), -11)];

        let series = DailySeries::reduce(&observations, Statistic::Mean);
        assert_eq!(series.get(day), Some(dec!(6)));
        // A day whose only rows were invalid stays absent, not zero.
        assert!(!series.is_recorded(date(2025, 1, 2)));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn absence_differs_from_a_recorded_zero() {
        let series = DailySeries::reduce(&[obs(date(2025, 1, 1), 0)], Statistic::Mean);
        assert!(series.is_recorded(date(2025, 1, 1)));
        assert_eq!(series.get(date(2025, 1, 1)), Some(Decimal::ZERO));
        assert_eq!(series.get(date(2025, 1, 2)), None);
        assert_eq!(series.value_or_zero(date(2025, 1, 2)), Decimal::ZERO);
    }

    #[test]
    fn through_keeps_earlier_dates_only() {
        let series: DailySeries = [
            (date(2025, 1, 1), dec!(1)),
            (date(2025, 1, 2), dec!(2)),
            (date(2025, 1, 3), dec!(3)),
        ]
        .into_iter()
        .collect();

        let cut = series.through(date(2025, 1, 2));
        assert_eq!(cut.len(), 2);
        assert!(!cut.is_recorded(date(2025, 1, 3)));
    }
}

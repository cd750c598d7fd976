//! Period aggregation: daily values bucketed by ISO week, month and year.

use crate::calendar::{MonthKey, WeekKey, YearKey};
use crate::daily::DailySeries;
use crate::policy::{AggregationPolicy, YearDerivation};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Reduced values per period. A period with no contributing day has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodAggregates {
    pub weeks: BTreeMap<WeekKey, Decimal>,
    pub months: BTreeMap<MonthKey, Decimal>,
    pub years: BTreeMap<YearKey, Decimal>,
}

impl PeriodAggregates {
    pub fn week(&self, key: WeekKey) -> Option<Decimal> {
        self.weeks.get(&key).copied()
    }

    pub fn month(&self, key: MonthKey) -> Option<Decimal> {
        self.months.get(&key).copied()
    }

    pub fn year(&self, key: YearKey) -> Option<Decimal> {
        self.years.get(&key).copied()
    }
}

/// Groups daily values by period and reduces each bucket with the policy's statistic.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodAggregator {
    policy: AggregationPolicy,
}

impl PeriodAggregator {
    pub fn new(policy: AggregationPolicy) -> Self {
        Self { policy }
    }

    pub fn aggregate(&self, daily: &DailySeries) -> PeriodAggregates {
        let mut weeks: BTreeMap<WeekKey, Vec<Decimal>> = BTreeMap::new();
        let mut months: BTreeMap<MonthKey, Vec<Decimal>> = BTreeMap::new();
        let mut years: BTreeMap<YearKey, Vec<Decimal>> = BTreeMap::new();

        for (date, value) in daily.iter() {
            weeks.entry(WeekKey::of(date)).or_default().push(value);
            months.entry(MonthKey::of(date)).or_default().push(value);
            years.entry(YearKey::of(date)).or_default().push(value);
        }

        let weeks = self.reduce_buckets(weeks);
        let months = self.reduce_buckets(months);

        let years = match self.policy.year_derivation {
            YearDerivation::FromDaily => self.reduce_buckets(years),
            YearDerivation::FromMonths => {
                let mut by_year: BTreeMap<YearKey, Vec<Decimal>> = BTreeMap::new();
                for (month, value) in &months {
                    by_year.entry(YearKey(month.year)).or_default().push(*value);
                }
                self.reduce_buckets(by_year)
            }
        };

        PeriodAggregates {
            weeks,
            months,
            years,
        }
    }

    fn reduce_buckets<K: Ord>(&self, buckets: BTreeMap<K, Vec<Decimal>>) -> BTreeMap<K, Decimal> {
        buckets
            .into_iter()
            .filter_map(|(key, values)| self.policy.statistic.reduce(&values).map(|v| (key, v)))
            .collect()
    }
}

//! Month, year and all-time averages.

use crate::calendar::{MonthKey, YearKey};
use crate::daily::DailySeries;
use crate::period::PeriodAggregator;
use crate::policy::{round_dp_half_up, AggregationPolicy};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline averages for the current month, the current year and all time,
/// rounded to two decimals. `None` means nothing was reported in that period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryAverages {
    pub month: Option<Decimal>,
    pub year: Option<Decimal>,
    pub overall: Option<Decimal>,
}

pub fn summary_averages(
    daily: &DailySeries,
    today: NaiveDate,
    policy: AggregationPolicy,
) -> SummaryAverages {
    let to_date = daily.through(today);
    let aggregates = PeriodAggregator::new(policy).aggregate(&to_date);
    let all: Vec<Decimal> = to_date.iter().map(|(_, v)| v).collect();
    let rounded = |v: Option<Decimal>| v.map(|v| round_dp_half_up(v, 2));

    SummaryAverages {
        month: rounded(aggregates.month(MonthKey::of(today))),
        year: rounded(aggregates.year(YearKey::of(today))),
        overall: rounded(policy.statistic.reduce(&all)),
    }
}

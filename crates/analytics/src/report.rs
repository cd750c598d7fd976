//! The serialized report served to the dashboard. Missing values are `null`.

use crate::extremum::Extremum;
use crate::rolling::{Momentum, Trend};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything the dashboard needs for one request.
///
/// This struct is the final output of the `HappinessEngine`. Every unknown
/// value is `None` (JSON `null`), never `0`, so "nothing reported" and "zero
/// reported" stay distinguishable until the presentation layer picks a glyph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HappinessReport {
    pub current: CurrentContext,
    pub last_year_current: LastYearContext,

    /// Aggregates of the periods containing today.
    pub current_value: PeriodValues,
    /// Period-to-date aggregates for the same date one year ago.
    pub last_year_value: LastYearValues,

    /// One slot per day of the current year, `null` after today.
    pub progress_current_year: Vec<Option<i32>>,
    /// One slot per day of last year, fully filled.
    pub progress_last_year: Vec<Option<i32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothed_current_year: Option<Vec<Option<Decimal>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothed_last_year: Option<Vec<Option<Decimal>>>,

    pub stats: Stats,
    pub headline: Headline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentContext {
    pub today: NaiveDate,
    pub year: i32,
    pub day_of_year: u32,
    pub days_in_year: u32,
    pub week_key: String,
    pub month_key: String,
    pub year_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastYearContext {
    pub year: i32,
    pub date_key: NaiveDate,
    /// Marker position on last year's bar, clamped to that year's length.
    pub day_of_year: u32,
    pub days_in_year: u32,
    pub week_key: String,
    pub month_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodValues {
    pub week: Option<i32>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastYearValues {
    pub day: Option<i32>,
    pub week: Option<i32>,
    pub month: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub week: MomentumBlock,
    pub month: MomentumBlock,
    pub today: TodayBlock,
    pub best_day: Extremum,
    pub worst_day: Extremum,
}

/// Momentum of a 7- or 30-day window as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MomentumBlock {
    pub avg: i32,
    pub prev: i32,
    pub delta: Decimal,
    #[serde(rename = "arrow")]
    pub trend: Trend,
}

impl From<Momentum> for MomentumBlock {
    fn from(m: Momentum) -> Self {
        Self {
            avg: m.current_avg(),
            prev: m.previous_avg(),
            delta: m.delta(),
            trend: m.trend(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodayBlock {
    pub value: Option<i32>,
    pub yesterday: Option<i32>,
    /// Today minus yesterday, with a missing day counted as `0`.
    pub delta: i32,
}

/// The overall mood headline, driven only by the 7-day trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Headline {
    Improving,
    Deteriorating,
    Stable,
}

impl From<Trend> for Headline {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Up => Headline::Improving,
            Trend::Down => Headline::Deteriorating,
            Trend::Flat => Headline::Stable,
        }
    }
}

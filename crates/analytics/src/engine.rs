//! Assembles a [`HappinessReport`] from raw observations.
//!
//! The engine owns the aggregation policy and the reporting zone; every other
//! module it calls is a pure function of the daily series.

use crate::calendar::{
    day_of_year, days_in_year, first_day_of_year, last_day_of_year, one_year_before, MonthKey,
    ReportingZone, WeekKey, YearKey,
};
use crate::daily::DailySeries;
use crate::error::AnalyticsError;
use crate::extremum::find_extremes;
use crate::period::PeriodAggregator;
use crate::policy::{display_int, AggregationPolicy};
use crate::report::{
    CurrentContext, HappinessReport, LastYearContext, LastYearValues, PeriodValues, Stats,
    TodayBlock,
};
use crate::rolling::{momentum, MONTH_WINDOW, WEEK_WINDOW};
use crate::series::YearSeries;
use crate::summary::{summary_averages, SummaryAverages};
use chrono::{Datelike, DateTime, Days, NaiveDate, Utc};
use core_types::{DateRange, Observation};

/// A stateless calculator that turns raw observations into a `HappinessReport`.
///
/// Each call recomputes everything from the observations it is given; nothing
/// is cached between requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HappinessEngine {
    policy: AggregationPolicy,
    zone: ReportingZone,
    smooth_series: bool,
}

impl HappinessEngine {
    pub fn new(policy: AggregationPolicy, zone: ReportingZone) -> Self {
        Self {
            policy,
            zone,
            smooth_series: false,
        }
    }

    /// Also emit the 3-point smoothed year series for rendering.
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smooth_series = enabled;
        self
    }

    /// Today's date in the reporting timezone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.zone.today(now)
    }

    /// The observation ranges a report for `today` reads: all of last year and
    /// the current year up to today.
    ///
    /// The first range opens early when the ISO week holding "one year ago"
    /// starts in the December before last year.
    pub fn required_ranges(&self, today: NaiveDate) -> Result<[DateRange; 2], AnalyticsError> {
        let last_year = today.year() - 1;
        let out_of_range = |year: i32| AnalyticsError::InvalidRange(format!("year {} is out of range", year));

        let ly_jan_first = first_day_of_year(last_year).ok_or_else(|| out_of_range(last_year))?;
        let ly_week_start = WeekKey::of(one_year_before(today))
            .first_day()
            .ok_or_else(|| out_of_range(last_year))?;
        let ly_start = ly_jan_first.min(ly_week_start);
        let ly_end = last_day_of_year(last_year).ok_or_else(|| out_of_range(last_year))?;
        let cy_start = first_day_of_year(today.year()).ok_or_else(|| out_of_range(today.year()))?;

        Ok([DateRange::new(ly_start, ly_end)?, DateRange::new(cy_start, today)?])
    }

    /// The main entry point: computes the report as of the instant `now`.
    pub fn compute(
        &self,
        observations: &[Observation],
        now: DateTime<Utc>,
    ) -> Result<HappinessReport, AnalyticsError> {
        self.compute_for(observations, self.today(now))
    }

    /// Computes the report with an explicit reference date.
    pub fn compute_for(
        &self,
        observations: &[Observation],
        today: NaiveDate,
    ) -> Result<HappinessReport, AnalyticsError> {
        let daily = DailySeries::reduce(observations, self.policy.statistic).through(today);
        tracing::debug!(%today, days = daily.len(), "Computing happiness report.");

        let year = today.year();
        let ly_date = one_year_before(today);
        let ly_year = ly_date.year();
        let ly_days = days_in_year(ly_year);

        let aggregator = PeriodAggregator::new(self.policy);

        // --- Current periods ---
        let current = aggregator.aggregate(&daily);
        let week_key = WeekKey::of(today);
        let month_key = MonthKey::of(today);
        let year_key = YearKey::of(today);
        let current_value = PeriodValues {
            week: current.week(week_key).map(display_int),
            month: current.month(month_key).map(display_int),
            year: current.year(year_key).map(display_int),
        };

        // --- Same periods one year ago, up to the same date ---
        let ly_daily = daily.through(ly_date);
        let last_year = aggregator.aggregate(&ly_daily);
        let ly_week_key = WeekKey::of(ly_date);
        let ly_month_key = MonthKey::of(ly_date);
        let last_year_value = LastYearValues {
            day: ly_daily.get(ly_date).map(display_int),
            week: last_year.week(ly_week_key).map(display_int),
            month: last_year.month(ly_month_key).map(display_int),
        };

        // --- Year progress series ---
        let rounding = self.policy.series_rounding;
        let current_series = YearSeries::build(&daily, year, today, rounding)?;
        let last_series = YearSeries::build(&daily, ly_year, today, rounding)?;
        let (smoothed_current_year, smoothed_last_year) = if self.smooth_series {
            (Some(current_series.smoothed()), Some(last_series.smoothed()))
        } else {
            (None, None)
        };

        // --- Momentum ---
        let week = momentum(&daily, today, WEEK_WINDOW)?;
        let month = momentum(&daily, today, MONTH_WINDOW)?;

        // --- Today vs yesterday ---
        let yesterday = today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| AnalyticsError::InvalidRange(format!("no day before {}", today)))?;
        let today_value = daily.get(today).map(display_int);
        let yesterday_value = daily.get(yesterday).map(display_int);
        let today_block = TodayBlock {
            value: today_value,
            yesterday: yesterday_value,
            delta: today_value.unwrap_or(0) - yesterday_value.unwrap_or(0),
        };

        // --- Best / worst of the year so far ---
        let year_to_date = self.required_ranges(today)?[1];
        let extremes = find_extremes(&daily, year_to_date)?;

        Ok(HappinessReport {
            current: CurrentContext {
                today,
                year,
                day_of_year: day_of_year(today),
                days_in_year: days_in_year(year),
                week_key: week_key.to_string(),
                month_key: month_key.to_string(),
                year_key: year_key.to_string(),
            },
            last_year_current: LastYearContext {
                year: ly_year,
                date_key: ly_date,
                day_of_year: day_of_year(today).min(ly_days),
                days_in_year: ly_days,
                week_key: ly_week_key.to_string(),
                month_key: ly_month_key.to_string(),
            },
            current_value,
            last_year_value,
            progress_current_year: current_series.into_values(),
            progress_last_year: last_series.into_values(),
            smoothed_current_year,
            smoothed_last_year,
            stats: Stats {
                week: week.into(),
                month: month.into(),
                today: today_block,
                best_day: extremes.best,
                worst_day: extremes.worst,
            },
            headline: week.trend().into(),
        })
    }

    /// Month, year and all-time averages as of the instant `now`.
    pub fn summary(&self, observations: &[Observation], now: DateTime<Utc>) -> SummaryAverages {
        let daily = DailySeries::reduce(observations, self.policy.statistic);
        summary_averages(&daily, self.today(now), self.policy)
    }
}
